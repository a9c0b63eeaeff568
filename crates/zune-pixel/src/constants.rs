/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

pub const PIXEL_SIGNATURE: [u8; 3] = *b"pxl";

/// Largest width or height a narrow (one byte) field can hold
pub const MAX_NARROW_DIMENSION: usize = u8::MAX as usize;

/// Largest width or height the format can represent
pub const MAX_DIMENSION: usize = u16::MAX as usize;

/// Largest palette (transparent slot included) addressable
/// with narrow words
pub const MAX_NARROW_PALETTE: usize = 256;

/// Largest palette the format can represent, the size is stored minus one
/// in at most 16 bits
pub const MAX_PALETTE: usize = 65536;

/// Background patches end once this many word segments (packed) or
/// maximum length runs (repeat) worth of background entries are seen
/// in a row
pub const BACKGROUND_GAP_FACTOR: usize = 3;
