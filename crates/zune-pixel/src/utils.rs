/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use zune_core::bytestream::{ZByteReader, ZByteWriter, ZReaderTrait};

use crate::errors::{PixelEncodeErrors, PixelErrors};

/// Smallest bit count able to address `colors` palette entries,
/// growing one bit at a time.
///
/// Used by run length words, where whatever bits remain hold the run.
pub(crate) fn exact_bit_width(colors: usize) -> u32 {
    let mut bits = 1;

    while (1_usize << bits) < colors {
        bits += 1;
    }
    bits
}

/// Smallest bit count able to address `colors` palette entries,
/// taken from 1, 2, 4, 8 and 16.
///
/// Packed words hold several indices so the width must divide
/// the word size.
pub(crate) fn aligned_bit_width(colors: usize) -> u32 {
    let mut bits = 1;

    while (1_usize << bits) < colors {
        bits *= 2;
    }
    bits
}

/// Read a one or two byte big endian field
#[inline]
pub(crate) fn read_field<T: ZReaderTrait>(
    stream: &mut ZByteReader<T>, wide: bool
) -> Result<u16, PixelErrors> {
    if wide {
        stream.get_u16_be_err().map_err(PixelErrors::Incomplete)
    } else {
        stream
            .get_u8_err()
            .map(u16::from)
            .map_err(PixelErrors::Incomplete)
    }
}

/// Write a one or two byte big endian field.
///
/// Narrow fields keep the low byte, callers make sure the value fits.
#[inline]
pub(crate) fn write_field(
    stream: &mut ZByteWriter, wide: bool, value: u16
) -> Result<(), PixelEncodeErrors> {
    if wide {
        stream.write_u16_be_err(value)?;
    } else {
        stream.write_u8_err(value as u8)?;
    }
    Ok(())
}

/// Swap the axes of a row major `width x height` grid, the result
/// is a row major `height x width` grid
pub(crate) fn transpose<T: Copy>(grid: &[T], width: usize, height: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(grid.len());

    for x in 0..width {
        for y in 0..height {
            out.push(grid[x + y * width]);
        }
    }
    out
}
