/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoding and encoding of the pixel (`pxl`) indexed color format
//!
//! A pixel file stores a deduplicated palette followed by a stream of palette
//! indices, compressed with a combination of optional strategies selected by
//! a one byte flag set. All multi-byte fields are big endian.
//!
//! ```text
//! ╔═════════╤══════════════════════════════════════════════════════════════╗
//! ║ Bytes   │ Description                                                  ║
//! ╠═════════╪══════════════════════════════════════════════════════════════╣
//! ║ 3       │ "pxl" magic value                                            ║
//! ╟─────────┼──────────────────────────────────────────────────────────────╢
//! ║ 1       │ Format flags, see PixelFormat                                ║
//! ╟─────────┼──────────────────────────────────────────────────────────────╢
//! ║ 1 or 2  │ Width  (2 bytes with DOUBLE_SIZE)                            ║
//! ╟─────────┼──────────────────────────────────────────────────────────────╢
//! ║ 1 or 2  │ Height (2 bytes with DOUBLE_SIZE)                            ║
//! ╟─────────┼──────────────────────────────────────────────────────────────╢
//! ║ 1 or 2  │ Palette size - 1 (2 bytes with DOUBLE_BYTES)                 ║
//! ╟─────────┼──────────────────────────────────────────────────────────────╢
//! ║ [3 / 4] │ RGB(A) per palette entry, the transparent slot 0 is implicit ║
//! ╟─────────┼──────────────────────────────────────────────────────────────╢
//! ║ ...     │ Pixel stream: packed, repeat or background coded             ║
//! ╚═════════╧══════════════════════════════════════════════════════════════╝
//! ```
//!
//! # Features
//! - Decoding and encoding
//! - Brute force search over all compression combinations when encoding
//! - `no_std` with the `alloc` crate, disable the default `std` feature
//!
//! # Example
//! ```
//! use zune_pixel::{PixelDecoder, PixelEncoder, PixelImage, Rgba};
//!
//! let mut image = PixelImage::new(4, 4);
//! image.set_color(1, 2, Rgba::opaque(255, 0, 0)).unwrap();
//!
//! let encoded = PixelEncoder::new(&image).encode().unwrap();
//! let decoded = PixelDecoder::new(encoded.as_slice()).decode().unwrap();
//!
//! assert_eq!(image, decoded);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;
extern crate core;

pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use format::PixelFormat;
pub use image::{PixelImage, Rgba};
#[cfg(feature = "std")]
pub use image::{load_from_file, write_to_file};
pub use zune_core;

mod constants;
mod decoder;
mod encoder;
mod errors;
mod format;
mod header;
mod image;
mod palette;
mod streams;
mod utils;

/// Returns true if the buffer starts with the pixel
/// format signature.
///
/// Only the signature is inspected, the rest of the
/// file may still be invalid.
pub fn probe_pixel(bytes: &[u8]) -> bool {
    bytes.starts_with(&constants::PIXEL_SIGNATURE)
}

#[cfg(test)]
mod tests {
    use crate::probe_pixel;

    #[test]
    fn probe_checks_signature() {
        assert!(probe_pixel(b"pxl\x00\x01\x01\x00"));
        assert!(!probe_pixel(b"px"));
        assert!(!probe_pixel(b"qoif"));
    }
}
