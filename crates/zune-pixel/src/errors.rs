/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::String;
use core::fmt::{Debug, Display, Formatter};

/// Possible errors that may occur during decoding
/// or when building an image
#[non_exhaustive]
pub enum PixelErrors {
    /// The image does not start with the `pxl` signature
    ///
    /// The argument holds the bytes found instead
    WrongSignature([u8; 3]),
    /// The format byte has bits set outside the defined flags
    UnsupportedFormat(u8),
    /// A pixel buffer does not match the image dimensions
    ///
    /// # Arguments
    /// - 1st argument is the expected number of pixels
    /// - 2nd argument is the number of pixels found
    SizeMismatch(usize, usize),
    /// The file to load does not exist
    FileNotFound(String),
    /// The stream ended before the image was fully reconstructed
    Incomplete(&'static str),
    /// A coordinate or running pixel offset lies outside the image
    OutOfBounds(&'static str),
    /// A palette index read from the stream is not in the palette
    ///
    /// # Arguments
    /// - 1st argument is the index found
    /// - 2nd argument is the palette size
    InvalidColorIndex(u16, usize),
    /// Image dimensions exceed the configured limits
    ///
    /// # Arguments
    /// - 1st argument is the dimension name
    /// - 2nd argument is the configured limit
    /// - 3rd argument is the value found
    TooLargeDimensions(&'static str, usize, usize),
    /// Bytes remain after the pixel stream, only reported in strict mode
    TrailingBytes,
    #[cfg(feature = "std")]
    IoError(std::io::Error)
}

impl Debug for PixelErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PixelErrors::WrongSignature(found) => {
                writeln!(
                    f,
                    "Wrong signature, expected `pxl` as image start but found {found:?}"
                )
            }
            PixelErrors::UnsupportedFormat(format) => {
                writeln!(f, "Format {format:#010b} not supported")
            }
            PixelErrors::SizeMismatch(expected, found) => {
                writeln!(
                    f,
                    "The pixel count does not match the image size, expected {expected} but found {found}"
                )
            }
            PixelErrors::FileNotFound(path) => {
                writeln!(f, "File {path} not found")
            }
            PixelErrors::Incomplete(reason) => {
                writeln!(f, "Incomplete pixel file: {reason}")
            }
            PixelErrors::OutOfBounds(reason) => {
                writeln!(f, "Pixel position is not inside the image: {reason}")
            }
            PixelErrors::InvalidColorIndex(index, palette) => {
                writeln!(
                    f,
                    "Color index {index} is outside the palette of {palette} colors"
                )
            }
            PixelErrors::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension}, {found} exceeds {expected}"
                )
            }
            PixelErrors::TrailingBytes => {
                writeln!(f, "Extra bytes found after the pixel stream")
            }
            #[cfg(feature = "std")]
            PixelErrors::IoError(err) => {
                writeln!(f, "I/O error {err}")
            }
        }
    }
}

impl Display for PixelErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PixelErrors {}

#[cfg(feature = "std")]
impl From<std::io::Error> for PixelErrors {
    fn from(value: std::io::Error) -> Self {
        PixelErrors::IoError(value)
    }
}

/// Errors encountered during encoding
#[non_exhaustive]
pub enum PixelEncodeErrors {
    /// The requested format has bits set outside the defined flags
    UnsupportedFormat(u8),
    /// The requested format cannot represent this image
    /// without losing information
    LossyFormat(&'static str),
    /// The image uses more colors than a palette can hold
    ///
    /// The argument is the palette size reached, transparent slot included
    TooManyColors(usize),
    /// The destination file could not be opened or written
    #[cfg(feature = "std")]
    DestinationOpen(std::io::Error),
    /// Generic message
    Generic(&'static str)
}

impl Debug for PixelEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PixelEncodeErrors::UnsupportedFormat(format) => {
                writeln!(f, "Format {format:#010b} not supported")
            }
            PixelEncodeErrors::LossyFormat(reason) => {
                writeln!(f, "Format cannot encode this image: {reason}")
            }
            PixelEncodeErrors::TooManyColors(found) => {
                writeln!(
                    f,
                    "Too many colors {found}, the palette can hold at most {}",
                    crate::constants::MAX_PALETTE
                )
            }
            #[cfg(feature = "std")]
            PixelEncodeErrors::DestinationOpen(err) => {
                writeln!(f, "Could not write destination file: {err}")
            }
            PixelEncodeErrors::Generic(val) => {
                writeln!(f, "{val}")
            }
        }
    }
}

impl Display for PixelEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PixelEncodeErrors {}

impl From<&'static str> for PixelEncodeErrors {
    fn from(r: &'static str) -> Self {
        Self::Generic(r)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for PixelEncodeErrors {
    fn from(value: std::io::Error) -> Self {
        PixelEncodeErrors::DestinationOpen(value)
    }
}
