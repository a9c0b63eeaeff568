/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use crate::errors::PixelErrors;

/// A color with 8 bit red, green, blue and alpha channels
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8
}

impl Rgba {
    /// The color every fully transparent pixel decodes to
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Rgba {
        Rgba { r, g, b, a }
    }

    /// A color with full alpha
    pub const fn opaque(r: u8, g: u8, b: u8) -> Rgba {
        Rgba::new(r, g, b, 255)
    }

    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

/// An RGBA image whose dimensions fit the pixel format
///
/// Pixels are stored in row major order, the color at `(x, y)`
/// lives at `x + y * width`. The number of pixels is always
/// `width * height`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelImage {
    width:  u16,
    height: u16,
    pixels: Vec<Rgba>
}

impl PixelImage {
    /// Create a fully transparent image
    pub fn new(width: u16, height: u16) -> PixelImage {
        PixelImage {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; usize::from(width) * usize::from(height)]
        }
    }

    /// Create an image from row major pixels
    ///
    /// # Errors
    /// [`PixelErrors::SizeMismatch`] if `pixels` does not hold exactly
    /// `width * height` colors
    pub fn from_pixels(width: u16, height: u16, pixels: Vec<Rgba>) -> Result<PixelImage, PixelErrors> {
        let expected = usize::from(width) * usize::from(height);

        if pixels.len() != expected {
            return Err(PixelErrors::SizeMismatch(expected, pixels.len()));
        }
        Ok(PixelImage {
            width,
            height,
            pixels
        })
    }

    /// Create an image from interleaved `RGBA` bytes, four per pixel
    pub fn from_rgba8(width: u16, height: u16, data: &[u8]) -> Result<PixelImage, PixelErrors> {
        let expected = usize::from(width) * usize::from(height) * 4;

        if data.len() != expected {
            return Err(PixelErrors::SizeMismatch(expected, data.len()));
        }
        let pixels = data
            .chunks_exact(4)
            .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
            .collect();

        Ok(PixelImage {
            width,
            height,
            pixels
        })
    }

    pub const fn width(&self) -> usize {
        self.width as usize
    }

    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Return the width and height of the image
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Return the color at `(x, y)` or `None` if the position is
    /// outside the image
    pub fn get_color(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.pixels.get(x + y * self.width()).copied()
    }

    /// Set the color at `(x, y)`
    pub fn set_color(&mut self, x: usize, y: usize, color: Rgba) -> Result<(), PixelErrors> {
        if x >= self.width() || y >= self.height() {
            return Err(PixelErrors::OutOfBounds("position outside the image"));
        }
        let width = self.width();
        self.pixels[x + y * width] = color;

        Ok(())
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Replace all pixels of the image
    ///
    /// # Errors
    /// [`PixelErrors::SizeMismatch`] if `pixels` does not hold exactly
    /// `width * height` colors, the image is left untouched
    pub fn set_pixels(&mut self, pixels: Vec<Rgba>) -> Result<(), PixelErrors> {
        let expected = self.pixels.len();

        if pixels.len() != expected {
            return Err(PixelErrors::SizeMismatch(expected, pixels.len()));
        }
        self.pixels = pixels;

        Ok(())
    }

    pub fn into_pixels(self) -> Vec<Rgba> {
        self.pixels
    }

    /// Return the pixels as interleaved `RGBA` bytes
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|px| [px.r, px.g, px.b, px.a])
            .collect()
    }

    /// Return a copy with every fully transparent pixel replaced
    /// by [`Rgba::TRANSPARENT`], this is what a decoded image looks like
    pub fn normalized(&self) -> PixelImage {
        let pixels = self
            .pixels
            .iter()
            .map(|px| if px.is_transparent() { Rgba::TRANSPARENT } else { *px })
            .collect();

        PixelImage {
            width: self.width,
            height: self.height,
            pixels
        }
    }
}

#[cfg(feature = "std")]
mod file {
    use std::path::Path;

    use zune_core::options::DecoderOptions;

    use crate::errors::{PixelEncodeErrors, PixelErrors};
    use crate::format::PixelFormat;
    use crate::image::PixelImage;
    use crate::decoder::default_decoder_options;
    use crate::{PixelDecoder, PixelEncoder};

    impl PixelImage {
        /// Load a pixel file
        ///
        /// # Errors
        /// - [`PixelErrors::FileNotFound`] if the path does not exist
        /// - [`PixelErrors::Incomplete`] if the file ends early
        /// - Any other decoding error for corrupt files
        pub fn open<P: AsRef<Path>>(file: P) -> Result<PixelImage, PixelErrors> {
            Self::open_with_options(file, default_decoder_options())
        }

        /// Load a pixel file, respecting the limits in `options`
        pub fn open_with_options<P: AsRef<Path>>(
            file: P, options: DecoderOptions
        ) -> Result<PixelImage, PixelErrors> {
            let path = file.as_ref();

            let data = std::fs::read(path).map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => {
                    PixelErrors::FileNotFound(path.display().to_string())
                }
                _ => PixelErrors::IoError(err)
            })?;

            PixelDecoder::new_with_options(data.as_slice(), options).decode()
        }

        /// Write the image to a file, picking the smallest encoding
        pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<(), PixelEncodeErrors> {
            let encoded = PixelEncoder::new(self).encode()?;
            std::fs::write(file, encoded)?;

            Ok(())
        }

        /// Write the image to a file using exactly `format`
        ///
        /// # Errors
        /// - [`PixelEncodeErrors::UnsupportedFormat`] or [`PixelEncodeErrors::LossyFormat`]
        ///   if the format is invalid or cannot hold this image, nothing is written
        /// - [`PixelEncodeErrors::DestinationOpen`] if the file cannot be written
        pub fn save_with_format<P: AsRef<Path>>(
            &self, file: P, format: PixelFormat
        ) -> Result<(), PixelEncodeErrors> {
            let encoded = PixelEncoder::new_with_format(self, format).encode()?;
            std::fs::write(file, encoded)?;

            Ok(())
        }
    }

    /// Load a pixel file
    ///
    /// See [`PixelImage::open`]
    pub fn load_from_file<P: AsRef<Path>>(file: P) -> Result<PixelImage, PixelErrors> {
        PixelImage::open(file)
    }

    /// Write an image to a file, searching for the smallest encoding
    /// when `format` is `None`
    pub fn write_to_file<P: AsRef<Path>>(
        file: P, image: &PixelImage, format: Option<PixelFormat>
    ) -> Result<(), PixelEncodeErrors> {
        match format {
            Some(format) => image.save_with_format(file, format),
            None => image.save(file)
        }
    }
}

#[cfg(feature = "std")]
pub use file::{load_from_file, write_to_file};
