/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use log::{trace, warn};
use zune_core::bytestream::{ZByteReader, ZReaderTrait};
use zune_core::options::DecoderOptions;

use crate::constants::MAX_DIMENSION;
use crate::errors::PixelErrors;
use crate::format::PixelFormat;
use crate::header::PixelHeader;
use crate::image::{PixelImage, Rgba};
use crate::streams::{decode_stream, StreamLayout};
use crate::utils::transpose;

/// Options used by [`PixelDecoder::new`], allowing every
/// dimension the format can store and ignoring trailing data
pub(crate) fn default_decoder_options() -> DecoderOptions {
    DecoderOptions::default()
        .set_max_width(MAX_DIMENSION)
        .set_max_height(MAX_DIMENSION)
        .set_strict_mode(false)
}

/// A pixel format decoder
///
/// Call [`decode_headers`](PixelDecoder::decode_headers) to inspect the
/// dimensions, format and palette, or [`decode`](PixelDecoder::decode)
/// to reconstruct the image.
///
/// # Example
/// ```
/// use zune_pixel::PixelDecoder;
///
/// // 1x1 image with a single red pixel
/// let data = b"pxl\x00\x01\x01\x01\xff\x00\x00\x01";
/// let mut decoder = PixelDecoder::new(&data[..]);
///
/// decoder.decode_headers().unwrap();
/// assert_eq!(decoder.dimensions(), Some((1, 1)));
///
/// let image = decoder.decode().unwrap();
/// assert_eq!(image.pixels()[0].r, 255);
/// ```
pub struct PixelDecoder<T: ZReaderTrait> {
    stream:  ZByteReader<T>,
    options: DecoderOptions,
    header:  Option<PixelHeader>
}

impl<T: ZReaderTrait> PixelDecoder<T> {
    /// Create a new decoder accepting images up to 65535x65535
    pub fn new(data: T) -> PixelDecoder<T> {
        PixelDecoder::new_with_options(data, default_decoder_options())
    }

    /// Create a new decoder respecting the limits in `options`
    ///
    /// Strict mode turns bytes following the pixel stream into an error.
    pub fn new_with_options(data: T, options: DecoderOptions) -> PixelDecoder<T> {
        PixelDecoder {
            stream: ZByteReader::new(data),
            options,
            header: None
        }
    }

    /// Decode the signature, format, dimensions and palette
    ///
    /// Calling this more than once has no effect.
    pub fn decode_headers(&mut self) -> Result<(), PixelErrors> {
        if self.header.is_some() {
            return Ok(());
        }
        let header = PixelHeader::decode(&mut self.stream)?;

        if header.width > self.options.get_max_width() {
            return Err(PixelErrors::TooLargeDimensions(
                "width",
                self.options.get_max_width(),
                header.width
            ));
        }
        if header.height > self.options.get_max_height() {
            return Err(PixelErrors::TooLargeDimensions(
                "height",
                self.options.get_max_height(),
                header.height
            ));
        }
        self.header = Some(header);

        Ok(())
    }

    /// Decode the whole image
    ///
    /// # Errors
    /// - [`PixelErrors::Incomplete`] if the data ends early
    /// - [`PixelErrors::OutOfBounds`] if a background patch leaves the image
    /// - [`PixelErrors::InvalidColorIndex`] for indices outside the palette
    /// - [`PixelErrors::TrailingBytes`] for unused data in strict mode
    pub fn decode(&mut self) -> Result<PixelImage, PixelErrors> {
        self.decode_headers()?;

        let Some(header) = &self.header else {
            return Err(PixelErrors::Incomplete("missing header"));
        };

        let layout = StreamLayout::new(
            header.format,
            header.palette.len(),
            header.width,
            header.height
        );
        // reject short streams before allocating the canvas
        if !self.stream.has(layout.min_encoded_size()) {
            return Err(PixelErrors::Incomplete(
                "stream too short for the image dimensions"
            ));
        }
        let mut canvas = vec![0_u16; layout.pixels()];

        decode_stream(&mut self.stream, &layout, &mut canvas)?;

        if header.format.contains(PixelFormat::TRANSPOSE) {
            trace!("Undoing transpose");
            canvas = transpose(&canvas, layout.width, layout.height);
        }

        if self.stream.has(1) {
            if self.options.get_strict_mode() {
                return Err(PixelErrors::TrailingBytes);
            }
            warn!("Extra bytes after the pixel stream, ignoring them");
        }

        let palette: Vec<Rgba> = header
            .palette
            .iter()
            .map(|c| if c.is_transparent() { Rgba::TRANSPARENT } else { *c })
            .collect();

        let pixels = canvas
            .iter()
            .map(|index| palette[usize::from(*index)])
            .collect();

        // dimensions were read from at most 16 bit fields
        PixelImage::from_pixels(header.width as u16, header.height as u16, pixels)
    }

    /// Return the image width and height, or `None` before headers are decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.header.as_ref().map(|h| (h.width, h.height))
    }

    /// Return the format flags of the image
    pub fn format(&self) -> Option<PixelFormat> {
        self.header.as_ref().map(|h| h.format)
    }

    /// Return the palette, slot 0 being the transparent color
    pub fn palette(&self) -> Option<&[Rgba]> {
        self.header.as_ref().map(|h| h.palette.as_slice())
    }
}
