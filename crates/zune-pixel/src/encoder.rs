/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use log::{debug, trace};
use zune_core::bytestream::ZByteWriter;

use crate::constants::{MAX_NARROW_DIMENSION, MAX_NARROW_PALETTE};
use crate::errors::PixelEncodeErrors;
use crate::format::PixelFormat;
use crate::header::PixelHeader;
use crate::image::PixelImage;
use crate::palette::Palette;
use crate::streams::background::most_frequent;
use crate::streams::{encode_stream, StreamLayout};
use crate::utils::transpose;

/// A pixel format encoder
///
/// Without an explicit format every combination of run length coding,
/// wide words, background patches and transposition is tried and the
/// smallest output kept. Wide dimensions and palette alpha are added
/// whenever the image needs them.
///
/// # Example
/// ```
/// use zune_pixel::{PixelEncoder, PixelFormat, PixelImage, Rgba};
///
/// let image = PixelImage::from_pixels(2, 1, vec![Rgba::opaque(255, 0, 0), Rgba::TRANSPARENT]).unwrap();
///
/// let encoded = PixelEncoder::new_with_format(&image, PixelFormat::empty()).encode().unwrap();
/// assert_eq!(encoded, b"pxl\x00\x02\x01\x01\xff\x00\x00\x01");
/// ```
pub struct PixelEncoder<'a> {
    image:  &'a PixelImage,
    format: Option<PixelFormat>
}

impl<'a> PixelEncoder<'a> {
    /// Create an encoder searching for the smallest encoding
    pub const fn new(image: &'a PixelImage) -> PixelEncoder<'a> {
        PixelEncoder {
            image,
            format: None
        }
    }

    /// Create an encoder that uses exactly `format`
    pub const fn new_with_format(image: &'a PixelImage, format: PixelFormat) -> PixelEncoder<'a> {
        PixelEncoder {
            image,
            format: Some(format)
        }
    }

    /// Encode the image
    ///
    /// # Errors
    /// - [`PixelEncodeErrors::TooManyColors`] if the image has more
    ///   distinct colors than a palette can hold
    /// - [`PixelEncodeErrors::UnsupportedFormat`] if the explicit format has
    ///   unknown bits set
    /// - [`PixelEncodeErrors::LossyFormat`] if the explicit format cannot
    ///   represent the image
    pub fn encode(&self) -> Result<Vec<u8>, PixelEncodeErrors> {
        if let Some(format) = self.format {
            if !format.is_supported() {
                return Err(PixelEncodeErrors::UnsupportedFormat(format.bits()));
            }
        }
        let palette = Palette::from_image(self.image)?;
        let required = self.required_flags(&palette);

        let Palette { colors, indices } = palette;

        let mut header = PixelHeader {
            format:  PixelFormat::empty(),
            width:   self.image.width(),
            height:  self.image.height(),
            palette: colors
        };

        match self.format {
            Some(format) => {
                check_lossless(format, required)?;

                header.format = format;

                let indices = if format.contains(PixelFormat::TRANSPOSE) {
                    transpose(&indices, header.width, header.height)
                } else {
                    indices
                };
                encode_with(&header, &indices)
            }
            None => self.search(&mut header, &indices, required)
        }
    }

    /// Flags the image cannot be stored without
    fn required_flags(&self, palette: &Palette) -> PixelFormat {
        let mut required = PixelFormat::empty();

        if self.image.width() > MAX_NARROW_DIMENSION || self.image.height() > MAX_NARROW_DIMENSION {
            required |= PixelFormat::DOUBLE_SIZE;
        }
        if palette.len() > MAX_NARROW_PALETTE {
            required |= PixelFormat::DOUBLE_BYTES;
        }
        if palette.has_translucent() {
            required |= PixelFormat::ALPHA;
        }
        required
    }

    /// Encode with every candidate format keeping the smallest output,
    /// the earliest candidate wins ties
    fn search(
        &self, header: &mut PixelHeader, indices: &[u16], required: PixelFormat
    ) -> Result<Vec<u8>, PixelEncodeErrors> {
        // wide words are searched over, not forced
        let forced = required - PixelFormat::DOUBLE_BYTES;

        let mut transposed: Option<Vec<u16>> = None;
        let mut best: Option<(PixelFormat, Vec<u8>)> = None;

        for candidate in PixelFormat::search_space() {
            if required.contains(PixelFormat::DOUBLE_BYTES)
                && !candidate.contains(PixelFormat::DOUBLE_BYTES)
            {
                continue;
            }
            header.format = candidate | forced;

            let trial_indices: &[u16] = if header.format.contains(PixelFormat::TRANSPOSE) {
                transposed.get_or_insert_with(|| transpose(indices, header.width, header.height))
            } else {
                indices
            };

            let encoded = encode_with(header, trial_indices)?;

            trace!("Format {:?} takes {} bytes", header.format, encoded.len());

            if best.as_ref().map_or(true, |(_, b)| encoded.len() < b.len()) {
                best = Some((header.format, encoded));
            }
        }
        // candidates with DOUBLE_BYTES are never skipped
        let (format, encoded) =
            best.ok_or(PixelEncodeErrors::Generic("No format could encode the image"))?;

        debug!("Picked format {:?}, {} bytes", format, encoded.len());

        Ok(encoded)
    }
}

fn check_lossless(format: PixelFormat, required: PixelFormat) -> Result<(), PixelEncodeErrors> {
    let missing = required - format;

    if missing.contains(PixelFormat::DOUBLE_SIZE) {
        return Err(PixelEncodeErrors::LossyFormat(
            "dimensions above 255 need DOUBLE_SIZE"
        ));
    }
    if missing.contains(PixelFormat::DOUBLE_BYTES) {
        return Err(PixelEncodeErrors::LossyFormat(
            "palettes above 256 colors need DOUBLE_BYTES"
        ));
    }
    if missing.contains(PixelFormat::ALPHA) {
        return Err(PixelEncodeErrors::LossyFormat(
            "translucent colors need ALPHA"
        ));
    }
    Ok(())
}

/// Encode `indices`, already laid out for `header.format`, into a new buffer
fn encode_with(header: &PixelHeader, indices: &[u16]) -> Result<Vec<u8>, PixelEncodeErrors> {
    let colors = header.palette.len();
    let layout = StreamLayout::new(header.format, colors, header.width, header.height);

    let background = if header.format.contains(PixelFormat::BACKGROUND) {
        most_frequent(indices, colors).1
    } else {
        0
    };

    let max_size = PixelHeader::encoded_size(header.format, colors) + layout.max_encoded_size(background);
    let mut out = vec![0; max_size];
    let mut stream = ZByteWriter::new(&mut out);

    header.encode(&mut stream)?;
    encode_stream(indices, &layout, &mut stream)?;

    let written = stream.position();
    out.truncate(written);

    Ok(out)
}
