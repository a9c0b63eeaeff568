/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Reading and writing the fixed preamble of a pixel file

use alloc::vec::Vec;

use log::trace;
use zune_core::bytestream::{ZByteReader, ZByteWriter, ZReaderTrait};

use crate::constants::PIXEL_SIGNATURE;
use crate::errors::{PixelEncodeErrors, PixelErrors};
use crate::format::PixelFormat;
use crate::image::Rgba;
use crate::utils::{read_field, write_field};

/// Everything stored before the pixel stream
///
/// `width` and `height` are the dimensions of the image, even when
/// the pixel stream is transposed.
pub(crate) struct PixelHeader {
    pub format:  PixelFormat,
    pub width:   usize,
    pub height:  usize,
    pub palette: Vec<Rgba>
}

impl PixelHeader {
    /// Size of the header in bytes for a palette of `colors` entries
    pub fn encoded_size(format: PixelFormat, colors: usize) -> usize {
        let size_field = if format.contains(PixelFormat::DOUBLE_SIZE) { 2 } else { 1 };
        let count_field = if format.contains(PixelFormat::DOUBLE_BYTES) { 2 } else { 1 };
        let entry = if format.contains(PixelFormat::ALPHA) { 4 } else { 3 };

        PIXEL_SIGNATURE.len() + 1 + 2 * size_field + count_field + entry * colors.saturating_sub(1)
    }

    pub fn decode<T: ZReaderTrait>(stream: &mut ZByteReader<T>) -> Result<PixelHeader, PixelErrors> {
        let mut signature = [0; 3];

        for byte in signature.iter_mut() {
            *byte = stream.get_u8_err().map_err(PixelErrors::Incomplete)?;
        }
        if signature != PIXEL_SIGNATURE {
            return Err(PixelErrors::WrongSignature(signature));
        }

        let raw_format = stream.get_u8_err().map_err(PixelErrors::Incomplete)?;

        let format =
            PixelFormat::from_bits(raw_format).ok_or(PixelErrors::UnsupportedFormat(raw_format))?;

        let wide_size = format.contains(PixelFormat::DOUBLE_SIZE);
        let wide_count = format.contains(PixelFormat::DOUBLE_BYTES);

        let width = usize::from(read_field(stream, wide_size)?);
        let height = usize::from(read_field(stream, wide_size)?);
        let colors = usize::from(read_field(stream, wide_count)?) + 1;

        trace!("Image format: {:?}", format);
        trace!("Image width: {}", width);
        trace!("Image height: {}", height);
        trace!("Palette size: {}", colors);

        let alpha = format.contains(PixelFormat::ALPHA);
        let mut palette = Vec::with_capacity(colors);
        palette.push(Rgba::TRANSPARENT);

        for _ in 1..colors {
            let mut channels = [0, 0, 0, 255];
            let stored = if alpha { 4 } else { 3 };

            for channel in channels.iter_mut().take(stored) {
                *channel = stream.get_u8_err().map_err(PixelErrors::Incomplete)?;
            }
            palette.push(Rgba::new(channels[0], channels[1], channels[2], channels[3]));
        }

        Ok(PixelHeader {
            format,
            width,
            height,
            palette
        })
    }

    pub fn encode(&self, stream: &mut ZByteWriter) -> Result<(), PixelEncodeErrors> {
        for byte in PIXEL_SIGNATURE {
            stream.write_u8_err(byte)?;
        }
        stream.write_u8_err(self.format.bits())?;

        let wide_size = self.format.contains(PixelFormat::DOUBLE_SIZE);
        let wide_count = self.format.contains(PixelFormat::DOUBLE_BYTES);

        // dimensions and palette size were validated against the format
        write_field(stream, wide_size, self.width as u16)?;
        write_field(stream, wide_size, self.height as u16)?;
        write_field(stream, wide_count, (self.palette.len() - 1) as u16)?;

        let alpha = self.format.contains(PixelFormat::ALPHA);

        for color in self.palette.iter().filter(|c| !c.is_transparent()) {
            stream.write_u8_err(color.r)?;
            stream.write_u8_err(color.g)?;
            stream.write_u8_err(color.b)?;

            if alpha {
                stream.write_u8_err(color.a)?;
            }
        }
        Ok(())
    }
}
