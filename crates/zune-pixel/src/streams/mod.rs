/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel stream codecs
//!
//! The palette indices following the header are stored in one of three layouts
//! - packed: fixed width indices, several per word
//! - repeat: one word per run of equal indices
//! - background: a fill index followed by patches, each patch packed or repeat coded
//!
//! Words are 8 bits wide, or 16 with [`DOUBLE_BYTES`](PixelFormat::DOUBLE_BYTES).

use zune_core::bytestream::{ZByteReader, ZByteWriter, ZReaderTrait};

use crate::errors::{PixelEncodeErrors, PixelErrors};
use crate::format::PixelFormat;

pub(crate) mod background;
pub(crate) mod packed;
pub(crate) mod repeat;

/// Shape of the index grid a stream covers
///
/// With [`TRANSPOSE`](PixelFormat::TRANSPOSE) the grid is the
/// image with its axes swapped.
#[derive(Copy, Clone, Debug)]
pub(crate) struct StreamLayout {
    pub format: PixelFormat,
    pub colors: usize,
    pub width:  usize,
    pub height: usize
}

impl StreamLayout {
    /// Layout for an image of `width x height`, swapping the axes
    /// when the format is transposed
    pub fn new(format: PixelFormat, colors: usize, width: usize, height: usize) -> StreamLayout {
        let (width, height) = if format.contains(PixelFormat::TRANSPOSE) {
            (height, width)
        } else {
            (width, height)
        };
        StreamLayout {
            format,
            colors,
            width,
            height
        }
    }

    pub const fn wide_words(&self) -> bool {
        self.format.contains(PixelFormat::DOUBLE_BYTES)
    }

    pub const fn word_bits(&self) -> u32 {
        self.format.word_bits()
    }

    pub const fn pixels(&self) -> usize {
        self.width * self.height
    }

    /// Fewest bytes a complete stream can take, background streams
    /// hold at least a fill index and the end marker
    pub fn min_encoded_size(&self) -> usize {
        let word = if self.wide_words() { 2 } else { 1 };
        let pixels = self.pixels();

        let words = if self.format.contains(PixelFormat::BACKGROUND) {
            2
        } else if self.format.contains(PixelFormat::REPEAT) {
            pixels.div_ceil(repeat::max_run(self))
        } else {
            pixels.div_ceil(packed::segments(self) as usize)
        };
        words * word
    }

    /// Upper bound of the stream size in bytes, `background` is the
    /// number of pixels matching the most frequent color
    pub fn max_encoded_size(&self, background: usize) -> usize {
        let word = if self.wide_words() { 2 } else { 1 };
        let coordinate = if self.format.contains(PixelFormat::DOUBLE_SIZE) { 2 } else { 1 };
        let pixels = self.pixels();

        if self.format.contains(PixelFormat::BACKGROUND) {
            // every patch starts on a foreground pixel
            let patches = pixels - background;
            word * 2 + patches * (word + 2 * coordinate) + pixels * word
        } else {
            pixels * word
        }
    }
}

/// Check a palette index read from the stream
#[inline]
pub(crate) fn check_index(index: u16, colors: usize) -> Result<u16, PixelErrors> {
    if usize::from(index) >= colors {
        return Err(PixelErrors::InvalidColorIndex(index, colors));
    }
    Ok(index)
}

/// Encode a whole index grid with the layout `layout.format` selects
pub(crate) fn encode_stream(
    indices: &[u16], layout: &StreamLayout, stream: &mut ZByteWriter
) -> Result<(), PixelEncodeErrors> {
    if layout.format.contains(PixelFormat::BACKGROUND) {
        background::encode(indices, layout, stream)
    } else if layout.format.contains(PixelFormat::REPEAT) {
        repeat::encode(indices, layout, stream)
    } else {
        packed::encode(indices, layout, stream)
    }
}

/// Decode a whole index grid of `layout.width x layout.height`
pub(crate) fn decode_stream<T: ZReaderTrait>(
    stream: &mut ZByteReader<T>, layout: &StreamLayout, canvas: &mut [u16]
) -> Result<(), PixelErrors> {
    if layout.format.contains(PixelFormat::BACKGROUND) {
        background::decode(stream, layout, canvas)
    } else if layout.format.contains(PixelFormat::REPEAT) {
        repeat::decode(stream, layout, canvas)
    } else {
        let pixels = canvas.len();
        packed::decode(stream, layout, canvas, 0, pixels)
    }
}
