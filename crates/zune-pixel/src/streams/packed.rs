/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_core::bytestream::{ZByteReader, ZByteWriter, ZReaderTrait};

use crate::errors::{PixelEncodeErrors, PixelErrors};
use crate::streams::{check_index, StreamLayout};
use crate::utils::{aligned_bit_width, read_field, write_field};

/// Indices stored per word, the first index in the lowest bits
pub(crate) fn segments(layout: &StreamLayout) -> u32 {
    layout.word_bits() / aligned_bit_width(layout.colors)
}

/// Pack `indices` into words, a trailing partially filled word
/// has its unused high bits cleared
pub(crate) fn encode(
    indices: &[u16], layout: &StreamLayout, stream: &mut ZByteWriter
) -> Result<(), PixelEncodeErrors> {
    let color_bits = aligned_bit_width(layout.colors);
    let segments = segments(layout) as usize;
    let wide = layout.wide_words();

    for chunk in indices.chunks(segments) {
        let word = chunk
            .iter()
            .enumerate()
            .fold(0_u32, |word, (segment, index)| {
                word | (u32::from(*index) << (segment as u32 * color_bits))
            });

        write_field(stream, wide, word as u16)?;
    }
    Ok(())
}

/// Unpack `count` indices into `canvas` starting at `start`.
///
/// Running past the end of the canvas is an error.
pub(crate) fn decode<T: ZReaderTrait>(
    stream: &mut ZByteReader<T>, layout: &StreamLayout, canvas: &mut [u16], start: usize,
    count: usize
) -> Result<(), PixelErrors> {
    let color_bits = aligned_bit_width(layout.colors);
    let segments = segments(layout);
    let mask = (1_u32 << color_bits) - 1;
    let wide = layout.wide_words();

    let end = start + count;
    let mut position = start;

    while position < end {
        let mut word = u32::from(read_field(stream, wide)?);

        for _ in 0..segments {
            if position == end {
                break;
            }
            let slot = canvas
                .get_mut(position)
                .ok_or(PixelErrors::OutOfBounds("packed indices run past the image"))?;

            *slot = check_index((word & mask) as u16, layout.colors)?;

            word >>= color_bits;
            position += 1;
        }
    }
    Ok(())
}
