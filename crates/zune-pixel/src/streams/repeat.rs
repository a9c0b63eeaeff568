/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Run length coding
//!
//! Each word carries a palette index in its low bits and the run
//! length minus one in the bits above it.

use zune_core::bytestream::{ZByteReader, ZByteWriter, ZReaderTrait};

use crate::errors::{PixelEncodeErrors, PixelErrors};
use crate::streams::{check_index, StreamLayout};
use crate::utils::{exact_bit_width, read_field, write_field};

/// Longest run a single word can describe
pub(crate) fn max_run(layout: &StreamLayout) -> usize {
    1 << (layout.word_bits() - exact_bit_width(layout.colors))
}

/// Splits an index slice into runs of equal indices no longer than `max_run`
pub(crate) struct Runs<'a> {
    indices: &'a [u16],
    max_run: usize
}

impl<'a> Runs<'a> {
    pub fn new(indices: &'a [u16], max_run: usize) -> Runs<'a> {
        Runs { indices, max_run }
    }
}

impl<'a> Iterator for Runs<'a> {
    type Item = (u16, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let first = *self.indices.first()?;

        let length = self
            .indices
            .iter()
            .take(self.max_run)
            .take_while(|index| **index == first)
            .count();

        self.indices = &self.indices[length..];

        Some((first, length))
    }
}

/// Write one word per run of `indices`
pub(crate) fn encode(
    indices: &[u16], layout: &StreamLayout, stream: &mut ZByteWriter
) -> Result<(), PixelEncodeErrors> {
    let color_bits = exact_bit_width(layout.colors);
    let wide = layout.wide_words();

    for (index, length) in Runs::new(indices, max_run(layout)) {
        let word = u32::from(index) | (((length - 1) as u32) << color_bits);

        write_field(stream, wide, word as u16)?;
    }
    Ok(())
}

/// Read a single run, returning the index and how many pixels it covers
fn read_run<T: ZReaderTrait>(
    stream: &mut ZByteReader<T>, layout: &StreamLayout
) -> Result<(u16, usize), PixelErrors> {
    let color_bits = exact_bit_width(layout.colors);
    let mask = (1_u32 << color_bits) - 1;

    let word = u32::from(read_field(stream, layout.wide_words())?);
    let index = check_index((word & mask) as u16, layout.colors)?;

    Ok((index, (word >> color_bits) as usize + 1))
}

/// Decode runs until the canvas is full.
///
/// A final run reaching past the last pixel is cut short.
pub(crate) fn decode<T: ZReaderTrait>(
    stream: &mut ZByteReader<T>, layout: &StreamLayout, canvas: &mut [u16]
) -> Result<(), PixelErrors> {
    let mut position = 0;

    while position < canvas.len() {
        let (index, length) = read_run(stream, layout)?;
        let end = canvas.len().min(position + length);

        canvas[position..end].fill(index);
        position = end;
    }
    Ok(())
}

/// Decode exactly `units` runs into `canvas` starting at `start`
///
/// Used for background patches, where a run leaving the canvas
/// means the file is corrupt.
pub(crate) fn decode_runs<T: ZReaderTrait>(
    stream: &mut ZByteReader<T>, layout: &StreamLayout, canvas: &mut [u16], start: usize,
    units: usize
) -> Result<(), PixelErrors> {
    let mut position = start;

    for _ in 0..units {
        let (index, length) = read_run(stream, layout)?;

        let run = canvas
            .get_mut(position..position + length)
            .ok_or(PixelErrors::OutOfBounds("run length passes the end of the image"))?;

        run.fill(index);
        position += length;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use zune_core::bytestream::{ZByteReader, ZByteWriter};

    use crate::errors::PixelErrors;
    use crate::format::PixelFormat;
    use crate::streams::repeat::{decode, decode_runs, encode, max_run, Runs};
    use crate::streams::StreamLayout;

    fn encode_runs(indices: &[u16], layout: &StreamLayout) -> Vec<u8> {
        let mut out = vec![0; layout.max_encoded_size(0)];
        let mut stream = ZByteWriter::new(&mut out);

        encode(indices, layout, &mut stream).unwrap();
        let written = stream.position();
        out.truncate(written);
        out
    }

    #[test]
    fn run_capacity_follows_remaining_bits() {
        let narrow = |colors| max_run(&StreamLayout::new(PixelFormat::REPEAT, colors, 1, 1));

        assert_eq!(narrow(2), 128);
        assert_eq!(narrow(5), 32);
        assert_eq!(narrow(256), 1);

        let wide = StreamLayout::new(PixelFormat::REPEAT | PixelFormat::DOUBLE_BYTES, 300, 1, 1);
        assert_eq!(max_run(&wide), 128);
    }

    #[test]
    fn long_runs_are_split() {
        let runs: Vec<_> = Runs::new(&[3, 3, 3, 3, 3, 1, 1], 2).collect();
        assert_eq!(runs, [(3, 2), (3, 2), (3, 1), (1, 2)]);
    }

    #[test]
    fn single_color_is_one_word() {
        let layout = StreamLayout::new(PixelFormat::REPEAT, 2, 10, 10);
        let bytes = encode_runs(&[1; 100], &layout);

        // index 1, run of 100 stored as 99
        assert_eq!(bytes, [1 | (99 << 1)]);

        let mut canvas = vec![0; 100];
        decode(&mut ZByteReader::new(bytes.as_slice()), &layout, &mut canvas).unwrap();
        assert!(canvas.iter().all(|x| *x == 1));
    }

    #[test]
    fn overlong_final_run_is_truncated() {
        let layout = StreamLayout::new(PixelFormat::REPEAT, 2, 3, 1);
        let mut canvas = vec![0; 3];

        decode(&mut ZByteReader::new(&[1_u8 | (9 << 1)][..]), &layout, &mut canvas).unwrap();
        assert_eq!(canvas, [1, 1, 1]);
    }

    #[test]
    fn patch_runs_are_bounds_checked() {
        let layout = StreamLayout::new(PixelFormat::REPEAT, 2, 3, 1);
        let mut canvas = vec![0; 3];

        let err = decode_runs(&mut ZByteReader::new(&[1_u8 | (2 << 1)][..]), &layout, &mut canvas, 1, 1);
        assert!(matches!(err, Err(PixelErrors::OutOfBounds(_))));
    }

    #[test]
    fn missing_runs_are_incomplete() {
        let layout = StreamLayout::new(PixelFormat::REPEAT, 2, 3, 1);
        let mut canvas = vec![0; 3];

        let err = decode(&mut ZByteReader::new(&[1_u8][..]), &layout, &mut canvas);
        assert!(matches!(err, Err(PixelErrors::Incomplete(_))));
    }
}
