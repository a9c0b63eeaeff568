/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Background fill with patches
//!
//! The stream starts with the index filling the whole canvas, followed by
//! patches of foreground pixels. Each patch is
//!
//! | field  | size        |
//! |--------|-------------|
//! | units  | word        |
//! | x      | coordinate  |
//! | y      | coordinate  |
//! | pixels | `units` packed pixels or `units` runs |
//!
//! A patch with zero units ends the stream. Anchors are image coordinates,
//! so for transposed streams they are swapped relative to the stream canvas.

use alloc::vec;

use zune_core::bytestream::{ZByteReader, ZByteWriter, ZReaderTrait};

use crate::constants::BACKGROUND_GAP_FACTOR;
use crate::errors::{PixelEncodeErrors, PixelErrors};
use crate::format::PixelFormat;
use crate::streams::repeat::{max_run, Runs};
use crate::streams::{check_index, packed, repeat, StreamLayout};
use crate::utils::{read_field, write_field};

/// The most used index and its pixel count, ties go to the lowest index
pub(crate) fn most_frequent(indices: &[u16], colors: usize) -> (u16, usize) {
    let mut counts = vec![0_usize; colors];

    for index in indices {
        counts[usize::from(*index)] += 1;
    }

    let mut best = (0, 0);

    for (index, count) in counts.iter().enumerate() {
        if *count > best.1 {
            best = (index as u16, *count);
        }
    }
    best
}

/// Limits deciding where a patch ends
struct PatchLimits {
    /// Background entries allowed in a row before the patch is closed
    max_gap:   usize,
    /// Largest unit count the count field holds
    max_units: usize,
    /// Set when patches are run length coded, units are then runs
    max_run:   Option<usize>
}

impl PatchLimits {
    fn new(layout: &StreamLayout) -> PatchLimits {
        let max_units = if layout.wide_words() {
            usize::from(u16::MAX)
        } else {
            usize::from(u8::MAX)
        };

        if layout.format.contains(PixelFormat::REPEAT) {
            let max_run = max_run(layout);

            PatchLimits {
                max_gap: BACKGROUND_GAP_FACTOR * max_run,
                max_units,
                max_run: Some(max_run)
            }
        } else {
            PatchLimits {
                max_gap: BACKGROUND_GAP_FACTOR * packed::segments(layout) as usize,
                max_units,
                max_run: None
            }
        }
    }

    /// End of the patch beginning at `start`, trailing background excluded
    fn patch_end(&self, indices: &[u16], start: usize, background: u16) -> usize {
        let mut gap = 0;
        let mut units = 0;
        let mut run: Option<(u16, usize)> = None;
        let mut end = start;

        for (position, index) in indices.iter().enumerate().skip(start) {
            if *index == background {
                gap += 1;

                if gap > self.max_gap {
                    break;
                }
            } else {
                gap = 0;
            }

            match (self.max_run, run) {
                (Some(max_run), Some((current, length))) if current == *index && length < max_run => {
                    run = Some((current, length + 1));
                }
                _ => {
                    if units == self.max_units {
                        break;
                    }
                    units += 1;
                    run = Some((*index, 1));
                }
            }

            if *index != background {
                end = position + 1;
            }
        }
        end
    }
}

/// Image coordinates of a position in the stream canvas
fn anchor(position: usize, layout: &StreamLayout) -> (u16, u16) {
    let column = (position % layout.width) as u16;
    let row = (position / layout.width) as u16;

    if layout.format.contains(PixelFormat::TRANSPOSE) {
        (row, column)
    } else {
        (column, row)
    }
}

pub(crate) fn encode(
    indices: &[u16], layout: &StreamLayout, stream: &mut ZByteWriter
) -> Result<(), PixelEncodeErrors> {
    let wide = layout.wide_words();
    let wide_coordinates = layout.format.contains(PixelFormat::DOUBLE_SIZE);

    let (background, _) = most_frequent(indices, layout.colors);
    let limits = PatchLimits::new(layout);

    write_field(stream, wide, background)?;

    let mut position = 0;

    while position < indices.len() {
        if indices[position] == background {
            position += 1;
            continue;
        }
        let end = limits.patch_end(indices, position, background);
        let patch = &indices[position..end];

        let units = match limits.max_run {
            Some(max_run) => Runs::new(patch, max_run).count(),
            None => patch.len()
        };
        let (x, y) = anchor(position, layout);

        write_field(stream, wide, units as u16)?;
        write_field(stream, wide_coordinates, x)?;
        write_field(stream, wide_coordinates, y)?;

        if limits.max_run.is_some() {
            repeat::encode(patch, layout, stream)?;
        } else {
            packed::encode(patch, layout, stream)?;
        }
        position = end;
    }
    // no more patches
    write_field(stream, wide, 0)
}

pub(crate) fn decode<T: ZReaderTrait>(
    stream: &mut ZByteReader<T>, layout: &StreamLayout, canvas: &mut [u16]
) -> Result<(), PixelErrors> {
    let wide = layout.wide_words();
    let wide_coordinates = layout.format.contains(PixelFormat::DOUBLE_SIZE);
    let run_length = layout.format.contains(PixelFormat::REPEAT);

    let background = check_index(read_field(stream, wide)?, layout.colors)?;
    canvas.fill(background);

    loop {
        let units = usize::from(read_field(stream, wide)?);

        if units == 0 {
            break;
        }
        let mut x = usize::from(read_field(stream, wide_coordinates)?);
        let mut y = usize::from(read_field(stream, wide_coordinates)?);

        if layout.format.contains(PixelFormat::TRANSPOSE) {
            core::mem::swap(&mut x, &mut y);
        }
        if x >= layout.width || y >= layout.height {
            return Err(PixelErrors::OutOfBounds("patch anchor outside the image"));
        }
        let start = x + y * layout.width;

        if run_length {
            repeat::decode_runs(stream, layout, canvas, start, units)?;
        } else {
            packed::decode(stream, layout, canvas, start, units)?;
        }
    }
    Ok(())
}
