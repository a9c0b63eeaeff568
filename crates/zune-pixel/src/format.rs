/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use bitflags::bitflags;

bitflags! {
    /// Bit flags stored in the format byte of a pixel file
    ///
    /// The flags are independent and may be combined, though
    /// `BACKGROUND` takes precedence over `REPEAT` when choosing
    /// the pixel stream layout, `REPEAT` then selects how each
    /// background patch is coded.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct PixelFormat: u8 {
        /// Run length coded palette indices
        const REPEAT       = 0b0000_0001;
        /// 16 bit words for palette indices, runs and counts
        const DOUBLE_BYTES = 0b0000_0010;
        /// 16 bit width, height and patch coordinates
        const DOUBLE_SIZE  = 0b0000_0100;
        /// Sparse patches drawn over a single fill color
        const BACKGROUND   = 0b0000_1000;
        /// Palette entries carry an alpha byte
        const ALPHA        = 0b0001_0000;
        /// Pixels are stored column by column
        const TRANSPOSE    = 0b0010_0000;
    }
}

impl Default for PixelFormat {
    fn default() -> Self {
        PixelFormat::empty()
    }
}

/// Flags the encoder search combines, every subset of these is tried
const SEARCHED_FLAGS: [PixelFormat; 4] = [
    PixelFormat::REPEAT,
    PixelFormat::DOUBLE_BYTES,
    PixelFormat::BACKGROUND,
    PixelFormat::TRANSPOSE
];

impl PixelFormat {
    /// Returns true if no bits outside the defined flags are set
    pub const fn is_supported(self) -> bool {
        self.bits() & !Self::all().bits() == 0
    }

    /// Number of bits in a palette index/run/count word
    pub(crate) const fn word_bits(self) -> u32 {
        if self.contains(Self::DOUBLE_BYTES) {
            16
        } else {
            8
        }
    }

    /// Every combination of repeat, double bytes, background and transpose
    /// in ascending numeric order, starting with the empty set.
    ///
    /// Double size and alpha are never part of the set, they are
    /// forced by the image when required.
    pub fn search_space() -> Vec<PixelFormat> {
        let combinations = 1_usize << SEARCHED_FLAGS.len();

        (0..combinations)
            .map(|mask| {
                SEARCHED_FLAGS
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| mask & (1 << bit) != 0)
                    .fold(PixelFormat::empty(), |acc, (_, flag)| acc | *flag)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::PixelFormat;

    #[test]
    fn search_space_is_power_set() {
        let space = PixelFormat::search_space();

        assert_eq!(space.len(), 16);
        assert_eq!(space[0], PixelFormat::empty());
        assert!(space.windows(2).all(|w| w[0].bits() < w[1].bits()));

        for format in &space {
            assert!(!format.contains(PixelFormat::DOUBLE_SIZE));
            assert!(!format.contains(PixelFormat::ALPHA));
            assert!(format.bits() <= PixelFormat::TRANSPOSE.bits() * 2);
        }
        assert_eq!(
            space[15],
            PixelFormat::REPEAT
                | PixelFormat::DOUBLE_BYTES
                | PixelFormat::BACKGROUND
                | PixelFormat::TRANSPOSE
        );
    }

    #[test]
    fn unknown_bits_are_unsupported() {
        assert!(PixelFormat::all().is_supported());
        assert_eq!(PixelFormat::all().bits(), 0x3F);
        assert!(!PixelFormat::from_bits_retain(0x40).is_supported());
        assert!(PixelFormat::from_bits(0x80).is_none());
    }
}
