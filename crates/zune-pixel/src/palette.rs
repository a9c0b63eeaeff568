/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use crate::constants::MAX_PALETTE;
use crate::errors::PixelEncodeErrors;
use crate::image::{PixelImage, Rgba};

/// Colors used by an image in first seen order together with
/// the palette index of every pixel
///
/// Slot 0 is always [`Rgba::TRANSPARENT`] and every pixel with
/// zero alpha maps to it.
pub(crate) struct Palette {
    pub colors:  Vec<Rgba>,
    pub indices: Vec<u16>
}

impl Palette {
    pub fn from_image(image: &PixelImage) -> Result<Palette, PixelEncodeErrors> {
        let mut colors = vec![Rgba::TRANSPARENT];
        let mut lookup = BTreeMap::new();
        let mut indices = Vec::with_capacity(image.pixels().len());

        for pixel in image.pixels() {
            if pixel.is_transparent() {
                indices.push(0);
                continue;
            }
            let index = match lookup.get(pixel) {
                Some(index) => *index,
                None => {
                    if colors.len() == MAX_PALETTE {
                        return Err(PixelEncodeErrors::TooManyColors(colors.len() + 1));
                    }
                    // fits, the palette holds at most 65536 entries
                    let index = colors.len() as u16;

                    lookup.insert(*pixel, index);
                    colors.push(*pixel);
                    index
                }
            };
            indices.push(index);
        }

        Ok(Palette { colors, indices })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether any color has partial transparency and so needs
    /// an alpha byte to be stored exactly
    pub fn has_translucent(&self) -> bool {
        self.colors.iter().any(|c| c.a != 0 && c.a != 255)
    }
}
