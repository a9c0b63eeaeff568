/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::{Rng, WyRand};
use zune_pixel::{PixelDecoder, PixelEncodeErrors, PixelEncoder, PixelFormat, PixelImage, Rgba};

/// An image built from `colors` random palette entries, laid out
/// in short runs so every stream layout gets exercised
fn random_image(rng: &mut WyRand, width: u16, height: u16, colors: usize, translucent: bool) -> PixelImage {
    let palette: Vec<Rgba> = (0..colors)
        .map(|i| {
            if i == 0 {
                return Rgba::TRANSPARENT;
            }
            let alpha = if translucent { rng.generate_range(1_u8..=254) } else { 255 };
            // low bytes keep entries distinct
            Rgba::new(i as u8, (i >> 8) as u8, rng.generate(), alpha)
        })
        .collect();

    let size = usize::from(width) * usize::from(height);
    let mut pixels = Vec::with_capacity(size);
    let mut current = palette[0];

    for _ in 0..size {
        if rng.generate_range(0_u32..4) == 0 {
            current = palette[rng.generate_range(0..colors)];
        }
        pixels.push(current);
    }
    PixelImage::from_pixels(width, height, pixels).unwrap()
}

fn decode(data: &[u8]) -> PixelImage {
    PixelDecoder::new(data).decode().unwrap()
}

/// Flags a format needs for this image besides double bytes
fn forced_flags(image: &PixelImage) -> PixelFormat {
    let mut flags = PixelFormat::empty();

    if image.width() > 255 || image.height() > 255 {
        flags |= PixelFormat::DOUBLE_SIZE;
    }
    if image.pixels().iter().any(|px| px.a != 0 && px.a != 255) {
        flags |= PixelFormat::ALPHA;
    }
    flags
}

#[test]
fn every_format_round_trips() {
    let mut rng = WyRand::new_seed(0x5eed);
    let image = random_image(&mut rng, 23, 11, 6, false);

    for bits in 0..64 {
        let format = PixelFormat::from_bits(bits).unwrap();
        let encoded = PixelEncoder::new_with_format(&image, format)
            .encode()
            .unwrap();

        assert_eq!(encoded[3], bits);
        assert_eq!(decode(&encoded), image.normalized(), "format {format:?}");
    }
}

#[test]
fn translucent_images_need_alpha() {
    let mut rng = WyRand::new_seed(7);
    let image = random_image(&mut rng, 9, 17, 4, true);

    for bits in 0..64 {
        let format = PixelFormat::from_bits(bits).unwrap();
        let result = PixelEncoder::new_with_format(&image, format).encode();

        if format.contains(PixelFormat::ALPHA) {
            assert_eq!(decode(&result.unwrap()), image.normalized());
        } else {
            assert!(matches!(result, Err(PixelEncodeErrors::LossyFormat(_))));
        }
    }
}

#[test]
fn search_picks_the_smallest_candidate() {
    let mut rng = WyRand::new_seed(42);

    let images = [
        random_image(&mut rng, 40, 30, 3, false),
        random_image(&mut rng, 7, 120, 20, false),
        random_image(&mut rng, 64, 64, 2, true),
        random_image(&mut rng, 300, 2, 300, false),
        PixelImage::new(5, 5),
        PixelImage::new(0, 0)
    ];

    for image in &images {
        let searched = PixelEncoder::new(image).encode().unwrap();
        let forced = forced_flags(image);

        let mut smallest: Option<Vec<u8>> = None;

        for candidate in PixelFormat::search_space() {
            // candidates without double bytes fail for large palettes
            if let Ok(encoded) = PixelEncoder::new_with_format(image, candidate | forced).encode() {
                if smallest.as_ref().map_or(true, |s| encoded.len() < s.len()) {
                    smallest = Some(encoded);
                }
            }
        }
        assert_eq!(Some(&searched), smallest.as_ref());
        assert_eq!(decode(&searched), image.normalized());
    }
}

#[test]
fn background_wins_on_sparse_images() {
    let mut image = PixelImage::new(200, 200);
    let dot = Rgba::opaque(10, 20, 30);

    image.set_color(3, 4, dot).unwrap();
    image.set_color(150, 199, dot).unwrap();

    let encoded = PixelEncoder::new(&image).encode().unwrap();
    let format = PixelFormat::from_bits(encoded[3]).unwrap();

    assert!(format.contains(PixelFormat::BACKGROUND));
    assert_eq!(decode(&encoded), image);
}

#[test]
fn wide_dimensions_and_palettes() {
    // 300 distinct colors in runs of two
    let pixels = (0..600_u32)
        .map(|i| {
            let color = (i / 2) % 300;
            Rgba::opaque(color as u8, (color >> 8) as u8, 5)
        })
        .collect();
    let image = PixelImage::from_pixels(2, 300, pixels).unwrap();
    let wide = PixelFormat::DOUBLE_SIZE | PixelFormat::DOUBLE_BYTES;

    for extra in PixelFormat::search_space() {
        let encoded = PixelEncoder::new_with_format(&image, wide | extra)
            .encode()
            .unwrap();
        assert_eq!(decode(&encoded), image);
    }

    let err = PixelEncoder::new_with_format(&image, PixelFormat::DOUBLE_SIZE).encode();
    assert!(matches!(err, Err(PixelEncodeErrors::LossyFormat(_))));
}

#[test]
fn narrow_palette_limit() {
    // 255 colors plus the transparent slot still fit narrow words
    let pixels: Vec<Rgba> = (0..256_u16)
        .map(|i| if i == 0 { Rgba::TRANSPARENT } else { Rgba::opaque(i as u8, 0, 0) })
        .collect();
    let image = PixelImage::from_pixels(16, 16, pixels).unwrap();

    let encoded = PixelEncoder::new_with_format(&image, PixelFormat::REPEAT)
        .encode()
        .unwrap();
    assert_eq!(decode(&encoded), image);

    let mut bigger = image.clone();
    bigger.set_color(0, 0, Rgba::opaque(0, 1, 0)).unwrap();
    let mut pixels = bigger.into_pixels();
    pixels.push(Rgba::opaque(0, 2, 0));
    pixels.push(Rgba::opaque(0, 3, 0));
    let bigger = PixelImage::from_pixels(258, 1, pixels).unwrap();

    let err = PixelEncoder::new_with_format(&bigger, PixelFormat::DOUBLE_SIZE).encode();
    assert!(matches!(err, Err(PixelEncodeErrors::LossyFormat(_))));

    let encoded = PixelEncoder::new(&bigger).encode().unwrap();
    assert!(PixelFormat::from_bits(encoded[3])
        .unwrap()
        .contains(PixelFormat::DOUBLE_BYTES));
    assert_eq!(decode(&encoded), bigger);
}

#[test]
fn too_many_colors() {
    let pixels: Vec<Rgba> = (0..65536_u32)
        .map(|i| Rgba::opaque(i as u8, (i >> 8) as u8, 1))
        .collect();
    let image = PixelImage::from_pixels(256, 256, pixels).unwrap();

    let err = PixelEncoder::new(&image).encode();
    assert!(matches!(err, Err(PixelEncodeErrors::TooManyColors(65537))));

    // one transparent pixel brings the palette to exactly 65536
    let mut fits = image.clone();
    fits.set_color(0, 0, Rgba::TRANSPARENT).unwrap();

    let format = PixelFormat::DOUBLE_SIZE | PixelFormat::DOUBLE_BYTES;
    let encoded = PixelEncoder::new_with_format(&fits, format).encode().unwrap();
    assert_eq!(decode(&encoded), fits);
}
