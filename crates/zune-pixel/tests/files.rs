/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use zune_pixel::{
    load_from_file, write_to_file, PixelEncodeErrors, PixelErrors, PixelFormat, PixelImage, Rgba
};

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("zune-pixel-{}-{name}.pxl", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

fn checkerboard() -> PixelImage {
    let mut image = PixelImage::new(10, 6);

    for y in 0..6 {
        for x in 0..10 {
            if (x + y) % 2 == 0 {
                image.set_color(x, y, Rgba::opaque(0, 128, 255)).unwrap();
            }
        }
    }
    image
}

#[test]
fn save_then_open() {
    let path = temp_path("save");
    let image = checkerboard();

    image.save(&path).unwrap();
    assert!(zune_pixel::probe_pixel(&std::fs::read(&path).unwrap()));
    assert_eq!(PixelImage::open(&path).unwrap(), image);

    write_to_file(&path, &image, Some(PixelFormat::REPEAT | PixelFormat::TRANSPOSE)).unwrap();
    assert_eq!(std::fs::read(&path).unwrap()[3], 0x21);
    assert_eq!(load_from_file(&path).unwrap(), image);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn missing_file() {
    let path = temp_path("missing");
    let err = load_from_file(&path).unwrap_err();

    assert!(matches!(err, PixelErrors::FileNotFound(_)));
}

#[test]
fn truncated_file() {
    let path = temp_path("truncated");
    let image = checkerboard();

    image.save(&path).unwrap();
    let data = std::fs::read(&path).unwrap();
    std::fs::write(&path, &data[..data.len() - 1]).unwrap();

    assert!(matches!(load_from_file(&path), Err(PixelErrors::Incomplete(_))));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn encode_errors_write_nothing() {
    let path = temp_path("lossy");
    let image = PixelImage::new(256, 1);

    let err = write_to_file(&path, &image, Some(PixelFormat::empty())).unwrap_err();

    assert!(matches!(err, PixelEncodeErrors::LossyFormat(_)));
    assert!(!path.exists());
}

#[test]
fn unwritable_destination() {
    let path = temp_path("dir").join("missing").join("image.pxl");
    let err = checkerboard().save(&path).unwrap_err();

    assert!(matches!(err, PixelEncodeErrors::DestinationOpen(_)));
}
