//! Shared test utilities for the asset-squeeze test suite.
//!
//! Synthetic image writers (plain, transparent, EXIF-rotated) and small
//! filesystem assertions. Everything is generated in memory so tests need no
//! fixture files.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let path = tmp.path().join("photo.jpg");
//! write_jpeg(&path, 4000, 3000);
//! assert_eq!(image_dimensions(&path), (4000, 3000));
//! ```

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

// =========================================================================
// Synthetic images
// =========================================================================

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Encode a gradient JPEG in memory, optionally with an EXIF orientation.
pub fn jpeg_bytes_with_orientation(width: u32, height: u32, orientation: Option<u16>) -> Vec<u8> {
    let img = gradient(width, height);
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, 90)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();

    let Some(value) = orientation else {
        return encoded;
    };

    // Splice an APP1 Exif segment right after SOI
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&orientation_tiff(value));
    let seg_len = (payload.len() + 2) as u16;

    let mut out = Vec::with_capacity(encoded.len() + payload.len() + 4);
    out.extend_from_slice(&encoded[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&seg_len.to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&encoded[2..]);
    out
}

/// Little-endian TIFF with a single IFD0 entry: Orientation (SHORT) = `value`.
fn orientation_tiff(value: u16) -> Vec<u8> {
    let mut tiff = b"II".to_vec();
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());
    // IFD0: one entry
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&274u16.to_le_bytes());
    tiff.extend_from_slice(&3u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&value.to_le_bytes());
    tiff.extend_from_slice(&[0, 0]);
    // No next IFD
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff
}

/// Write an opaque gradient JPEG.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, jpeg_bytes_with_orientation(width, height, None)).unwrap();
}

/// Write a gradient JPEG carrying an EXIF orientation tag.
pub fn write_jpeg_with_orientation(path: &Path, width: u32, height: u32, orientation: u16) {
    std::fs::write(
        path,
        jpeg_bytes_with_orientation(width, height, Some(orientation)),
    )
    .unwrap();
}

/// Write an opaque RGB PNG.
pub fn write_png(path: &Path, width: u32, height: u32) {
    gradient(width, height).save(path).unwrap();
}

/// Write an RGBA PNG: left half opaque red, right half fully transparent.
pub fn write_half_transparent_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    img.save(path).unwrap();
}

// =========================================================================
// Assertions
// =========================================================================

/// Dimensions of an image on disk. Panics if it can't be read.
pub fn image_dimensions(path: &Path) -> (u32, u32) {
    image::image_dimensions(path)
        .unwrap_or_else(|e| panic!("can't read dimensions of {}: {e}", path.display()))
}

/// Sorted file names in a directory.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
