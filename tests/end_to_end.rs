//! End-to-end runs of the walker over real directory trees.
//!
//! Everything here goes through the public API only: build an
//! [`OptimizeConfig`] rooted in a temp dir, call [`walk`], inspect the files.
//! Camera formats use a converter that drops a prepared JPEG in place, so the
//! suite runs without ImageMagick. The one test that needs the real tool is
//! `#[ignore]`d.
//!
//! Run with: cargo test --test end_to_end

use asset_squeeze::config::OptimizeConfig;
use asset_squeeze::imaging::{ConvertError, Converter, MagickConverter, Quality};
use asset_squeeze::walk::{RunTotals, WalkEvent, walk};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 251) as u8, (y % 241) as u8, ((x + y) % 239) as u8])
    });
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, 95)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    out
}

/// Writes a fixed JPEG at the output path, whatever the input.
struct StaticJpegConverter {
    jpeg: Vec<u8>,
}

impl Converter for StaticJpegConverter {
    fn convert(&self, _input: &Path, output: &Path, _quality: Quality) -> Result<(), ConvertError> {
        fs::write(output, &self.jpeg).unwrap();
        Ok(())
    }
}

fn no_converter() -> MagickConverter {
    MagickConverter::new("asset-squeeze-no-such-converter")
}

fn names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn large_photo_is_capped_and_backed_up() {
    let tmp = TempDir::new().unwrap();
    let photo = tmp.path().join("hero.jpg");
    let original = jpeg_bytes(4000, 3000);
    fs::write(&photo, &original).unwrap();

    let config = OptimizeConfig::with_source_root(tmp.path());
    let totals = walk(&config, &no_converter(), None).unwrap();

    assert_eq!(totals.processed, 1);
    assert_eq!(totals.failed, 0);
    assert_eq!(image::image_dimensions(&photo).unwrap(), (1920, 1440));
    assert_eq!(fs::read(tmp.path().join("hero.jpg.original")).unwrap(), original);

    let out = image::open(&photo).unwrap();
    assert!(!out.color().has_alpha());
    assert!(fs::metadata(&photo).unwrap().len() > 0);
    assert!(totals.final_bytes < totals.original_bytes);
}

#[test]
fn transparent_png_becomes_white_backed_jpeg() {
    let tmp = TempDir::new().unwrap();
    let icons = tmp.path().join("icons");
    fs::create_dir(&icons).unwrap();
    RgbaImage::from_pixel(48, 48, Rgba([0, 128, 0, 0]))
        .save(icons.join("blank.png"))
        .unwrap();

    let config = OptimizeConfig::with_source_root(tmp.path());
    walk(&config, &no_converter(), None).unwrap();

    assert_eq!(names(&icons), vec!["blank.jpg", "blank.png.original"]);
    let out = image::open(icons.join("blank.jpg")).unwrap().to_rgb8();
    for p in out.pixels() {
        assert!(p.0.iter().all(|&c| c >= 250), "expected white, got {p:?}");
    }
}

#[test]
fn camera_file_is_replaced_by_jpeg_with_raw_backup() {
    let tmp = TempDir::new().unwrap();
    let raw = tmp.path().join("IMG_0042.CR3");
    fs::write(&raw, b"raw sensor data").unwrap();

    let converter = StaticJpegConverter {
        jpeg: jpeg_bytes(2400, 1600),
    };
    let config = OptimizeConfig::with_source_root(tmp.path());
    let totals = walk(&config, &converter, None).unwrap();

    assert_eq!(totals.processed, 1);
    assert_eq!(names(tmp.path()), vec!["IMG_0042.CR3.original", "IMG_0042.jpg"]);
    assert_eq!(
        fs::read(tmp.path().join("IMG_0042.CR3.original")).unwrap(),
        b"raw sensor data"
    );
    assert_eq!(
        image::image_dimensions(tmp.path().join("IMG_0042.jpg")).unwrap(),
        (1920, 1280)
    );
}

#[test]
fn corrupt_file_is_counted_and_left_alone() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.png"), b"not a png").unwrap();
    fs::write(tmp.path().join("b.jpg"), jpeg_bytes(300, 200)).unwrap();

    let (tx, rx) = std::sync::mpsc::channel();
    let config = OptimizeConfig::with_source_root(tmp.path());
    let totals = walk(&config, &no_converter(), Some(tx)).unwrap();
    let events: Vec<WalkEvent> = rx.iter().collect();

    assert_eq!(totals.processed, 1);
    assert_eq!(totals.failed, 1);
    assert_eq!(fs::read(tmp.path().join("a.png")).unwrap(), b"not a png");
    assert_eq!(names(tmp.path()), vec!["a.png", "b.jpg", "b.jpg.original"]);
    assert!(matches!(events[0], WalkEvent::FileFailed { .. }));
    assert!(matches!(events[1], WalkEvent::FileOptimized(_)));
}

#[test]
fn second_run_adds_no_backups() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("photo.jpeg"), jpeg_bytes(2500, 1000)).unwrap();
    RgbaImage::from_pixel(64, 64, Rgba([200, 10, 10, 255]))
        .save(tmp.path().join("logo.png"))
        .unwrap();
    let config = OptimizeConfig::with_source_root(tmp.path());

    walk(&config, &no_converter(), None).unwrap();
    let after_first = names(tmp.path());
    let second = walk(&config, &no_converter(), None).unwrap();

    assert_eq!(
        after_first,
        vec!["logo.jpg", "logo.png.original", "photo.jpeg.original", "photo.jpg"]
    );
    assert_eq!(names(tmp.path()), after_first);
    assert_eq!(second.processed, 2);
    assert_eq!(second.failed, 0);
}

#[test]
fn excluded_folders_and_backups_are_skipped() {
    let tmp = TempDir::new().unwrap();
    let optimized = tmp.path().join("optimized");
    fs::create_dir(&optimized).unwrap();
    let big = jpeg_bytes(2500, 2500);
    fs::write(optimized.join("big.jpg"), &big).unwrap();
    fs::write(tmp.path().join("old.png.original"), b"backup").unwrap();

    let config = OptimizeConfig::with_source_root(tmp.path());
    let totals = walk(&config, &no_converter(), None).unwrap();

    assert_eq!(totals, RunTotals::default());
    assert_eq!(fs::read(optimized.join("big.jpg")).unwrap(), big);
}

#[test]
#[ignore] // Requires ImageMagick
fn real_magick_converts_camera_format() {
    let tmp = TempDir::new().unwrap();
    // ImageMagick detects the format from content, so a TIFF named .heic works
    RgbImage::from_pixel(64, 48, Rgb([1, 2, 3]))
        .save_with_format(tmp.path().join("shot.heic"), image::ImageFormat::Tiff)
        .unwrap();

    let config = OptimizeConfig::with_source_root(tmp.path());
    let totals = walk(&config, &MagickConverter::default(), None).unwrap();

    assert_eq!(totals.processed, 1);
    assert_eq!(names(tmp.path()), vec!["shot.heic.original", "shot.jpg"]);
}
