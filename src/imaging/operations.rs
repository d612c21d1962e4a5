//! In-memory image operations.
//!
//! Each function is one stage of the normalization pipeline and takes the
//! image by value, so a stage that changes nothing hands the same buffer on
//! without copying. Only [`decode`] and [`encode_jpeg`] touch the disk.

use super::backend::{BackendError, Dimensions};
use super::calculations::calculate_downscale_dimensions;
use super::params::{Orientation, Quality};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::imageops;
use image::{
    DynamicImage, ExtendedColorType, ImageDecoder, ImageEncoder, ImageReader, RgbImage, Rgba,
    RgbaImage,
};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// A decoded image and the rotation its metadata asks for.
#[derive(Debug)]
pub struct Decoded {
    pub image: DynamicImage,
    pub orientation: Option<Orientation>,
}

/// Load and decode an image from disk, guessing the format from its content.
///
/// The EXIF orientation comes from the same decoder. Unreadable metadata is
/// logged and treated as no rotation.
pub fn decode(path: &Path) -> Result<Decoded> {
    let decode_error = |e: image::ImageError| {
        BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
    };

    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()
        .map_err(decode_error)?;

    let orientation = match decoder.orientation() {
        Ok(value) => Orientation::from_metadata(value),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "orientation unreadable");
            None
        }
    };

    let image = DynamicImage::from_decoder(decoder).map_err(decode_error)?;
    Ok(Decoded { image, orientation })
}

pub fn dimensions(img: &DynamicImage) -> Dimensions {
    Dimensions::new(img.width(), img.height())
}

/// Rotate the image upright. Quarter turns swap width and height.
pub fn apply_orientation(img: DynamicImage, orientation: Option<Orientation>) -> DynamicImage {
    match orientation {
        None => img,
        Some(Orientation::Rotate180) => img.rotate180(),
        // `rotate90`/`rotate270` in the image crate turn clockwise
        Some(Orientation::Rotate270Ccw) => img.rotate90(),
        Some(Orientation::Rotate90Ccw) => img.rotate270(),
    }
}

/// Scale the image down so its longer edge is `max_dimension`, Lanczos3.
///
/// Returns the image and whether it was resized.
pub fn downscale(img: DynamicImage, max_dimension: u32) -> (DynamicImage, bool) {
    match calculate_downscale_dimensions((img.width(), img.height()), max_dimension) {
        Some((width, height)) => (img.resize_exact(width, height, FilterType::Lanczos3), true),
        None => (img, false),
    }
}

/// Reduce any color type to opaque 8-bit RGB.
///
/// Transparent pixels are composited onto white, so fully transparent areas
/// come out as `(255, 255, 255)`. Images without alpha are converted as-is.
pub fn flatten_to_rgb(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.into_rgb8();
    }

    let rgba = img.into_rgba8();
    let mut canvas = RgbaImage::from_pixel(rgba.width(), rgba.height(), Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, &rgba, 0, 0);
    DynamicImage::ImageRgba8(canvas).into_rgb8()
}

/// Encode an RGB image as JPEG at `path`, replacing any existing file.
pub fn encode_jpeg(img: &RgbImage, path: &Path, quality: Quality) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, quality.as_u8())
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))?;
    writer.flush()?;
    Ok(())
}
