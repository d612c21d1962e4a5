//! Image processing: the `image` crate in-process, ImageMagick for camera formats.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (format guessed from content) |
//! | **Orientation** | `ImageDecoder::orientation` on the decoding reader |
//! | **Resize** | `DynamicImage::resize_exact` with `Lanczos3` |
//! | **Flatten** | `imageops::overlay` onto a white canvas, 8-bit RGB out |
//! | **Encode → JPEG** | `image::codecs::jpeg::JpegEncoder` |
//! | **HEIC/CR3 → JPEG** | `magick` via [`MagickConverter`] |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension and size math (unit testable)
//! - **Parameters**: [`Quality`] and [`Orientation`]
//! - **Backend**: error types and the [`Converter`] trait
//! - **Operations**: one function per in-memory pipeline stage

pub mod backend;
mod calculations;
pub mod magick;
pub mod operations;
mod params;

pub use backend::{BackendError, ConvertError, Converter, Dimensions};
pub use calculations::{bytes_to_mb, calculate_downscale_dimensions, percent_reduction};
pub use magick::MagickConverter;
pub use params::{Orientation, Quality};
