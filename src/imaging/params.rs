//! Parameter types for image operations.
//!
//! These types describe *what* to do to an image, not *how*. The pixel work
//! lives in [`operations`](super::operations).
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 85). Clamped on construction.
//! - [`Orientation`]: Corrective rotation derived from the EXIF orientation tag.

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Quality as the `u8` the JPEG encoder takes.
    pub fn as_u8(self) -> u8 {
        self.0.clamp(1, 100) as u8
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Corrective rotation for an EXIF orientation value (tag 274), as reported
/// by the decoder.
///
/// Angles are counter-clockwise, the way the camera-orientation table is
/// usually written:
///
/// | Tag value | Correction |
/// |---|---|
/// | 3 | 180° |
/// | 6 | 270° CCW (= 90° clockwise) |
/// | 8 | 90° CCW (= 270° clockwise) |
///
/// All other values (including the mirrored variants 2, 4, 5, 7) need no
/// rotation and map to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Rotate180,
    Rotate270Ccw,
    Rotate90Ccw,
}

impl Orientation {
    /// `image` names the transform that makes the image upright, clockwise.
    pub fn from_metadata(value: image::metadata::Orientation) -> Option<Self> {
        use image::metadata::Orientation as Exif;
        match value {
            Exif::Rotate180 => Some(Self::Rotate180),
            Exif::Rotate90 => Some(Self::Rotate270Ccw),
            Exif::Rotate270 => Some(Self::Rotate90Ccw),
            _ => None,
        }
    }
}
