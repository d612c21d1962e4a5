//! Error types and the external converter seam.
//!
//! Decoding, resizing and encoding happen in-process through the `image`
//! crate (see [`operations`](super::operations)). Camera formats the crate
//! can't decode (HEIC, CR3) are handed to an external program first. The
//! [`Converter`] trait is that hand-off point: production uses
//! [`MagickConverter`](super::magick::MagickConverter), tests use a recording
//! mock that writes a real JPEG without shelling out.

use super::params::Quality;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("conversion produced no output at {0}")]
    MissingOutput(PathBuf),
}

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Converts a file the imaging layer can't decode into a decodable JPEG.
///
/// Implementations only run the conversion. Checking that the output exists
/// and is non-empty is the caller's job, so every implementation gets the
/// same guarantee.
pub trait Converter {
    /// Convert `input` to a JPEG at `output`, encoded at `quality`.
    fn convert(&self, input: &Path, output: &Path, quality: Quality) -> Result<(), ConvertError>;
}
