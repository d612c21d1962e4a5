//! Single-file normalization pipeline.
//!
//! Turns one source image into an upright, size-capped, opaque JPEG next to
//! it, keeping a byte-exact backup of what was there before. The pipeline is
//! a fixed sequence of named stages, each returning a `Result`:
//!
//! ```text
//! convert-if-needed → decode → reorient → resize → recolor → backup → encode → cleanup
//! ```
//!
//! ## Stages
//!
//! 1. **convert-if-needed**: camera formats (HEIC, CR3) go through the
//!    external [`Converter`] into `<stem>.temp.jpg`. The conversion must
//!    produce a non-empty file. The original is then backed up and deleted,
//!    and the intermediate becomes the working file.
//! 2. **decode**: format guessed from content; the EXIF orientation is read
//!    from the same decoder.
//! 3. **reorient**: EXIF orientation 3/6/8 is rotated away. Missing or
//!    unreadable metadata is `None` and the image goes on unrotated.
//! 4. **resize**: longer edge capped at `max_dimension` (Lanczos3).
//! 5. **recolor**: alpha composited onto white, 8-bit RGB out.
//! 6. **backup**: `<working><suffix>` is created once and never overwritten.
//!    Skipped for converter intermediates (their original was backed up in 1)
//!    and for JPEGs a previous run produced from a same-stem sibling, which
//!    is how a second run over the same tree creates no new backups. A
//!    different file already at the output path (`x.jpg` while processing
//!    `x.jpeg`) is backed up too before it is overwritten.
//! 7. **encode**: JPEG at the configured quality to the output path from
//!    [`naming::output_path`].
//! 8. **cleanup**: the working file is deleted when it isn't the output.
//!
//! ## Failure
//!
//! Any error ends the pipeline for that file. Decoding happens before any
//! write, so an unreadable file leaves nothing behind. A leftover converter
//! intermediate is removed on the way out. The caller (the walker) counts the
//! failure and moves on.

use crate::config::OptimizeConfig;
use crate::imaging::operations::{
    apply_orientation, decode, dimensions, downscale, encode_jpeg, flatten_to_rgb,
};
use crate::imaging::{BackendError, ConvertError, Converter, Dimensions, percent_reduction};
use crate::naming;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("{} conversion failed: {source}", .extension.to_uppercase())]
    Convert {
        extension: String,
        #[source]
        source: ConvertError,
    },
    #[error("Not a recognized image file: {0}")]
    UnsupportedExtension(PathBuf),
}

/// What happened to one successfully normalized file.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOutcome {
    /// The path the walker handed in.
    pub source: PathBuf,
    /// Where the optimized JPEG now lives.
    pub output: PathBuf,
    /// Dimensions after reorientation, before resizing.
    pub original_dimensions: Dimensions,
    pub final_dimensions: Dimensions,
    pub resized: bool,
    /// Lowercase extension of the camera format, when the converter ran.
    pub converted_from: Option<String>,
    /// Whether this run created the backup (false when one already existed).
    pub backup_created: bool,
    /// Size of the source file before anything happened.
    pub original_bytes: u64,
    pub final_bytes: u64,
}

impl NormalizeOutcome {
    /// Percentage of bytes saved; negative if the output grew.
    pub fn reduction_percent(&self) -> f64 {
        percent_reduction(self.original_bytes, self.final_bytes)
    }
}

/// The file the pipeline is currently working on.
#[derive(Debug)]
struct WorkingFile {
    path: PathBuf,
    /// Extension of the camera original, when `path` is a converter intermediate.
    converted_from: Option<String>,
    /// Whether a backup was created while producing this working file.
    backup_created: bool,
}

/// Normalize one image file in place.
///
/// On error, any converter intermediate is removed before returning. The
/// original is left as it was unless the failure came after a successful
/// conversion, in which case its backup is the recovery path.
pub fn normalize_file(
    config: &OptimizeConfig,
    converter: &impl Converter,
    path: &Path,
) -> Result<NormalizeOutcome, NormalizeError> {
    let extension = naming::lowercase_extension(path)
        .filter(|ext| config.is_recognized(ext))
        .ok_or_else(|| NormalizeError::UnsupportedExtension(path.to_path_buf()))?;

    let result = run_pipeline(config, converter, path, &extension);

    if result.is_err() && config.is_exotic(&extension) {
        remove_leftover(&naming::conversion_path(path));
    }
    result
}

fn run_pipeline(
    config: &OptimizeConfig,
    converter: &impl Converter,
    path: &Path,
    extension: &str,
) -> Result<NormalizeOutcome, NormalizeError> {
    let original_bytes = fs::metadata(path)?.len();

    let working = convert_if_needed(config, converter, path, extension)?;

    let decoded = decode(&working.path)?;
    debug!(path = %working.path.display(), orientation = ?decoded.orientation, "decoded");
    let img = apply_orientation(decoded.image, decoded.orientation);
    let original_dimensions = dimensions(&img);

    let (img, resized) = downscale(img, config.max_dimension);
    let final_dimensions = dimensions(&img);
    let rgb = flatten_to_rgb(img);

    let output = naming::output_path(&working.path);

    let backup_created = if working.converted_from.is_some() {
        working.backup_created
    } else if working.path == output
        && let Some(existing) = sibling_backup(&working.path, &config.backup_suffix)?
    {
        debug!(backup = %existing.display(), "output of an earlier run");
        false
    } else {
        backup_once(&working.path, &config.backup_suffix)?
    };

    // A different file already sitting at the output path is an original too
    if output != working.path && output.exists() {
        backup_once(&output, &config.backup_suffix)?;
    }

    encode_jpeg(&rgb, &output, config.quality)?;
    debug!(output = %output.display(), quality = config.quality.value(), "encoded");

    cleanup(&working.path, &output)?;

    let final_bytes = fs::metadata(&output)?.len();
    Ok(NormalizeOutcome {
        source: path.to_path_buf(),
        output,
        original_dimensions,
        final_dimensions,
        resized,
        converted_from: working.converted_from,
        backup_created,
        original_bytes,
        final_bytes,
    })
}

/// Stage 1: run camera formats through the external converter.
fn convert_if_needed(
    config: &OptimizeConfig,
    converter: &impl Converter,
    path: &Path,
    extension: &str,
) -> Result<WorkingFile, NormalizeError> {
    if !config.is_exotic(extension) {
        return Ok(WorkingFile {
            path: path.to_path_buf(),
            converted_from: None,
            backup_created: false,
        });
    }

    let temp = naming::conversion_path(path);
    let conversion_error = |source| NormalizeError::Convert {
        extension: extension.to_string(),
        source,
    };

    converter
        .convert(path, &temp, config.converter.quality)
        .map_err(conversion_error)?;

    let produced = fs::metadata(&temp).map(|m| m.len()).unwrap_or(0);
    if produced == 0 {
        return Err(conversion_error(ConvertError::MissingOutput(temp)));
    }
    debug!(
        source = %path.display(),
        intermediate = %temp.display(),
        bytes = produced,
        "converted"
    );

    let backup_created = backup_once(path, &config.backup_suffix)?;
    fs::remove_file(path)?;

    Ok(WorkingFile {
        path: temp,
        converted_from: Some(extension.to_string()),
        backup_created,
    })
}

/// Stage 6: copy `path` to its backup location unless a backup exists.
///
/// Returns whether a backup was written.
fn backup_once(path: &Path, suffix: &str) -> std::io::Result<bool> {
    let backup = naming::backup_path(path, suffix);
    if backup.exists() {
        debug!(backup = %backup.display(), "backup already present");
        return Ok(false);
    }
    fs::copy(path, &backup)?;
    debug!(backup = %backup.display(), "backup created");
    Ok(true)
}

/// Backup of a same-stem sibling, e.g. `logo.png.original` for `logo.jpg`.
///
/// A JPEG with such a sibling was written by an earlier run from that
/// original, so it needs no backup of its own.
fn sibling_backup(path: &Path, suffix: &str) -> std::io::Result<Option<PathBuf>> {
    let Some(stem) = path.file_stem() else {
        return Ok(None);
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name();
        let Some(original) = name.to_str().and_then(|n| n.strip_suffix(suffix)) else {
            continue;
        };
        if Path::new(original).file_stem() == Some(stem) {
            return Ok(Some(dir.join(&name)));
        }
    }
    Ok(None)
}

/// Stage 8: drop the superseded working file.
fn cleanup(working: &Path, output: &Path) -> std::io::Result<()> {
    if working != output && working.exists() {
        fs::remove_file(working)?;
        debug!(removed = %working.display(), "superseded file removed");
    }
    Ok(())
}

fn remove_leftover(temp: &Path) {
    if !temp.exists() {
        return;
    }
    match fs::remove_file(temp) {
        Ok(()) => debug!(removed = %temp.display(), "leftover intermediate removed"),
        Err(e) => warn!("Failed to remove leftover intermediate {}: {}", temp.display(), e),
    }
}
