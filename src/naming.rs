//! Centralized path derivation for backups, conversions and outputs.
//!
//! Every file the optimizer writes is named from the file it came from:
//!
//! | From | To | Rule |
//! |---|---|---|
//! | `photo.png` | `photo.png.original` | backup: suffix appended to the full name |
//! | `IMG_01.HEIC` | `IMG_01.temp.jpg` | conversion: `.temp` marker + `.jpg` |
//! | `IMG_01.temp.jpg` | `IMG_01.jpg` | output: marker stripped |
//! | `photo.png` | `photo.jpg` | output: extension replaced |
//! | `photo.JPG` | `photo.JPG` | output: JPEG names are kept as they are |
//!
//! Keeping JPEG names untouched matters on case-insensitive file systems:
//! `photo.JPG` and `photo.jpg` are the same file there, and cleaning up the
//! "old" one would delete the freshly written output.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Marker inserted before the extension of a converter intermediate.
pub const TEMP_MARKER: &str = ".temp";

/// Extension of every optimized output.
pub const OUTPUT_EXTENSION: &str = "jpg";

/// Lowercased extension without the dot, if the path has one.
pub fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Backup location: `suffix` appended to the full file name.
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Whether a file name is a backup created with `suffix`.
pub fn is_backup(file_name: &str, suffix: &str) -> bool {
    file_name.ends_with(suffix)
}

/// Sibling path the external converter writes its JPEG to.
pub fn conversion_path(path: &Path) -> PathBuf {
    let mut name = path.file_stem().unwrap_or_default().to_os_string();
    name.push(TEMP_MARKER);
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    path.with_file_name(name)
}

/// Final JPEG location for a working file.
///
/// See the [module docs](self) for the rules.
pub fn output_path(working: &Path) -> PathBuf {
    let stem = working.file_stem().unwrap_or_default();

    if let Some(original_stem) = stem.to_str().and_then(|s| s.strip_suffix(TEMP_MARKER)) {
        return working.with_file_name(format!("{original_stem}.{OUTPUT_EXTENSION}"));
    }

    let is_jpg = working
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(OUTPUT_EXTENSION));
    if is_jpg {
        return working.to_path_buf();
    }

    working.with_extension(OUTPUT_EXTENSION)
}

/// File name for display, falling back to the whole path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
