//! Recursive directory walk over the asset tree.
//!
//! Visits every file under the configured root, hands recognized images to
//! [`normalize_file`] one at a time and adds up the results. Progress goes out
//! as [`WalkEvent`]s on an optional channel; the binary prints them from a
//! separate thread.
//!
//! ## Traversal order
//!
//! Within a directory, files come before subdirectories and both are sorted
//! by name:
//!
//! ```text
//! assets/
//! ├── a.png          1
//! ├── z.jpg          2
//! ├── icons/         3  DirectoryStarted("icons")
//! │   └── star.png   4
//! └── audio/            never entered
//! ```
//!
//! Each directory's listing is read in full before any of its files are
//! processed, so outputs and backups written during the walk are not visited
//! again in the same run.
//!
//! ## Filtering
//!
//! - directories named in `excluded_dirs` are pruned at any depth below the root
//! - files ending in the backup suffix are skipped
//! - extensions are matched case-insensitively against the recognized set
//! - unreadable entries are logged and skipped

use crate::config::{ConfigError, OptimizeConfig};
use crate::imaging::{Converter, percent_reduction};
use crate::naming;
use crate::normalize::{NormalizeOutcome, normalize_file};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("Source directory not found: {0}")]
    RootNotFound(PathBuf),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Progress events emitted during a walk.
#[derive(Debug, Clone, PartialEq)]
pub enum WalkEvent {
    /// A directory below the root is about to be processed.
    DirectoryStarted { relative: PathBuf },
    /// A camera-format file is being handed to the external converter.
    ConversionStarted { path: PathBuf, extension: String },
    FileOptimized(NormalizeOutcome),
    FileFailed { path: PathBuf, error: String },
}

/// Totals for one run. Only successful files contribute bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
    pub processed: usize,
    pub failed: usize,
    pub original_bytes: u64,
    pub final_bytes: u64,
}

impl RunTotals {
    pub fn record_success(&mut self, outcome: &NormalizeOutcome) {
        self.processed += 1;
        self.original_bytes += outcome.original_bytes;
        self.final_bytes += outcome.final_bytes;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn reduction_percent(&self) -> f64 {
        percent_reduction(self.original_bytes, self.final_bytes)
    }
}

/// Walk `config.source_root` and normalize every recognized image.
///
/// Only a missing root or an invalid config fail the walk. Per-file errors
/// are counted in [`RunTotals::failed`] and reported as
/// [`WalkEvent::FileFailed`].
pub fn walk(
    config: &OptimizeConfig,
    converter: &impl Converter,
    events: Option<Sender<WalkEvent>>,
) -> Result<RunTotals, WalkError> {
    config.validate()?;

    let root = &config.source_root;
    if !root.is_dir() {
        return Err(WalkError::RootNotFound(root.clone()));
    }

    let mut totals = RunTotals::default();

    let walker = WalkDir::new(root)
        .sort_by(files_before_directories)
        .into_iter()
        .filter_entry(|entry| !is_excluded_dir(config, entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            if entry.depth() > 0 {
                let relative = entry
                    .path()
                    .strip_prefix(root)
                    .unwrap_or(entry.path())
                    .to_path_buf();
                emit(&events, WalkEvent::DirectoryStarted { relative });
            }
            continue;
        }

        let path = entry.path();
        let Some(extension) = candidate_extension(config, &entry) else {
            continue;
        };

        if config.is_exotic(&extension) {
            emit(
                &events,
                WalkEvent::ConversionStarted {
                    path: path.to_path_buf(),
                    extension: extension.clone(),
                },
            );
        }

        match normalize_file(config, converter, path) {
            Ok(outcome) => {
                totals.record_success(&outcome);
                emit(&events, WalkEvent::FileOptimized(outcome));
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "normalize failed");
                totals.record_failure();
                emit(
                    &events,
                    WalkEvent::FileFailed {
                        path: path.to_path_buf(),
                        error: e.to_string(),
                    },
                );
            }
        }
    }

    Ok(totals)
}

fn emit(events: &Option<Sender<WalkEvent>>, event: WalkEvent) {
    if let Some(tx) = events {
        tx.send(event).ok();
    }
}

fn files_before_directories(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn is_excluded_dir(config: &OptimizeConfig, entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| config.excluded_dirs.contains(name))
}

/// Lowercase extension of a file the normalizer should see, if any.
fn candidate_extension(config: &OptimizeConfig, entry: &DirEntry) -> Option<String> {
    let path: &Path = entry.path();
    if !path.is_file() {
        return None;
    }
    let name = entry.file_name().to_str()?;
    if naming::is_backup(name, &config.backup_suffix) {
        return None;
    }
    naming::lowercase_extension(path).filter(|ext| config.is_recognized(ext))
}
