//! Run configuration.
//!
//! Every tunable of an optimization run lives in [`OptimizeConfig`]. The
//! binary builds it from [`OptimizeConfig::default`] (optionally swapping the
//! source root) and passes it by reference into the walker and normalizer, so
//! tests can inject their own values instead of patching constants.
//!
//! ## Defaults
//!
//! ```text
//! source_root        = "src/assets"
//! max_dimension      = 1920            # longer edge, pixels
//! quality            = 85              # JPEG output quality (1-100)
//! excluded_dirs      = ["audio", "optimized"]
//! backup_suffix      = ".original"     # photo.jpg → photo.jpg.original
//! extensions         = ["jpg", "jpeg", "png", "heic", "cr3"]
//! exotic_extensions  = ["heic", "cr3"] # converted via the external tool first
//!
//! [converter]
//! program            = "magick"
//! quality            = 95              # intermediate JPEG quality
//! ```

use crate::imaging::Quality;
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration for one optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeConfig {
    /// Root directory to walk.
    pub source_root: PathBuf,
    /// Longest allowed edge in pixels. Larger images are scaled down to it.
    pub max_dimension: u32,
    /// Quality of the final JPEG encode.
    pub quality: Quality,
    /// Directory names that are never descended into (matched at any depth).
    pub excluded_dirs: BTreeSet<String>,
    /// Literal suffix appended to the full file name of a backup copy.
    pub backup_suffix: String,
    /// Lowercase extensions (without dot) the walker hands to the normalizer.
    pub extensions: BTreeSet<String>,
    /// Subset of `extensions` that must go through the external converter.
    pub exotic_extensions: BTreeSet<String>,
    /// External converter settings.
    pub converter: ConverterConfig,
}

/// External converter invocation: `<program> <input> -quality <quality> <output>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    pub program: String,
    pub quality: Quality,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: "magick".to_string(),
            quality: Quality::new(95),
        }
    }
}

fn string_set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("src/assets"),
            max_dimension: 1920,
            quality: Quality::new(85),
            excluded_dirs: string_set(&["audio", "optimized"]),
            backup_suffix: ".original".to_string(),
            extensions: string_set(&["jpg", "jpeg", "png", "heic", "cr3"]),
            exotic_extensions: string_set(&["heic", "cr3"]),
            converter: ConverterConfig::default(),
        }
    }
}

impl OptimizeConfig {
    /// Default configuration rooted at a different directory.
    pub fn with_source_root(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            ..Self::default()
        }
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_dimension == 0 {
            return Err(ConfigError::Validation(
                "max_dimension must be non-zero".into(),
            ));
        }
        let qualities = [
            ("quality", self.quality),
            ("converter.quality", self.converter.quality),
        ];
        for (name, quality) in qualities {
            if !(1..=100).contains(&quality.value()) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be 1-100, got {}",
                    quality.value()
                )));
            }
        }
        if self.backup_suffix.is_empty() {
            return Err(ConfigError::Validation(
                "backup_suffix must not be empty".into(),
            ));
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extensions must not be empty".into(),
            ));
        }
        for ext in self.extensions.iter().chain(&self.exotic_extensions) {
            if ext.starts_with('.') || ext.chars().any(|c| c.is_ascii_uppercase()) {
                return Err(ConfigError::Validation(format!(
                    "extension '{ext}' must be lowercase without a leading dot"
                )));
            }
        }
        if let Some(stray) = self
            .exotic_extensions
            .iter()
            .find(|ext| !self.extensions.contains(*ext))
        {
            return Err(ConfigError::Validation(format!(
                "exotic extension '{stray}' is not in extensions"
            )));
        }
        if self.converter.program.trim().is_empty() {
            return Err(ConfigError::Validation(
                "converter.program must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Whether a lowercase extension is handled at all.
    pub fn is_recognized(&self, ext: &str) -> bool {
        self.extensions.contains(ext)
    }

    /// Whether a lowercase extension needs the external converter.
    pub fn is_exotic(&self, ext: &str) -> bool {
        self.exotic_extensions.contains(ext)
    }
}
