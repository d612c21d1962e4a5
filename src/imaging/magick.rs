//! ImageMagick-backed [`Converter`] for camera formats.
//!
//! Runs `<program> <input> -quality <q> <output>` and waits for it. The
//! program's stderr is captured and carried verbatim in the error so the
//! user sees exactly what ImageMagick complained about.

use super::backend::{ConvertError, Converter};
use super::params::Quality;
use std::path::Path;
use std::process::{Command, Stdio};

/// External converter driving the `magick` command-line tool.
pub struct MagickConverter {
    program: String,
}

impl MagickConverter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether the program can be started at all (`<program> -version`).
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

impl Default for MagickConverter {
    fn default() -> Self {
        Self::new("magick")
    }
}

impl Converter for MagickConverter {
    fn convert(&self, input: &Path, output: &Path, quality: Quality) -> Result<(), ConvertError> {
        tracing::debug!(
            program = %self.program,
            input = %input.display(),
            output = %output.display(),
            "running external converter"
        );

        let out = Command::new(&self.program)
            .arg(input)
            .arg("-quality")
            .arg(quality.value().to_string())
            .arg(output)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ConvertError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !out.status.success() {
            return Err(ConvertError::Failed {
                program: self.program.clone(),
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
