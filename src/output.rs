//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! ======================================================================
//! Optimizing images
//! ======================================================================
//! Max size:     1920px
//! JPEG quality: 85
//! Source:       src/assets
//! Formats:      CR3, HEIC, JPEG, JPG, PNG
//! ======================================================================
//! ✓ hero: 4000x3000 → 1920x1440, 5.21MB → 0.48MB (90.8% smaller)
//! ✓ logo: 512x512 (kept), 0.10MB → 0.03MB (70.0% smaller)
//!
//! gallery/
//!     HEIC → JPEG: IMG_0042.HEIC
//! ✓ IMG_0042: 4032x3024 → 1920x1440, 2.90MB → 0.51MB (82.4% smaller)
//! ✗ broken.png: Image processing failed: ...
//!
//! ======================================================================
//! Done
//! ======================================================================
//! Processed: 3
//! Failed:    1
//! Total:     8.21MB → 1.02MB
//! Saved:     7.19MB (87.6%)
//! ======================================================================
//!
//! Originals were kept with the '.original' suffix.
//! Delete them once you have checked the results.
//! ```
//!
//! # Architecture
//!
//! Each section has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::config::OptimizeConfig;
use crate::imaging::bytes_to_mb;
use crate::naming;
use crate::normalize::NormalizeOutcome;
use crate::walk::{RunTotals, WalkEvent};
use std::path::Path;

const RULE_WIDTH: usize = 70;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Optimized outputs are shown by stem, everything else by file name.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `"5.21MB → 0.48MB (90.8% smaller)"`
fn size_change(original_bytes: u64, final_bytes: u64, reduction: f64) -> String {
    format!(
        "{:.2}MB \u{2192} {:.2}MB ({:.1}% smaller)",
        bytes_to_mb(original_bytes),
        bytes_to_mb(final_bytes),
        reduction
    )
}

// ============================================================================
// Banner
// ============================================================================

/// Run header: limits, source directory and handled formats.
pub fn format_banner(config: &OptimizeConfig) -> Vec<String> {
    let formats: Vec<String> = config
        .extensions
        .iter()
        .map(|ext| ext.to_uppercase())
        .collect();

    vec![
        rule(),
        "Optimizing images".to_string(),
        rule(),
        format!("Max size:     {}px", config.max_dimension),
        format!("JPEG quality: {}", config.quality.value()),
        format!("Source:       {}", config.source_root.display()),
        format!("Formats:      {}", formats.join(", ")),
        rule(),
    ]
}

pub fn print_banner(config: &OptimizeConfig) {
    for line in format_banner(config) {
        println!("{}", line);
    }
}

// ============================================================================
// Progress events
// ============================================================================

fn format_outcome(outcome: &NormalizeOutcome) -> String {
    let name = file_stem(&outcome.output);
    let sizes = size_change(
        outcome.original_bytes,
        outcome.final_bytes,
        outcome.reduction_percent(),
    );
    if outcome.resized {
        format!(
            "\u{2713} {}: {} \u{2192} {}, {}",
            name, outcome.original_dimensions, outcome.final_dimensions, sizes
        )
    } else {
        format!(
            "\u{2713} {}: {} (kept), {}",
            name, outcome.original_dimensions, sizes
        )
    }
}

/// Format a single walk event as display lines.
pub fn format_event(event: &WalkEvent) -> Vec<String> {
    match event {
        WalkEvent::DirectoryStarted { relative } => {
            vec![String::new(), format!("{}/", relative.display())]
        }
        WalkEvent::ConversionStarted { path, extension } => {
            vec![format!(
                "    {} \u{2192} JPEG: {}",
                extension.to_uppercase(),
                naming::display_name(path)
            )]
        }
        WalkEvent::FileOptimized(outcome) => vec![format_outcome(outcome)],
        WalkEvent::FileFailed { path, error } => {
            vec![format!("\u{2717} {}: {}", naming::display_name(path), error)]
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Final totals plus a reminder about where the originals went.
pub fn format_summary(totals: &RunTotals, backup_suffix: &str) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        rule(),
        "Done".to_string(),
        rule(),
        format!("Processed: {}", totals.processed),
        format!("Failed:    {}", totals.failed),
        format!(
            "Total:     {:.2}MB \u{2192} {:.2}MB",
            bytes_to_mb(totals.original_bytes),
            bytes_to_mb(totals.final_bytes)
        ),
    ];

    if totals.original_bytes > 0 {
        let saved_mb = bytes_to_mb(totals.original_bytes) - bytes_to_mb(totals.final_bytes);
        lines.push(format!(
            "Saved:     {:.2}MB ({:.1}%)",
            saved_mb,
            totals.reduction_percent()
        ));
    }

    lines.push(rule());
    lines.push(String::new());
    lines.push(format!(
        "Originals were kept with the '{}' suffix.",
        backup_suffix
    ));
    lines.push("Delete them once you have checked the results.".to_string());
    lines
}

pub fn print_summary(totals: &RunTotals, backup_suffix: &str) {
    for line in format_summary(totals, backup_suffix) {
        println!("{}", line);
    }
}
