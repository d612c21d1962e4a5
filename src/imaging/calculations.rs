//! Pure calculation functions for image dimensions and size reporting.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the downscaled dimensions for an image whose longer edge
/// exceeds `max_dimension`.
///
/// Returns `None` when the image already fits (longer edge ≤ max). Otherwise
/// both edges are multiplied by `max_dimension / longer_edge` and truncated,
/// never dropping below one pixel.
///
/// # Examples
/// ```
/// # use asset_squeeze::imaging::calculate_downscale_dimensions;
/// assert_eq!(calculate_downscale_dimensions((4000, 3000), 1920), Some((1920, 1440)));
/// assert_eq!(calculate_downscale_dimensions((1920, 1080), 1920), None);
/// ```
pub fn calculate_downscale_dimensions(original: (u32, u32), max_dimension: u32) -> Option<(u32, u32)> {
    let (w, h) = original;
    let longer_edge = w.max(h);
    if longer_edge <= max_dimension {
        return None;
    }

    let scale = max_dimension as f64 / longer_edge as f64;
    let new_w = ((w as f64 * scale) as u32).max(1);
    let new_h = ((h as f64 * scale) as u32).max(1);
    Some((new_w, new_h))
}

/// Percentage of bytes saved going from `before` to `after`.
///
/// Negative when the output grew. Zero when `before` is zero.
pub fn percent_reduction(before: u64, after: u64) -> f64 {
    if before == 0 {
        return 0.0;
    }
    (before as f64 - after as f64) / before as f64 * 100.0
}

/// Convert a byte count to mebibytes for display.
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}
