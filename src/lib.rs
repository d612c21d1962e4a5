//! # asset-squeeze
//!
//! Batch optimizer for the image assets of a web or mobile project. Point it
//! at an asset directory and every photo in it ends up as an upright,
//! size-capped, opaque JPEG, with the untouched original kept next to it.
//!
//! # Architecture: Walk, then Normalize
//!
//! ```text
//! walk        src/assets/  →  one normalize call per recognized image
//! normalize   photo.HEIC   →  photo.jpg + photo.HEIC.original
//! ```
//!
//! The walker owns traversal, filtering and run totals. The normalizer owns a
//! single file and runs it through a fixed sequence of stages:
//!
//! ```text
//! convert-if-needed → decode → reorient → resize → recolor → backup → encode → cleanup
//! ```
//!
//! Errors never cross the file boundary: a failed file is counted and the
//! walk goes on.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`walk`] | Recursive traversal, exclusion rules, progress events, run totals |
//! | [`normalize`] | Per-file pipeline from source image to optimized JPEG |
//! | [`imaging`] | Decode, orientation, resize, flatten, JPEG encode, external converter |
//! | [`naming`] | Backup, intermediate and output paths derived from a source path |
//! | [`config`] | [`OptimizeConfig`](config::OptimizeConfig) with defaults and validation |
//! | [`output`] | CLI output formatting for banner, progress and summary |
//!
//! # Design Decisions
//!
//! ## Backups Before Any Destructive Step
//!
//! Every original is copied byte-for-byte to `<name>.original` before it is
//! overwritten or deleted, and an existing backup is never replaced. Running
//! the tool twice therefore can't lose the real original: the first run's
//! backup stays the recovery path.
//!
//! ## In-Process Imaging, External Conversion Only Where Needed
//!
//! Decoding, resizing and encoding go through the `image` crate. HEIC and CR3
//! have no pure-Rust decoder in that stack, so those two are handed to
//! ImageMagick's `magick` once to produce a high-quality JPEG intermediate.
//! The hand-off sits behind the [`Converter`](imaging::Converter) trait, which
//! is what lets the test suite cover the camera-format path without
//! ImageMagick installed.
//!
//! ## Deterministic Order
//!
//! Siblings are visited sorted by name, files before subdirectories, so the
//! console output and any name collisions resolve the same way on every
//! machine.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod normalize;
pub mod output;
pub mod walk;

#[cfg(test)]
pub(crate) mod test_helpers;
