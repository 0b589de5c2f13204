//! # Image Utilities
//!
//! Two stateless image operations over files on disk:
//!
//! - **Thumbnail**: bound the longer side by a maximum size, preserving the
//!   aspect ratio, never upscaling.
//! - **Rotate**: rotate by any integer number of degrees about the image
//!   center, expanding the canvas so no corner is clipped.
//!
//! Each operation decodes the source (any format the `image` crate can read),
//! transforms it, encodes JPEG or PNG, and writes the result atomically.
//!
//! ```text
//! request → identify → plan geometry → decode → transform → encode → temp file → rename
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Geometry, codec, raster rotation, backend trait, and the two entry points |
//! | [`bridge`] | Translates name-keyed host method calls into entry-point calls |
//! | [`config`] | `config.toml` loading, validation, and merging over stock defaults |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Rounding Rule
//!
//! Thumbnail sides are rounded half away from zero; rotated canvas sides are
//! rounded up so corners are never clipped. Quarter turns are exact.
//!
//! ## No Partial Files
//!
//! Output is written to a temporary file beside the target and renamed into
//! place. Every failure before the rename leaves the target untouched.
//!
//! ## Errors Instead of Silent Success
//!
//! An unrecognized format code is an `EncodeError` and a non-positive maximum
//! size is an `InvalidArgument`; neither produces a file.
//!
//! # Concurrency
//!
//! Calls run synchronously to completion and hold no shared state. Callers may
//! run them on their own threads as long as concurrent calls use distinct
//! target paths.

pub mod bridge;
pub mod config;
pub mod imaging;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
