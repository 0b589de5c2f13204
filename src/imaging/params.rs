//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which plans the geometry) and the [`backend`](super::backend) (which does
//! the actual pixel work). Keeping them separate lets the operations be tested
//! against a mock backend.
//!
//! ## Types
//!
//! - [`Format`] — Output encoding, `0 = JPEG`, `1 = PNG` on the wire.
//! - [`Quality`] — Lossy encoding quality (1–100, default 100). Clamped on construction.
//! - [`Filter`] — Resampling filter used when producing thumbnails.
//! - [`ThumbnailParams`] — Source, output, exact target box, format, quality, filter.
//! - [`RotateParams`] — Source, output, angle, canvas size, format, quality, background.

use super::backend::OperationError;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Output encoding for a written image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Jpeg,
    Png,
}

impl Format {
    /// Resolve a wire format code.
    ///
    /// Anything other than `0` or `1` is an encode error: there is no encoder
    /// that could produce the requested bytes.
    pub fn from_code(code: i64) -> Result<Self, OperationError> {
        match code {
            0 => Ok(Format::Jpeg),
            1 => Ok(Format::Png),
            other => Err(OperationError::Encode(format!(
                "unrecognized format code {other} (expected 0 for JPEG or 1 for PNG)"
            ))),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Format::Jpeg => 0,
            Format::Png => 1,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Jpeg => f.write_str("jpeg"),
            Format::Png => f.write_str("png"),
        }
    }
}

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(100)
    }
}

/// Resampling filter for thumbnail generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<Filter> for FilterType {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Nearest => FilterType::Nearest,
            Filter::Triangle => FilterType::Triangle,
            Filter::CatmullRom => FilterType::CatmullRom,
            Filter::Gaussian => FilterType::Gaussian,
            Filter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Parameters for a thumbnail operation (scale into an exact box).
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub format: Format,
    pub quality: Quality,
    pub filter: Filter,
}

/// Parameters for a rotation onto an expanded canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct RotateParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Clockwise, normalized to `0..360`.
    pub degrees: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub format: Format,
    pub quality: Quality,
    /// RGBA fill for canvas pixels not covered by the rotated source.
    pub background: [u8; 4],
}
