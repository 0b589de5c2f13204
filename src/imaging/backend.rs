//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: identify, thumbnail, and rotate. Geometry is decided before the
//! backend is called, so a backend only executes fully planned parameters.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate.

use super::params::{RotateParams, ThumbnailParams};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OperationError {
    #[error("Source image not found: {path}: {source}")]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("Failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Stable discriminant of an [`OperationError`], suitable for wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SourceNotFound,
    Decode,
    Encode,
    FileWrite,
    InvalidArgument,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::SourceNotFound => "SourceNotFound",
            ErrorKind::Decode => "DecodeError",
            ErrorKind::Encode => "EncodeError",
            ErrorKind::FileWrite => "FileWriteError",
            ErrorKind::InvalidArgument => "InvalidArgument",
        }
    }
}

impl OperationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OperationError::SourceNotFound { .. } => ErrorKind::SourceNotFound,
            OperationError::Decode { .. } => ErrorKind::Decode,
            OperationError::Encode(_) => ErrorKind::Encode,
            OperationError::FileWrite { .. } => ErrorKind::FileWrite,
            OperationError::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Trait for image processing backends.
///
/// `thumbnail` and `rotate` decode the source, transform it, encode it, and
/// write the output. They return the dimensions of the image actually written.
pub trait ImageBackend: Sync {
    /// Get image dimensions without decoding pixel data.
    fn identify(&self, path: &Path) -> Result<Dimensions, OperationError>;

    /// Resample the source into the exact box given by the params.
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<Dimensions, OperationError>;

    /// Rotate the source about its center onto a canvas of the given size.
    fn rotate(&self, params: &RotateParams) -> Result<Dimensions, OperationError>;
}
