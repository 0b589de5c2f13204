//! Image processing — pure Rust, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Thumbnail** | `resize_exact` (Lanczos3 by default) |
//! | **Rotate** | quarter-turn remaps, bilinear inverse mapping otherwise |
//! | **Encode** | JPEG (quality 100 by default) or lossless PNG |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Codec / Raster**: decode, encode, atomic write, and pixel rotation
//! - **Operations**: High-level entry points combining calculations + backend

pub mod backend;
mod calculations;
pub mod codec;
pub mod operations;
mod params;
mod raster;
pub mod rust_backend;

pub use backend::{Dimensions, ErrorKind, ImageBackend, OperationError};
pub use calculations::{calculate_rotated_bounds, calculate_thumbnail_dimensions};
pub use operations::{
    Outcome, RotateConfig, RotateRequest, ThumbnailConfig, ThumbnailRequest, generate_thumbnail,
    rotate,
};
pub use params::{Filter, Format, Quality};
pub use rust_backend::RustBackend;
