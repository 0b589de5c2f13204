//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG, PNG, TIFF, WebP, GIF, BMP) | `image` crate, format guessed from content |
//! | Thumbnail | `image::DynamicImage::resize_exact` |
//! | Rotate (quarter turns) | `DynamicImage::rotate90/180/270` |
//! | Rotate (any angle) | inverse-mapped bilinear sampling, see [`raster`](super::raster) |
//! | Encode → JPEG / PNG | `image::codecs::{jpeg, png}` |
//! | Write | `tempfile` + rename, see [`codec`](super::codec) |

use super::backend::{Dimensions, ImageBackend, OperationError};
use super::codec;
use super::params::{RotateParams, ThumbnailParams};
use super::raster::rotate_onto_canvas;
use image::{DynamicImage, Rgba};
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn dimensions_of(img: &DynamicImage) -> Dimensions {
    Dimensions {
        width: img.width(),
        height: img.height(),
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, OperationError> {
        codec::identify(path)
    }

    fn thumbnail(&self, params: &ThumbnailParams) -> Result<Dimensions, OperationError> {
        let img = codec::decode(&params.source)?;

        // The planned box already carries the source aspect, so scale straight
        // into it. The image is always decoded and re-encoded, even when the
        // box equals the source size.
        let thumb = img.resize_exact(params.width, params.height, params.filter.into());

        let bytes = codec::encode(&thumb, params.format, params.quality)?;
        codec::write_file(&bytes, &params.output)?;
        Ok(dimensions_of(&thumb))
    }

    fn rotate(&self, params: &RotateParams) -> Result<Dimensions, OperationError> {
        let img = codec::decode(&params.source)?;

        let rotated = rotate_onto_canvas(
            &img,
            params.degrees,
            (params.canvas_width, params.canvas_height),
            Rgba(params.background),
        );

        let bytes = codec::encode(&rotated, params.format, params.quality)?;
        codec::write_file(&bytes, &params.output)?;
        Ok(dimensions_of(&rotated))
    }
}
