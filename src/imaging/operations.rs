//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They validate the request, identify the source, plan parameters, and call
//! the backend. Both entry points are stateless and may be called in any order.

use super::backend::{Dimensions, ImageBackend, OperationError};
use super::calculations::{
    calculate_rotated_bounds, calculate_thumbnail_dimensions, normalize_degrees,
};
use super::params::{Filter, Format, Quality, RotateParams, ThumbnailParams};
use log::{debug, info, warn};
use std::path::PathBuf;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, OperationError>;

/// Request to write a thumbnail of `source` bounded by `max_size`.
///
/// `max_size` is signed so out-of-range values from loosely typed callers
/// reach validation instead of wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailRequest {
    pub source: PathBuf,
    pub target: PathBuf,
    pub max_size: i64,
    pub format: Format,
}

/// Request to write `source` rotated clockwise by `degrees`.
#[derive(Debug, Clone, PartialEq)]
pub struct RotateRequest {
    pub source: PathBuf,
    pub target: PathBuf,
    pub degrees: i64,
    pub format: Format,
}

/// What a successful operation produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub source: Dimensions,
    pub output: Dimensions,
    pub format: Format,
    pub target: PathBuf,
}

/// Configuration for thumbnail generation.
#[derive(Debug, Clone, Default)]
pub struct ThumbnailConfig {
    pub quality: Quality,
    pub filter: Filter,
}

/// Configuration for rotation.
#[derive(Debug, Clone, Default)]
pub struct RotateConfig {
    pub quality: Quality,
    pub background: [u8; 4],
}

fn validate_max_size(max_size: i64) -> Result<u32> {
    match u32::try_from(max_size) {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(OperationError::InvalidArgument(format!(
            "maxSize must be a positive integer, got {max_size}"
        ))),
    }
}

/// Plan a thumbnail operation without executing it.
///
/// Useful for testing parameter generation.
pub fn plan_thumbnail(
    request: &ThumbnailRequest,
    source: Dimensions,
    config: &ThumbnailConfig,
) -> Result<ThumbnailParams> {
    let max_size = validate_max_size(request.max_size)?;
    let (width, height) = calculate_thumbnail_dimensions(source.as_tuple(), max_size);

    Ok(ThumbnailParams {
        source: request.source.clone(),
        output: request.target.clone(),
        width,
        height,
        format: request.format,
        quality: config.quality,
        filter: config.filter,
    })
}

/// Plan a rotation without executing it.
pub fn plan_rotate(request: &RotateRequest, source: Dimensions, config: &RotateConfig) -> RotateParams {
    let (canvas_width, canvas_height) = calculate_rotated_bounds(source.as_tuple(), request.degrees);

    RotateParams {
        source: request.source.clone(),
        output: request.target.clone(),
        degrees: normalize_degrees(request.degrees),
        canvas_width,
        canvas_height,
        format: request.format,
        quality: config.quality,
        background: config.background,
    }
}

/// Write a thumbnail of the requested source.
///
/// The longer side is bounded by `max_size`; sources already within the bound
/// keep their size but are still resampled and re-encoded.
pub fn generate_thumbnail(
    backend: &impl ImageBackend,
    request: &ThumbnailRequest,
    config: &ThumbnailConfig,
) -> Result<Outcome> {
    // Reject bad arguments before touching the filesystem
    if let Err(e) = validate_max_size(request.max_size) {
        warn!("rejected thumbnail request for {}: {e}", request.source.display());
        return Err(e);
    }

    let source = backend.identify(&request.source)?;
    let params = plan_thumbnail(request, source, config)?;
    debug!(
        "thumbnail {}: {}x{} -> {}x{}",
        request.source.display(),
        source.width,
        source.height,
        params.width,
        params.height
    );

    let output = backend.thumbnail(&params)?;
    info!(
        "wrote {} thumbnail {}x{} to {}",
        request.format,
        output.width,
        output.height,
        request.target.display()
    );

    Ok(Outcome {
        source,
        output,
        format: request.format,
        target: request.target.clone(),
    })
}

/// Write the requested source rotated about its center onto a canvas large
/// enough that no corner is clipped.
pub fn rotate(
    backend: &impl ImageBackend,
    request: &RotateRequest,
    config: &RotateConfig,
) -> Result<Outcome> {
    let source = backend.identify(&request.source)?;
    let params = plan_rotate(request, source, config);
    debug!(
        "rotate {} by {} degrees: {}x{} -> canvas {}x{}",
        request.source.display(),
        params.degrees,
        source.width,
        source.height,
        params.canvas_width,
        params.canvas_height
    );

    let output = backend.rotate(&params)?;
    info!(
        "wrote {} rotation {}x{} to {}",
        request.format,
        output.width,
        output.height,
        request.target.display()
    );

    Ok(Outcome {
        source,
        output,
        format: request.format,
        target: request.target.clone(),
    })
}
