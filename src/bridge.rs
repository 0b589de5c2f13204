//! Method-call adapter for host runtimes.
//!
//! Hosts that talk over a message channel send calls shaped like
//!
//! ```json
//! { "method": "generateThumbnail",
//!   "arguments": { "imagePath": "in.jpg", "targetPath": "out.jpg", "maxSize": 256, "format": 0 } }
//! ```
//!
//! and expect a response of `success`, `error` (with a code and message), or
//! `notImplemented` for unknown method names. This module only translates:
//! all image work happens in [`imaging`](crate::imaging).

use crate::config::Config;
use crate::imaging::{
    self, Format, ImageBackend, OperationError, RotateRequest, ThumbnailRequest,
};
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const GENERATE_THUMBNAIL: &str = "generateThumbnail";
pub const ROTATE: &str = "rotate";

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Malformed method call: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single name-keyed call from the host.
#[derive(Debug, Clone, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Reply sent back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MethodResponse {
    Success,
    Error { code: String, message: String },
    NotImplemented,
}

impl MethodResponse {
    fn error(code: &str, message: impl Into<String>) -> Self {
        MethodResponse::Error {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

impl From<OperationError> for MethodResponse {
    fn from(err: OperationError) -> Self {
        MethodResponse::error(err.kind().code(), err.to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThumbnailArgs {
    image_path: PathBuf,
    target_path: PathBuf,
    max_size: i64,
    format: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RotateArgs {
    image_path: PathBuf,
    target_path: PathBuf,
    degrees: i64,
    format: i64,
}

/// Parse a JSON-encoded [`MethodCall`].
pub fn parse_call(json: &str) -> Result<MethodCall, BridgeError> {
    Ok(serde_json::from_str(json)?)
}

fn parse_args<T: DeserializeOwned>(call: &MethodCall) -> Result<T, MethodResponse> {
    serde_json::from_value(call.arguments.clone()).map_err(|e| {
        MethodResponse::error(
            "InvalidArgument",
            format!("invalid arguments for {}: {e}", call.method),
        )
    })
}

/// Dispatch a call to the matching operation and report the result.
pub fn handle(backend: &impl ImageBackend, config: &Config, call: &MethodCall) -> MethodResponse {
    let result = match call.method.as_str() {
        GENERATE_THUMBNAIL => generate_thumbnail(backend, config, call),
        ROTATE => rotate(backend, config, call),
        other => {
            warn!("method not implemented: {other}");
            return MethodResponse::NotImplemented;
        }
    };

    match result {
        Ok(()) => MethodResponse::Success,
        Err(response) => response,
    }
}

fn generate_thumbnail(
    backend: &impl ImageBackend,
    config: &Config,
    call: &MethodCall,
) -> Result<(), MethodResponse> {
    let args: ThumbnailArgs = parse_args(call)?;
    let request = ThumbnailRequest {
        source: args.image_path,
        target: args.target_path,
        max_size: args.max_size,
        format: Format::from_code(args.format)?,
    };
    imaging::generate_thumbnail(backend, &request, &config.thumbnail_config())?;
    Ok(())
}

fn rotate(backend: &impl ImageBackend, config: &Config, call: &MethodCall) -> Result<(), MethodResponse> {
    let args: RotateArgs = parse_args(call)?;
    let request = RotateRequest {
        source: args.image_path,
        target: args.target_path,
        degrees: args.degrees,
        format: Format::from_code(args.format)?,
    };
    imaging::rotate(backend, &request, &config.rotate_config())?;
    Ok(())
}
