//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure — no I/O, no side effects.
//!
//! ```text
//! Thumbnail 4000x2000 → 1024x512 (jpeg)
//!     Target: out/thumb.jpg
//! ```

use crate::bridge::MethodResponse;
use crate::imaging::{Dimensions, Outcome};

fn dims(d: Dimensions) -> String {
    format!("{}x{}", d.width, d.height)
}

fn format_outcome(label: &str, outcome: &Outcome) -> Vec<String> {
    vec![
        format!(
            "{label} {} → {} ({})",
            dims(outcome.source),
            dims(outcome.output),
            outcome.format
        ),
        format!("    Target: {}", outcome.target.display()),
    ]
}

pub fn format_thumbnail_output(outcome: &Outcome) -> Vec<String> {
    format_outcome("Thumbnail", outcome)
}

pub fn format_rotate_output(outcome: &Outcome, degrees: i64) -> Vec<String> {
    format_outcome(&format!("Rotate {degrees}°"), outcome)
}

/// Single-line JSON rendering of a bridge response.
pub fn format_response(response: &MethodResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| internal_error_json(&e.to_string()))
}

fn internal_error_json(message: &str) -> String {
    serde_json::json!({
        "status": "error",
        "code": "InternalError",
        "message": message,
    })
    .to_string()
}

pub fn print_thumbnail_output(outcome: &Outcome) {
    for line in format_thumbnail_output(outcome) {
        println!("{}", line);
    }
}

pub fn print_rotate_output(outcome: &Outcome, degrees: i64) {
    for line in format_rotate_output(outcome, degrees) {
        println!("{}", line);
    }
}
