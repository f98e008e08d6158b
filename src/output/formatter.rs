//! Result printing and error envelopes.
//!
//! Stdout carries exactly one pretty-printed JSON document per result so the
//! CLI can be piped into `jq`. Human-facing status lines go to stderr.

use colored::Colorize;
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::ApiError;

/// Exit code for a non-2xx API response.
pub const EXIT_API_ERROR: u8 = 10;
/// Exit code for any other failure.
pub const EXIT_RUNTIME_ERROR: u8 = 11;

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("{}", format!("failed to encode output: {}", e).red()),
    }
}

/// Envelope printed when the server rejected a request.
pub fn api_error_envelope(status: u16, payload: &Value) -> Value {
    json!({"status": status, "error": payload})
}

/// Envelope printed for every other failure.
pub fn runtime_error_envelope(message: &str) -> Value {
    json!({"error": "CLI_RUNTIME_ERROR", "message": message})
}

/// Map a top-level error to its envelope and exit code.
///
/// An `ApiError::Status` anywhere in the context chain counts as an API error.
pub fn error_report(err: &anyhow::Error) -> (Value, u8) {
    let status = err.chain().find_map(|cause| match cause.downcast_ref::<ApiError>() {
        Some(ApiError::Status { status, payload }) => Some((*status, payload)),
        _ => None,
    });
    match status {
        Some((status, payload)) => (api_error_envelope(status, payload), EXIT_API_ERROR),
        None => (
            runtime_error_envelope(&format!("{:#}", err)),
            EXIT_RUNTIME_ERROR,
        ),
    }
}

/// Print a dimmed status line on stderr.
pub fn print_status(message: &str) {
    eprintln!("{}", message.dimmed());
}

/// Print a success line on stderr.
pub fn print_success(message: &str) {
    eprintln!("{}", message.green());
}

/// Print a warning line on stderr.
pub fn print_warning(message: &str) {
    eprintln!("{}", message.yellow());
}
