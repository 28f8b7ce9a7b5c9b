//! JSON serialization of forecast outputs.

use serde::Serialize;

/// Serialize a summary, result or plan to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (not expected for the crate's
/// output types).
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Serialize to a pretty-printed JSON string.
///
/// # Errors
///
/// As [`to_json`].
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
