//! Boolean literal parsing.
//!
//! Flag values come from environment variables, query parameters and headers.
//! All of them go through the same literal table. Anything outside the table
//! reads as `false`; it is never an error.

use flagwire_log::debug;

/// Parse a boolean literal.
///
/// `1 t T TRUE true True` are true, `0 f F FALSE false False` are false.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parse a boolean literal, reading unrecognized input as `false`.
pub fn lenient_bool(value: &str) -> bool {
    match parse_bool(value) {
        Some(enabled) => enabled,
        None => {
            debug!("unrecognized boolean {:?}, treating as false", value);
            false
        }
    }
}

/// Like [`lenient_bool`], except that an empty value means `true`.
///
/// Used for request values, where `?feature-x` with no value turns `x` on.
pub fn presence_bool(value: &str) -> bool {
    value.is_empty() || lenient_bool(value)
}
