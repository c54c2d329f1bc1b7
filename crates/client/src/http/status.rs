//! HTTP status classifier
//!
//! Pure, total mapping from a transport status code to the user-facing
//! message shown when a round-trip fails without a usable envelope.

use reqwest::StatusCode;

/// Human-readable message for a failed HTTP status.
///
/// Total over the standard status range: unknown codes fall through to a
/// generic message.
pub fn status_message(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "Request failed, please check your input",
        401 => "Session expired, please sign in again",
        403 => "You do not have permission to access this resource",
        404 => "The requested resource was not found",
        405 => "Request method not allowed",
        408 => "Request timed out, please try again later",
        500 => "Server error, please try again later",
        502 => "Bad gateway",
        503 => "Service unavailable, please try again later",
        504 => "Gateway timeout",
        _ => "Request failed, please try again later",
    }
}
