//! Pipeline error taxonomy
//!
//! Every call settles with exactly one of these; the pipeline never panics
//! into the caller. Classification side effects (notifications, redirects,
//! session mutation) have already happened by the time the error is
//! returned.

use std::time::Duration;

use thiserror::Error;

/// Terminal outcomes of a failed or cancelled pipeline call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Server declared the session invalid (envelope code 401). Local
    /// session state has been cleared and the login redirect issued.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Permission denied (envelope code 403); no local state change.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Any other non-success envelope code. Surfaced without notification.
    #[error("api error {code}: {message}")]
    Api { code: i64, message: String },

    /// Transport round-trip completed with a non-2xx HTTP status.
    #[error("http status {status}: {message}")]
    Status { status: u16, message: String },

    /// The transport's own timeout elapsed before a response arrived.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// No response received (connection refused, reset, DNS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// Superseded by a newer request with the same pending key. A valid
    /// terminal state, not a fault.
    #[error("request cancelled")]
    Cancelled,

    /// Response body could not be decoded into the expected envelope.
    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether this call was superseded rather than failed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether the server declared the session invalid.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_not_an_auth_failure() {
        assert!(ApiError::Cancelled.is_cancelled());
        assert!(!ApiError::Cancelled.is_unauthorized());
        assert!(ApiError::Unauthorized("expired".into()).is_unauthorized());
    }

    #[test]
    fn display_carries_the_envelope_code() {
        let err = ApiError::Api { code: 500, message: "boom".into() };
        assert_eq!(err.to_string(), "api error 500: boom");
    }
}
