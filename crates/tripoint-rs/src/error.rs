//! Tagged error kinds for the chat completions transport.
//!
//! Upstream failures carry a kind derived from the HTTP status code, so the
//! web layer maps them to its own status codes without sniffing message
//! text.

use thiserror::Error;

/// Failure modes of one chat completion call.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never produced a usable HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// Upstream rejected the API key (HTTP 401/403).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Upstream rate limit (HTTP 429).
    #[error("rate limit exceeded: {0}")]
    RateLimit(String),

    /// Any other non-success upstream status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not parse as a chat completion.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Classify a non-success HTTP status into an error kind.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ApiError::Auth(message),
            429 => ApiError::RateLimit(message),
            _ => ApiError::Api { status, message },
        }
    }
}
