//! Domain errors for the gmdesk data layer.

use thiserror::Error;

/// Errors surfaced by the data layer.
///
/// The taxonomy distinguishes transport failures (no usable response
/// reached), application failures (a response reached but its envelope
/// carried a non-zero code), and decode failures (a response reached but
/// its body did not match the expected shape). The read path collapses all
/// of these into an empty page before they reach the rendering layer; the
/// write path propagates them.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response reached the client: connection, timeout, or a non-2xx
    /// HTTP status with no parseable envelope.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The backend answered with a failure envelope.
    #[error("Backend rejected the call (code {code}): {msg}")]
    Api { code: i64, msg: String },

    /// The response body could not be decoded into the expected shape.
    #[error("Response decode failed: {0}")]
    Decode(String),

    /// HTTP 401: the session token is no longer valid. Session teardown
    /// and navigation back to login belong to the embedding UI.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl ApiError {
    /// Build an application failure from an envelope code and optional
    /// backend message, with a caller-supplied fallback for empty messages.
    pub fn from_envelope(code: i64, msg: Option<String>, fallback: &str) -> Self {
        let msg = match msg {
            Some(m) if !m.is_empty() => m,
            _ => fallback.to_string(),
        };
        ApiError::Api { code, msg }
    }

    /// The human-readable message to surface in a failure notification.
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Api { msg, .. } | ApiError::Unauthorized(msg) => msg,
            ApiError::Transport(_) | ApiError::Decode(_) => "request failed",
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
