//! Error types for the Substack client.

/// Error from note composition or Substack API operations.
#[derive(Debug, thiserror::Error)]
pub enum SubstackError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Server answered with a success status but an unusable body.
    #[error("unexpected response from {endpoint}: {message}")]
    UnexpectedResponse {
        /// Endpoint path that produced the response.
        endpoint: String,
        /// What was wrong with the response.
        message: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// Builder used out of sequence (e.g. text before any block is open).
    #[error("invalid note state: {0}")]
    InvalidState(String),

    /// Decoded response is missing required fields.
    #[error("invalid response: {0}")]
    Validation(String),
}

impl SubstackError {
    /// Whether the error was reported by the remote side or the HTTP layer.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::HttpRequest(_) | Self::HttpResponse { .. } | Self::UnexpectedResponse { .. }
        )
    }

    pub(crate) fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }
}
