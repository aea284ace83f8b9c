//! HTTP transport abstraction.
//!
//! The client never talks to the network directly. Every request goes through a
//! [`Transport`], which maps a relative API path to a JSON response:
//!
//! - [`HttpTransport`]: `ureq` implementation used in production
//! - [`MockTransport`]: canned responses with call recording (behind `mock` feature)
//!
//! Transports report failures through a single error channel. Network failures
//! surface as [`SubstackError::HttpRequest`], non-success statuses as
//! [`SubstackError::HttpResponse`]. Transports never retry.

mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use http::HttpTransport;
#[cfg(any(test, feature = "mock"))]
pub use mock::{HttpMethod, MockTransport, RecordedCall};

use serde_json::Value;

use crate::error::SubstackError;

/// JSON-over-HTTP transport for the Substack API.
///
/// Paths are relative to the API base URL (e.g. `"comment/feed"`).
pub trait Transport: Send + Sync {
    /// Issue a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`SubstackError`] if the request fails or the server answers
    /// with a non-success status.
    fn get(&self, path: &str) -> Result<Value, SubstackError>;

    /// Issue a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`SubstackError`] if the request fails or the server answers
    /// with a non-success status.
    fn post(&self, path: &str, body: &Value) -> Result<Value, SubstackError>;

    /// Issue a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`SubstackError`] if the request fails or the server answers
    /// with a non-success status.
    fn put(&self, path: &str, body: &Value) -> Result<Value, SubstackError>;
}
