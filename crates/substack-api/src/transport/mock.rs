//! Mock transport implementation for testing.
//!
//! Provides [`MockTransport`] for unit testing without network access.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use serde_json::Value;

use super::Transport;
use crate::error::SubstackError;

/// HTTP method of a recorded call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

/// A request observed by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Request method.
    pub method: HttpMethod,
    /// Path relative to the API base URL, leading slash stripped.
    pub path: String,
    /// JSON body for POST/PUT requests.
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
enum MockResponse {
    Json(Value),
    Status { status: u16, body: String },
}

/// Mock transport for testing.
///
/// Responses are queued per method and path and consumed in order. The last
/// queued response for a route is reused once the queue drains to one entry.
/// Every request is recorded, including requests with no configured response
/// (those fail with a 404 [`SubstackError::HttpResponse`]).
///
/// # Example
///
/// ```ignore
/// use serde_json::json;
/// use substack_api::{HttpMethod, MockTransport, Transport};
///
/// let transport = MockTransport::new()
///     .with_json(HttpMethod::Post, "comment/attachment", json!({"id": "att-1"}));
///
/// let response = transport.post("comment/attachment", &json!({}))?;
/// assert_eq!(transport.call_count(HttpMethod::Post, "comment/attachment"), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: RwLock<HashMap<(HttpMethod, String), VecDeque<MockResponse>>>,
    calls: RwLock<Vec<RecordedCall>>,
}

impl MockTransport {
    /// Create a mock transport with no configured responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON response for a route.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_json(self, method: HttpMethod, path: &str, response: Value) -> Self {
        self.enqueue(method, path, MockResponse::Json(response));
        self
    }

    /// Queue an error status response for a route.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_status(
        self,
        method: HttpMethod,
        path: &str,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.enqueue(
            method,
            path,
            MockResponse::Status {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// All recorded calls in the order they were made.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of recorded calls for a route.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn call_count(&self, method: HttpMethod, path: &str) -> usize {
        let path = normalize(path);
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }

    fn enqueue(&self, method: HttpMethod, path: &str, response: MockResponse) {
        self.responses
            .write()
            .unwrap()
            .entry((method, normalize(path).to_owned()))
            .or_default()
            .push_back(response);
    }

    fn respond(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, SubstackError> {
        let path = normalize(path).to_owned();
        self.calls.write().unwrap().push(RecordedCall {
            method,
            path: path.clone(),
            body: body.cloned(),
        });

        let mut responses = self.responses.write().unwrap();
        let response = responses.get_mut(&(method, path.clone())).and_then(|queue| {
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        });

        match response {
            Some(MockResponse::Json(value)) => Ok(value),
            Some(MockResponse::Status { status, body }) => {
                Err(SubstackError::HttpResponse { status, body })
            }
            None => Err(SubstackError::HttpResponse {
                status: 404,
                body: format!("no mock response for {method:?} {path}"),
            }),
        }
    }
}

fn normalize(path: &str) -> &str {
    path.trim_start_matches('/')
}

impl Transport for MockTransport {
    fn get(&self, path: &str) -> Result<Value, SubstackError> {
        self.respond(HttpMethod::Get, path, None)
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value, SubstackError> {
        self.respond(HttpMethod::Post, path, Some(body))
    }

    fn put(&self, path: &str, body: &Value) -> Result<Value, SubstackError> {
        self.respond(HttpMethod::Put, path, Some(body))
    }
}
