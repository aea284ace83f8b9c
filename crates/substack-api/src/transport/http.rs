//! `ureq`-backed transport.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;
use ureq::http::Response;
use ureq::typestate::WithBody;
use ureq::{Agent, Body, RequestBuilder};

use super::Transport;
use crate::error::SubstackError;

/// Blocking HTTP transport for the Substack API.
///
/// Sends JSON, expects JSON back. Static headers (for example a cookie supplied
/// by the environment) are attached to every request verbatim.
pub struct HttpTransport {
    agent: Agent,
    base_url: String,
    headers: Vec<(String, String)>,
}

impl HttpTransport {
    /// Create a transport for the given API base URL.
    ///
    /// `timeout` bounds each request end to end.
    #[must_use]
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            headers: Vec::new(),
        }
    }

    /// Attach a static header to every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Get the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn with_headers<B>(&self, mut request: RequestBuilder<B>) -> RequestBuilder<B> {
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request.header("Accept", "application/json")
    }

    fn send_json(
        &self,
        request: RequestBuilder<WithBody>,
        body: &Value,
    ) -> Result<Value, SubstackError> {
        let payload = serde_json::to_vec(body)?;
        let response = self
            .with_headers(request)
            .header("Content-Type", "application/json")
            .send(&payload[..])?;
        read_json_response(response)
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str) -> Result<Value, SubstackError> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self.with_headers(self.agent.get(&url)).call()?;
        read_json_response(response)
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value, SubstackError> {
        let url = self.url(path);
        debug!("POST {}", url);

        self.send_json(self.agent.post(&url), body)
    }

    fn put(&self, path: &str, body: &Value) -> Result<Value, SubstackError> {
        let url = self.url(path);
        debug!("PUT {}", url);

        self.send_json(self.agent.put(&url), body)
    }
}

/// Map status >= 400 to [`SubstackError::HttpResponse`], otherwise parse the body.
///
/// An empty success body decodes as `null`.
fn read_json_response(response: Response<Body>) -> Result<Value, SubstackError> {
    let status = response.status().as_u16();
    let mut body_reader = response.into_body();

    if status >= 400 {
        let error_body = body_reader
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(SubstackError::HttpResponse {
            status,
            body: error_body,
        });
    }

    let text = body_reader.read_to_string()?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}
