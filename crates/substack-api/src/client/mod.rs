//! Substack REST API client.
//!
//! Provides a sync client over a pluggable [`Transport`].

mod notes;

use std::time::Duration;

use substack_config::{ApiConfig, NotesConfig};

use crate::transport::{HttpTransport, Transport};

/// Default feed tab notes are posted to.
const DEFAULT_TAB_ID: &str = "for-you";

/// Default surface notes are posted from.
const DEFAULT_SURFACE: &str = "feed";

/// Feed placement sent with every published note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOptions {
    /// Feed tab (`tabId` on the wire).
    pub tab_id: String,
    /// Posting surface (`surface` on the wire).
    pub surface: String,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            tab_id: DEFAULT_TAB_ID.to_owned(),
            surface: DEFAULT_SURFACE.to_owned(),
        }
    }
}

impl From<&NotesConfig> for PublishOptions {
    fn from(config: &NotesConfig) -> Self {
        Self {
            tab_id: config.tab_id.clone(),
            surface: config.surface.clone(),
        }
    }
}

/// Substack REST API client.
pub struct SubstackClient<T = HttpTransport> {
    transport: T,
    options: PublishOptions,
}

impl SubstackClient<HttpTransport> {
    /// Create an HTTP client from config values.
    ///
    /// Headers from `[api.headers]` are forwarded on every request.
    #[must_use]
    pub fn from_config(api: &ApiConfig, notes: &NotesConfig) -> Self {
        let transport = api.headers.iter().fold(
            HttpTransport::new(&api.base_url, Duration::from_secs(api.timeout_secs)),
            |transport, (name, value)| transport.with_header(name, value),
        );
        Self::new(transport, PublishOptions::from(notes))
    }
}

impl<T: Transport> SubstackClient<T> {
    /// Create a client over an existing transport.
    #[must_use]
    pub fn new(transport: T, options: PublishOptions) -> Self {
        Self { transport, options }
    }

    /// Underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Feed placement used for published notes.
    #[must_use]
    pub fn options(&self) -> &PublishOptions {
        &self.options
    }
}
