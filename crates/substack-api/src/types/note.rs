//! Note publish response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Note returned by the publish endpoint.
///
/// `id` and `date` are required. `body` and `attachments` are decoded when
/// present. Everything else in the response is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PublishedNote {
    /// Note ID.
    pub id: u64,
    /// Publication timestamp as sent by the server (ISO 8601).
    pub date: String,
    /// Plain-text rendering of the note body.
    #[serde(default)]
    pub body: Option<String>,
    /// Attachments as returned by the server, kept opaque.
    #[serde(default)]
    pub attachments: Option<Vec<Value>>,
}
