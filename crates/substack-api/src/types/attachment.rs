//! Attachment types.

use serde::Deserialize;

/// Link-preview attachment created server-side.
///
/// Only includes `id` since that is all a note needs to reference it.
/// Serde ignores the preview metadata (title, image, description) the API
/// also returns.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkAttachment {
    /// Attachment ID, normalized to a string.
    #[serde(deserialize_with = "super::flexible_id")]
    pub id: String,
}
