//! Substack API response types.
//!
//! Responses are decoded partially: each type declares only the fields the
//! client consumes, required fields are strict, and serde ignores everything
//! else. Upstream can add or reshape unrelated fields without breaking decoding.

mod attachment;
mod note;

pub use attachment::LinkAttachment;
pub use note::PublishedNote;

use serde::{Deserialize, Deserializer};

/// Deserialize an identifier sent either as a JSON string or a JSON number.
pub(crate) fn flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}
