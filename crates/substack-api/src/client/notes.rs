//! Note operations for Substack API.

use serde_json::json;
use tracing::info;

use super::SubstackClient;
use crate::error::SubstackError;
use crate::notes::NoteRequest;
use crate::transport::Transport;
use crate::types::{LinkAttachment, PublishedNote};

/// Endpoint creating link-preview attachments.
const ATTACHMENT_PATH: &str = "comment/attachment";

/// Endpoint publishing notes.
const NOTE_FEED_PATH: &str = "comment/feed";

impl<T: Transport> SubstackClient<T> {
    /// Create a link-preview attachment for `url` and return its id.
    ///
    /// # Errors
    ///
    /// Returns an HTTP error on failure, or
    /// [`SubstackError::UnexpectedResponse`] if the response has no `id`.
    pub fn create_link_attachment(&self, url: &str) -> Result<String, SubstackError> {
        info!("Creating link attachment for {}", url);

        let response = self
            .transport
            .post(ATTACHMENT_PATH, &json!({"url": url, "type": "link"}))?;

        let attachment: LinkAttachment =
            serde_json::from_value(response).map_err(|e| SubstackError::UnexpectedResponse {
                endpoint: ATTACHMENT_PATH.to_owned(),
                message: e.to_string(),
            })?;

        info!("Created link attachment {}", attachment.id);
        Ok(attachment.id)
    }

    /// Publish a serialized note.
    ///
    /// # Errors
    ///
    /// Returns an HTTP error on failure, or [`SubstackError::Validation`] if
    /// the response lacks `id` or `date`.
    pub fn publish_note(&self, request: &NoteRequest) -> Result<PublishedNote, SubstackError> {
        let body = serde_json::to_value(request)?;

        info!(
            "Publishing note ({} attachment(s)) to tab '{}'",
            request.attachment_ids.len(),
            request.tab_id
        );

        let response = self.transport.post(NOTE_FEED_PATH, &body)?;

        let note: PublishedNote = serde_json::from_value(response)
            .map_err(|e| SubstackError::Validation(format!("note publish response: {e}")))?;

        info!("Published note {} at {}", note.id, note.date);
        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::client::PublishOptions;
    use crate::transport::{HttpMethod, MockTransport};

    #[test]
    fn test_create_link_attachment_sends_url_and_type() {
        let transport = MockTransport::new().with_json(
            HttpMethod::Post,
            ATTACHMENT_PATH,
            json!({"id": "att-9", "type": "link", "linkMetadata": {}}),
        );
        let client = SubstackClient::new(transport, PublishOptions::default());

        let id = client
            .create_link_attachment("https://example.com/post")
            .unwrap();

        assert_eq!(id, "att-9");
        assert_eq!(
            client.transport().calls()[0].body,
            Some(json!({"url": "https://example.com/post", "type": "link"}))
        );
    }

    #[test]
    fn test_create_link_attachment_without_id_is_remote_error() {
        let transport =
            MockTransport::new().with_json(HttpMethod::Post, ATTACHMENT_PATH, json!({"ok": true}));
        let client = SubstackClient::new(transport, PublishOptions::default());

        let err = client
            .create_link_attachment("https://example.com")
            .unwrap_err();

        assert!(err.is_remote());
        assert!(matches!(err, SubstackError::UnexpectedResponse { .. }));
    }

    #[test]
    fn test_publish_note_rejects_response_without_date() {
        let transport =
            MockTransport::new().with_json(HttpMethod::Post, NOTE_FEED_PATH, json!({"id": 5}));
        let client = SubstackClient::new(transport, PublishOptions::default());

        let mut note = crate::NoteBuilder::new();
        note.paragraph().text("hi");
        let err = client
            .publish_note(&note.to_request(client.options()))
            .unwrap_err();

        assert!(matches!(err, SubstackError::Validation(_)));
    }
}
