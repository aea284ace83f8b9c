//! End-to-end note publishing against the mock transport.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use substack_api::{
    HttpMethod, MockTransport, NoteBuilder, NoteWithLinkBuilder, PublishOptions, SubstackClient,
    SubstackError,
};

const FEED: &str = "comment/feed";
const ATTACHMENT: &str = "comment/attachment";

fn published() -> Value {
    json!({
        "id": 4242,
        "date": "2026-10-17T09:30:00.000Z",
        "body": "test",
        "attachments": [],
        "user_id": 1,
        "reactions": {}
    })
}

fn client(transport: MockTransport) -> SubstackClient<MockTransport> {
    SubstackClient::new(transport, PublishOptions::default())
}

fn sent_body(client: &SubstackClient<MockTransport>) -> Value {
    let calls = client.transport().calls();
    let call = calls
        .iter()
        .find(|call| call.path == FEED)
        .expect("publish call recorded");
    call.body.clone().expect("publish body")
}

#[test]
fn test_four_paragraph_note() {
    let client = client(MockTransport::new().with_json(HttpMethod::Post, FEED, published()));

    let mut note = NoteBuilder::new();
    note.paragraph().bold("test");
    note.paragraph().italic("test1");
    note.paragraph().code("another test").text(" ");
    note.paragraph().text("just a test");
    let result = note.publish(&client).unwrap();

    assert_eq!(result.id, 4242);
    assert_eq!(result.date, "2026-10-17T09:30:00.000Z");
    assert_eq!(
        sent_body(&client),
        json!({
            "bodyJson": {
                "type": "doc",
                "attrs": {"schemaVersion": "v1"},
                "content": [
                    {
                        "type": "paragraph",
                        "content": [{"type": "text", "text": "test", "marks": [{"type": "bold"}]}]
                    },
                    {
                        "type": "paragraph",
                        "content": [{"type": "text", "text": "test1", "marks": [{"type": "italic"}]}]
                    },
                    {
                        "type": "paragraph",
                        "content": [
                            {"type": "text", "text": "another test", "marks": [{"type": "code"}]},
                            {"type": "text", "text": " "}
                        ]
                    },
                    {
                        "type": "paragraph",
                        "content": [{"type": "text", "text": "just a test"}]
                    }
                ]
            },
            "tabId": "for-you",
            "surface": "feed",
            "replyMinimumRole": "everyone"
        })
    );
}

#[test]
fn test_block_count_matches_paragraphs_and_lists() {
    let client = client(MockTransport::new().with_json(HttpMethod::Post, FEED, published()));

    let mut note = NoteBuilder::new();
    note.paragraph().text("intro");
    let mut list = note.bullet_list();
    list.item().text("a");
    list.item().text("b");
    note.paragraph().underline("middle");
    note.ordered_list().item().text("1");
    note.publish(&client).unwrap();

    let body = sent_body(&client);
    let content = body["bodyJson"]["content"].as_array().unwrap();
    assert_eq!(content.len(), 4);
    assert_eq!(content[1]["type"], "bulletList");
    assert_eq!(content[1]["content"].as_array().unwrap().len(), 2);
    assert_eq!(content[2]["content"][0]["marks"], json!([{"type": "underline"}]));
    assert_eq!(content[3]["type"], "orderedList");
}

#[test]
fn test_link_note_creates_attachment_before_publishing() {
    let transport = MockTransport::new()
        .with_json(HttpMethod::Post, ATTACHMENT, json!({"id": "att-77", "type": "link"}))
        .with_json(HttpMethod::Post, FEED, published());
    let client = client(transport);

    let mut note = NoteWithLinkBuilder::new("https://example.com/essay");
    note.paragraph()
        .text("Read ")
        .link("this", "https://example.com/essay");
    note.publish(&client).unwrap();

    let calls = client.transport().calls();
    let paths: Vec<&str> = calls.iter().map(|call| call.path.as_str()).collect();
    assert_eq!(paths, vec![ATTACHMENT, FEED]);
    assert_eq!(
        calls[0].body,
        Some(json!({"url": "https://example.com/essay", "type": "link"}))
    );

    let body = sent_body(&client);
    assert_eq!(body["attachmentIds"], json!(["att-77"]));
    assert_eq!(
        body["bodyJson"]["content"][0]["content"][1]["marks"],
        json!([{"type": "link", "attrs": {"href": "https://example.com/essay"}}])
    );
}

#[test]
fn test_link_note_with_only_attachment_is_publishable() {
    let transport = MockTransport::new()
        .with_json(HttpMethod::Post, ATTACHMENT, json!({"id": 31}))
        .with_json(HttpMethod::Post, FEED, published());
    let client = client(transport);

    NoteWithLinkBuilder::new("https://example.com")
        .publish(&client)
        .unwrap();

    let body = sent_body(&client);
    assert_eq!(body["attachmentIds"], json!(["31"]));
    assert_eq!(body["bodyJson"]["content"], json!([]));
}

#[test]
fn test_attachment_failure_never_publishes() {
    let transport = MockTransport::new()
        .with_status(HttpMethod::Post, ATTACHMENT, 500, "boom")
        .with_json(HttpMethod::Post, FEED, published());
    let client = client(transport);

    let mut note = NoteWithLinkBuilder::new("https://example.com");
    note.paragraph().text("never sent");
    let err = note.publish(&client).unwrap_err();

    assert!(err.is_remote());
    assert!(matches!(err, SubstackError::HttpResponse { status: 500, .. }));
    assert_eq!(client.transport().call_count(HttpMethod::Post, FEED), 0);
}

#[test]
fn test_attachment_without_id_never_publishes() {
    let transport = MockTransport::new()
        .with_json(HttpMethod::Post, ATTACHMENT, json!({"type": "link"}))
        .with_json(HttpMethod::Post, FEED, published());
    let client = client(transport);

    let mut note = NoteWithLinkBuilder::new("https://example.com");
    note.paragraph().text("never sent");
    let err = note.publish(&client).unwrap_err();

    assert!(err.is_remote());
    assert_eq!(client.transport().call_count(HttpMethod::Post, FEED), 0);
}

#[test]
fn test_response_missing_id_is_validation_error() {
    let client = client(MockTransport::new().with_json(
        HttpMethod::Post,
        FEED,
        json!({"date": "2026-10-17T09:30:00.000Z"}),
    ));

    let mut note = NoteBuilder::new();
    note.paragraph().text("x");
    let err = note.publish(&client).unwrap_err();

    assert!(matches!(err, SubstackError::Validation(_)));
}

#[test]
fn test_response_missing_date_is_validation_error() {
    let client = client(MockTransport::new().with_json(HttpMethod::Post, FEED, json!({"id": 1})));

    let mut note = NoteBuilder::new();
    note.paragraph().text("x");
    let err = note.publish(&client).unwrap_err();

    assert!(matches!(err, SubstackError::Validation(_)));
    assert!(!err.is_remote());
}

#[test]
fn test_publish_status_error_is_not_retried() {
    let client = client(MockTransport::new().with_status(HttpMethod::Post, FEED, 429, "slow down"));

    let mut note = NoteBuilder::new();
    note.paragraph().text("x");
    let err = note.publish(&client).unwrap_err();

    assert!(matches!(err, SubstackError::HttpResponse { status: 429, .. }));
    assert_eq!(client.transport().call_count(HttpMethod::Post, FEED), 1);
}

#[test]
fn test_empty_note_is_rejected_without_io() {
    let client = client(MockTransport::new().with_json(HttpMethod::Post, FEED, published()));

    let err = NoteBuilder::new().publish(&client).unwrap_err();

    assert!(matches!(err, SubstackError::InvalidState(_)));
    assert!(client.transport().calls().is_empty());
}

#[test]
fn test_custom_feed_placement() {
    let options = PublishOptions {
        tab_id: "following".to_owned(),
        surface: "profile".to_owned(),
    };
    let client = SubstackClient::new(
        MockTransport::new().with_json(HttpMethod::Post, FEED, published()),
        options,
    );

    let mut note = NoteBuilder::new();
    note.paragraph().text("x");
    note.publish(&client).unwrap();

    let body = sent_body(&client);
    assert_eq!(body["tabId"], "following");
    assert_eq!(body["surface"], "profile");
    assert!(body.get("attachmentIds").is_none());
}
