//! Wire schema for the note publish request.
//!
//! ```json
//! {
//!   "bodyJson": {"type": "doc", "attrs": {"schemaVersion": "v1"}, "content": [...]},
//!   "tabId": "for-you",
//!   "surface": "feed",
//!   "replyMinimumRole": "everyone",
//!   "attachmentIds": ["..."]
//! }
//! ```
//!
//! A run without marks has no `marks` key at all; the endpoint rejects an
//! empty array. `attachmentIds` is likewise omitted when empty.

use serde::Serialize;

use super::block::{Block, Document, ListItem};
use super::mark::{Mark, TextRun};
use crate::client::PublishOptions;

/// Document schema version understood by the endpoint.
const SCHEMA_VERSION: &str = "v1";

/// Reply permission sent with every note.
const REPLY_MINIMUM_ROLE: &str = "everyone";

/// Publish request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRequest {
    pub body_json: DocNode,
    pub tab_id: String,
    pub surface: String,
    pub reply_minimum_role: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachment_ids: Vec<String>,
}

impl NoteRequest {
    /// Serialize a document with the given feed placement.
    #[must_use]
    pub fn new(document: &Document, options: &PublishOptions) -> Self {
        Self {
            body_json: DocNode::from(document),
            tab_id: options.tab_id.clone(),
            surface: options.surface.clone(),
            reply_minimum_role: REPLY_MINIMUM_ROLE,
            attachment_ids: document.attachment_ids.clone(),
        }
    }
}

/// Root document node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DocNode {
    Doc {
        attrs: DocAttrs,
        content: Vec<BlockNode>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocAttrs {
    pub schema_version: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockNode {
    Paragraph { content: Vec<InlineNode> },
    BulletList { content: Vec<ListItemNode> },
    OrderedList { content: Vec<ListItemNode> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ListItemNode {
    ListItem { content: Vec<BlockNode> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InlineNode {
    Text {
        text: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        marks: Vec<MarkNode>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MarkNode {
    Bold,
    Italic,
    Code,
    Underline,
    Link { attrs: LinkAttrs },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkAttrs {
    pub href: String,
}

impl From<&Document> for DocNode {
    fn from(document: &Document) -> Self {
        Self::Doc {
            attrs: DocAttrs {
                schema_version: SCHEMA_VERSION,
            },
            content: document.blocks.iter().map(BlockNode::from).collect(),
        }
    }
}

impl From<&Block> for BlockNode {
    fn from(block: &Block) -> Self {
        match block {
            Block::Paragraph { runs } => paragraph(runs),
            Block::List { ordered, items } => {
                let content = items.iter().map(ListItemNode::from).collect();
                if *ordered {
                    Self::OrderedList { content }
                } else {
                    Self::BulletList { content }
                }
            }
        }
    }
}

impl From<&ListItem> for ListItemNode {
    fn from(item: &ListItem) -> Self {
        Self::ListItem {
            content: vec![paragraph(&item.runs)],
        }
    }
}

impl From<&TextRun> for InlineNode {
    fn from(run: &TextRun) -> Self {
        Self::Text {
            text: run.text().to_owned(),
            marks: run.marks().iter().map(MarkNode::from).collect(),
        }
    }
}

impl From<&Mark> for MarkNode {
    fn from(mark: &Mark) -> Self {
        match mark {
            Mark::Bold => Self::Bold,
            Mark::Italic => Self::Italic,
            Mark::Code => Self::Code,
            Mark::Underline => Self::Underline,
            Mark::Link { href } => Self::Link {
                attrs: LinkAttrs { href: href.clone() },
            },
        }
    }
}

fn paragraph(runs: &[TextRun]) -> BlockNode {
    BlockNode::Paragraph {
        content: runs.iter().map(InlineNode::from).collect(),
    }
}
