//! Block-level document model.

use super::mark::TextRun;

/// Top-level structural unit of a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph { runs: Vec<TextRun> },
    List { ordered: bool, items: Vec<ListItem> },
}

/// Single-paragraph list entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem {
    pub runs: Vec<TextRun>,
}

/// Note document: ordered blocks plus attachment references.
///
/// Block order is call order and is preserved into the wire payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub(crate) blocks: Vec<Block>,
    pub(crate) attachment_ids: Vec<String>,
}

impl Document {
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn attachment_ids(&self) -> &[String] {
        &self.attachment_ids
    }

    /// A document with no blocks and no attachments cannot be published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.attachment_ids.is_empty()
    }
}
