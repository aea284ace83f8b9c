//! Fluent note builders.

use std::ops::{Deref, DerefMut};

use tracing::debug;

use super::block::{Block, Document, ListItem};
use super::mark::{Mark, TextRun};
use super::wire::NoteRequest;
use crate::client::{PublishOptions, SubstackClient};
use crate::error::SubstackError;
use crate::transport::Transport;
use crate::types::PublishedNote;

/// Position of the block (or list item) that receives appended runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Paragraph(usize),
    List(usize),
    ListItem { block: usize, item: usize },
}

/// Builder for a rich-text note.
///
/// Blocks are opened with [`paragraph`](Self::paragraph),
/// [`bullet_list`](Self::bullet_list) and [`ordered_list`](Self::ordered_list).
/// Each returns a handle scoped to the new block. The builder also remembers
/// the most recently opened block, so runs can be appended through the
/// builder itself with [`text`](Self::text), [`bold`](Self::bold) and friends.
///
/// Convenience mark methods never combine: `bold("a")` followed by
/// `italic("b")` yields two runs with one mark each. Use
/// [`marked`](Self::marked) for a run with several marks.
///
/// Publishing consumes the builder. A failed publish cannot be retried with the
/// same builder; compose a new one.
///
/// # Example
///
/// ```
/// use substack_api::NoteBuilder;
///
/// let mut note = NoteBuilder::new();
/// note.paragraph().bold("test");
/// note.paragraph().code("another test").text(" ");
/// let mut list = note.ordered_list();
/// list.item().text("one");
/// list.item().italic("two");
///
/// assert_eq!(note.document().blocks().len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct NoteBuilder {
    document: Document,
    cursor: Option<Cursor>,
}

impl NoteBuilder {
    /// Create an empty note.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document composed so far.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consume the builder and return the composed document.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Open a new paragraph and make it current.
    pub fn paragraph(&mut self) -> RunsBuilder<'_> {
        let index = self.document.blocks.len();
        self.document
            .blocks
            .push(Block::Paragraph { runs: Vec::new() });
        self.cursor = Some(Cursor::Paragraph(index));

        match &mut self.document.blocks[index] {
            Block::Paragraph { runs } => RunsBuilder { runs },
            Block::List { .. } => unreachable!("paragraph was just pushed"),
        }
    }

    /// Open a new bullet list and make it current.
    pub fn bullet_list(&mut self) -> ListBuilder<'_> {
        self.open_list(false)
    }

    /// Open a new ordered list and make it current.
    pub fn ordered_list(&mut self) -> ListBuilder<'_> {
        self.open_list(true)
    }

    fn open_list(&mut self, ordered: bool) -> ListBuilder<'_> {
        let block = self.document.blocks.len();
        self.document.blocks.push(Block::List {
            ordered,
            items: Vec::new(),
        });
        self.cursor = Some(Cursor::List(block));

        match &mut self.document.blocks[block] {
            Block::List { items, .. } => ListBuilder {
                items,
                cursor: &mut self.cursor,
                block,
            },
            Block::Paragraph { .. } => unreachable!("list was just pushed"),
        }
    }

    /// Add an item to the current list and make it current.
    ///
    /// # Errors
    ///
    /// Returns [`SubstackError::InvalidState`] if the current block is not a list.
    pub fn item(&mut self) -> Result<RunsBuilder<'_>, SubstackError> {
        let block = match self.cursor {
            Some(Cursor::List(block) | Cursor::ListItem { block, .. }) => block,
            Some(Cursor::Paragraph(_)) | None => {
                return Err(SubstackError::invalid_state(
                    "item() requires an open list; call bullet_list() or ordered_list() first",
                ));
            }
        };

        match self.document.blocks.get_mut(block) {
            Some(Block::List { items, .. }) => Ok(push_item(items, &mut self.cursor, block)),
            _ => Err(SubstackError::invalid_state("current list no longer exists")),
        }
    }

    /// Append an unmarked run to the current block.
    ///
    /// Empty text is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SubstackError::InvalidState`] if no block is open, or the
    /// current list has no item yet.
    pub fn text(&mut self, text: impl Into<String>) -> Result<&mut Self, SubstackError> {
        self.append(TextRun::plain(text))
    }

    /// Append a bold run to the current block.
    ///
    /// # Errors
    ///
    /// See [`text`](Self::text).
    pub fn bold(&mut self, text: impl Into<String>) -> Result<&mut Self, SubstackError> {
        self.marked(text, [Mark::Bold])
    }

    /// Append an italic run to the current block.
    ///
    /// # Errors
    ///
    /// See [`text`](Self::text).
    pub fn italic(&mut self, text: impl Into<String>) -> Result<&mut Self, SubstackError> {
        self.marked(text, [Mark::Italic])
    }

    /// Append an inline code run to the current block.
    ///
    /// # Errors
    ///
    /// See [`text`](Self::text).
    pub fn code(&mut self, text: impl Into<String>) -> Result<&mut Self, SubstackError> {
        self.marked(text, [Mark::Code])
    }

    /// Append an underlined run to the current block.
    ///
    /// # Errors
    ///
    /// See [`text`](Self::text).
    pub fn underline(&mut self, text: impl Into<String>) -> Result<&mut Self, SubstackError> {
        self.marked(text, [Mark::Underline])
    }

    /// Append a run linking to `url`.
    ///
    /// # Errors
    ///
    /// See [`text`](Self::text).
    pub fn link(
        &mut self,
        text: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<&mut Self, SubstackError> {
        self.marked(text, [Mark::link(url)])
    }

    /// Append one run carrying all of `marks`.
    ///
    /// # Errors
    ///
    /// See [`text`](Self::text).
    pub fn marked(
        &mut self,
        text: impl Into<String>,
        marks: impl IntoIterator<Item = Mark>,
    ) -> Result<&mut Self, SubstackError> {
        self.append(TextRun::with_marks(text, marks))
    }

    /// Reference an existing attachment by id.
    pub fn attach(&mut self, attachment_id: impl Into<String>) -> &mut Self {
        self.document.attachment_ids.push(attachment_id.into());
        self
    }

    /// Serialize the note into a publish request without sending it.
    #[must_use]
    pub fn to_request(&self, options: &PublishOptions) -> NoteRequest {
        NoteRequest::new(&self.document, options)
    }

    /// Serialize and publish the note with a single POST.
    ///
    /// # Errors
    ///
    /// - [`SubstackError::InvalidState`] if the note has no blocks and no attachments
    /// - [`SubstackError::Validation`] if the response lacks `id` or `date`
    /// - HTTP errors from the transport, unmodified
    pub fn publish<T: Transport>(
        self,
        client: &SubstackClient<T>,
    ) -> Result<PublishedNote, SubstackError> {
        if self.document.is_empty() {
            return Err(SubstackError::invalid_state(
                "cannot publish a note with no content and no attachments",
            ));
        }
        let request = self.to_request(client.options());
        client.publish_note(&request)
    }

    fn append(&mut self, run: TextRun) -> Result<&mut Self, SubstackError> {
        let runs = self.current_runs()?;
        if !run.text().is_empty() {
            runs.push(run);
        }
        Ok(self)
    }

    fn current_runs(&mut self) -> Result<&mut Vec<TextRun>, SubstackError> {
        let cursor = self.cursor.ok_or_else(|| {
            SubstackError::invalid_state("no block is open; call paragraph() or a list method first")
        })?;

        let runs = match cursor {
            Cursor::Paragraph(block) => match self.document.blocks.get_mut(block) {
                Some(Block::Paragraph { runs }) => Some(runs),
                _ => None,
            },
            Cursor::ListItem { block, item } => match self.document.blocks.get_mut(block) {
                Some(Block::List { items, .. }) => items.get_mut(item).map(|item| &mut item.runs),
                _ => None,
            },
            Cursor::List(_) => {
                return Err(SubstackError::invalid_state(
                    "list has no items; call item() before appending text",
                ));
            }
        };

        runs.ok_or_else(|| SubstackError::invalid_state("current block no longer exists"))
    }
}

/// Handle for appending runs to one paragraph or list item.
///
/// Every method consumes and returns the handle so calls chain. Empty text is
/// ignored.
pub struct RunsBuilder<'a> {
    runs: &'a mut Vec<TextRun>,
}

#[allow(clippy::return_self_not_must_use)]
impl RunsBuilder<'_> {
    /// Append an unmarked run.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.push(TextRun::plain(text))
    }

    /// Append a bold run.
    pub fn bold(self, text: impl Into<String>) -> Self {
        self.marked(text, [Mark::Bold])
    }

    /// Append an italic run.
    pub fn italic(self, text: impl Into<String>) -> Self {
        self.marked(text, [Mark::Italic])
    }

    /// Append an inline code run.
    pub fn code(self, text: impl Into<String>) -> Self {
        self.marked(text, [Mark::Code])
    }

    /// Append an underlined run.
    pub fn underline(self, text: impl Into<String>) -> Self {
        self.marked(text, [Mark::Underline])
    }

    /// Append a run linking to `url`.
    pub fn link(self, text: impl Into<String>, url: impl Into<String>) -> Self {
        self.marked(text, [Mark::link(url)])
    }

    /// Append one run carrying all of `marks`.
    pub fn marked(self, text: impl Into<String>, marks: impl IntoIterator<Item = Mark>) -> Self {
        self.push(TextRun::with_marks(text, marks))
    }

    fn push(self, run: TextRun) -> Self {
        if !run.text().is_empty() {
            self.runs.push(run);
        }
        self
    }
}

/// Handle for adding items to one list.
pub struct ListBuilder<'a> {
    items: &'a mut Vec<ListItem>,
    cursor: &'a mut Option<Cursor>,
    block: usize,
}

impl ListBuilder<'_> {
    /// Add an item and make it current.
    pub fn item(&mut self) -> RunsBuilder<'_> {
        push_item(self.items, self.cursor, self.block)
    }
}

fn push_item<'a>(
    items: &'a mut Vec<ListItem>,
    cursor: &mut Option<Cursor>,
    block: usize,
) -> RunsBuilder<'a> {
    let item = items.len();
    items.push(ListItem::default());
    *cursor = Some(Cursor::ListItem { block, item });
    RunsBuilder {
        runs: &mut items[item].runs,
    }
}

/// Note builder that carries a link-preview attachment.
///
/// Composition works exactly like [`NoteBuilder`] (through `Deref`). On
/// [`publish`](Self::publish) the attachment is created first and its id is
/// embedded in the note. If attachment creation fails, no note is posted.
#[derive(Debug)]
pub struct NoteWithLinkBuilder {
    url: String,
    note: NoteBuilder,
}

impl NoteWithLinkBuilder {
    /// Create an empty note that will link to `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            note: NoteBuilder::new(),
        }
    }

    /// Wrap an already composed note.
    #[must_use]
    pub fn from_note(url: impl Into<String>, note: NoteBuilder) -> Self {
        Self {
            url: url.into(),
            note,
        }
    }

    /// URL of the link attachment.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Create the link attachment, then publish the note referencing it.
    ///
    /// # Errors
    ///
    /// - Remote errors from attachment creation (the note is not posted)
    /// - Any error from [`NoteBuilder::publish`]
    pub fn publish<T: Transport>(
        self,
        client: &SubstackClient<T>,
    ) -> Result<PublishedNote, SubstackError> {
        let Self { url, mut note } = self;
        let attachment_id = client.create_link_attachment(&url)?;
        debug!("Attaching link attachment {} to note", attachment_id);
        note.attach(attachment_id);
        note.publish(client)
    }
}

impl Deref for NoteWithLinkBuilder {
    type Target = NoteBuilder;

    fn deref(&self) -> &Self::Target {
        &self.note
    }
}

impl DerefMut for NoteWithLinkBuilder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.note
    }
}
