//! Markdown import for notes.
//!
//! Maps a small markdown subset onto [`NoteBuilder`] calls:
//!
//! | Markdown                 | Note                                 |
//! |--------------------------|--------------------------------------|
//! | paragraph                | paragraph                            |
//! | `-` / `1.` list          | bullet / ordered list                |
//! | `**strong**`             | bold                                 |
//! | `*emphasis*`             | italic                               |
//! | `` `code` ``             | code                                 |
//! | `[text](url)`            | link                                 |
//! | heading                  | bold paragraph                       |
//! | fenced/indented code     | paragraph with code-marked text      |
//!
//! Nested formatting stacks marks on one run. Nested lists are flattened into
//! their outermost list. Breaks become a single space. HTML and rules are
//! dropped; everything else contributes its text.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use super::builder::NoteBuilder;
use super::mark::Mark;
use crate::error::SubstackError;

/// Build a note from markdown text.
///
/// # Errors
///
/// Returns [`SubstackError::InvalidState`] only if the parser emits events in
/// an order the note model cannot represent.
pub fn from_markdown(markdown: &str) -> Result<NoteBuilder, SubstackError> {
    let mut importer = MarkdownImporter::default();
    for event in Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH) {
        importer.event(event)?;
    }
    Ok(importer.note)
}

#[derive(Default)]
struct MarkdownImporter {
    note: NoteBuilder,
    /// Marks from enclosing inline tags, outermost first.
    marks: Vec<Mark>,
    list_depth: usize,
    /// Whether runs currently have a target block.
    block_open: bool,
}

impl MarkdownImporter {
    fn event(&mut self, event: Event<'_>) -> Result<(), SubstackError> {
        match event {
            Event::Start(tag) => self.start_tag(tag)?,
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.append(&text, None)?,
            Event::Code(code) => self.append(&code, Some(Mark::Code))?,
            Event::SoftBreak | Event::HardBreak => self.append(" ", None)?,
            Event::Html(_)
            | Event::InlineHtml(_)
            | Event::Rule
            | Event::FootnoteReference(_)
            | Event::TaskListMarker(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_) => {}
        }
        Ok(())
    }

    fn start_tag(&mut self, tag: Tag<'_>) -> Result<(), SubstackError> {
        match tag {
            Tag::Paragraph => {
                // Paragraphs inside list items share the item's run target
                if self.list_depth == 0 {
                    self.open_paragraph();
                }
            }
            Tag::Heading { .. } => {
                if self.list_depth == 0 {
                    self.open_paragraph();
                }
                self.marks.push(Mark::Bold);
            }
            Tag::CodeBlock(_) => {
                if self.list_depth == 0 {
                    self.open_paragraph();
                }
                self.marks.push(Mark::Code);
            }
            Tag::List(start) => {
                if self.list_depth == 0 {
                    if start.is_some() {
                        self.note.ordered_list();
                    } else {
                        self.note.bullet_list();
                    }
                    self.block_open = false;
                }
                self.list_depth += 1;
            }
            Tag::Item => {
                self.note.item()?;
                self.block_open = true;
            }
            Tag::Emphasis => self.marks.push(Mark::Italic),
            Tag::Strong => self.marks.push(Mark::Bold),
            Tag::Link { dest_url, .. } => self.marks.push(Mark::link(dest_url.into_string())),
            _ => {}
        }
        Ok(())
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.list_depth == 0 {
                    self.block_open = false;
                }
            }
            TagEnd::Heading(_) | TagEnd::CodeBlock => {
                self.marks.pop();
                if self.list_depth == 0 {
                    self.block_open = false;
                }
            }
            TagEnd::List(_) => {
                self.list_depth = self.list_depth.saturating_sub(1);
                if self.list_depth == 0 {
                    self.block_open = false;
                }
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Link => {
                self.marks.pop();
            }
            _ => {}
        }
    }

    fn open_paragraph(&mut self) {
        self.note.paragraph();
        self.block_open = true;
    }

    fn append(&mut self, text: &str, extra: Option<Mark>) -> Result<(), SubstackError> {
        let text = if self.marks.contains(&Mark::Code) {
            text.trim_end_matches('\n')
        } else {
            text
        };
        if text.is_empty() {
            return Ok(());
        }
        if !self.block_open {
            self.open_paragraph();
        }
        let marks = self.marks.iter().cloned().chain(extra);
        self.note.marked(text, marks)?;
        Ok(())
    }
}
