//! Note composition.
//!
//! A note is a small rich-text document: an ordered sequence of blocks
//! (paragraphs and lists), each holding runs of text with formatting marks.
//! [`NoteBuilder`] assembles the document, [`wire`] turns it into the JSON the
//! publish endpoint expects, and [`from_markdown`] imports a markdown subset.

mod block;
mod builder;
mod mark;
mod markdown;
pub mod wire;

pub use block::{Block, Document, ListItem};
pub use builder::{ListBuilder, NoteBuilder, NoteWithLinkBuilder, RunsBuilder};
pub use mark::{Mark, TextRun};
pub use markdown::from_markdown;
pub use wire::NoteRequest;
