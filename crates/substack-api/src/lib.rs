//! Typed client for the Substack notes API.
//!
//! This crate provides:
//! - [`NoteBuilder`]: fluent composition of rich-text notes (paragraphs, lists, marks)
//! - [`NoteWithLinkBuilder`]: notes carrying a link-preview attachment
//! - [`SubstackClient`]: attachment creation and note publishing over a [`Transport`]
//!
//! # Composing and publishing a note
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::time::Duration;
//! use substack_api::{HttpTransport, NoteBuilder, PublishOptions, SubstackClient};
//!
//! let transport = HttpTransport::new("https://substack.com/api/v1", Duration::from_secs(30));
//! let client = SubstackClient::new(transport, PublishOptions::default());
//!
//! let mut note = NoteBuilder::new();
//! note.paragraph().bold("Release day").text(" is here.");
//! let mut list = note.bullet_list();
//! list.item().text("faster builds");
//! list.item().code("--dry-run").text(" flag");
//!
//! let published = note.publish(&client)?;
//! println!("published note {} at {}", published.id, published.date);
//! # Ok(())
//! # }
//! ```

// API client
mod client;
pub use client::{PublishOptions, SubstackClient};

// HTTP transport
mod transport;
#[cfg(feature = "mock")]
pub use transport::{HttpMethod, MockTransport, RecordedCall};
pub use transport::{HttpTransport, Transport};

// Response types
pub mod types;

// Note composition
pub mod notes;
pub use notes::{NoteBuilder, NoteWithLinkBuilder};

// Errors
pub mod error;
pub use error::SubstackError;
