//! CLI command implementations.

pub(crate) mod note;

pub(crate) use note::NoteCommand;
