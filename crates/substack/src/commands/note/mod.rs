//! Note subcommand group.

mod publish;

use clap::Subcommand;

use publish::PublishArgs;

use crate::error::CliError;

/// Note commands.
#[derive(Subcommand)]
pub(crate) enum NoteCommand {
    /// Publish a note composed from a markdown file.
    Publish(PublishArgs),
}

impl NoteCommand {
    /// Execute the note subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the subcommand fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        match self {
            Self::Publish(args) => args.execute(),
        }
    }
}
