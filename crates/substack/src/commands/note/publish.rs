//! `substack note publish` command implementation.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use substack_api::notes::from_markdown;
use substack_api::types::PublishedNote;
use substack_api::{
    NoteBuilder, NoteWithLinkBuilder, PublishOptions, SubstackClient, SubstackError, Transport,
};
use substack_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the note publish command.
#[derive(Args)]
pub(crate) struct PublishArgs {
    /// Markdown file with the note text (`-` reads stdin).
    input: PathBuf,

    /// Attach a link preview for this URL.
    #[arg(short, long)]
    link: Option<String>,

    /// Print the request body instead of publishing.
    #[arg(long)]
    dry_run: bool,

    /// Path to configuration file (default: auto-discover substack.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API base URL (overrides config).
    #[arg(long, env = "SUBSTACK_API_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides config).
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Feed tab to post to (overrides config).
    #[arg(long)]
    tab_id: Option<String>,

    /// Posting surface (overrides config).
    #[arg(long)]
    surface: Option<String>,
}

impl PublishArgs {
    /// Execute the publish command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading, conversion or publishing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;

        let markdown = read_input(&self.input)?;
        let note = compose(&markdown, self.link.as_deref())?;

        if self.dry_run {
            let options = PublishOptions::from(&config.notes);
            let request = note.to_request(&options);
            output.highlight("[DRY RUN] Nothing published.");
            if let Some(url) = &self.link {
                output.info(&format!(
                    "A link attachment for {url} would be created first and its id added as attachmentIds."
                ));
            }
            output.data(&serde_json::to_string_pretty(&request)?);
            return Ok(());
        }

        let client = SubstackClient::from_config(&config.api, &config.notes);
        output.info(&format!("Publishing {}...", self.input.display()));
        let published = publish(&client, note, self.link.as_deref())?;
        print_published(&output, &published);

        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout,
            tab_id: self.tab_id.clone(),
            surface: self.surface.clone(),
        }
    }
}

/// Read markdown from a file, or stdin for `-`.
fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Convert markdown to a note, rejecting input that would publish nothing.
fn compose(markdown: &str, link: Option<&str>) -> Result<NoteBuilder, CliError> {
    let note = from_markdown(markdown)?;
    if note.document().blocks().is_empty() && link.is_none() {
        return Err(CliError::Validation(
            "note is empty; write some text or pass --link".to_owned(),
        ));
    }
    Ok(note)
}

fn publish<T: Transport>(
    client: &SubstackClient<T>,
    note: NoteBuilder,
    link: Option<&str>,
) -> Result<PublishedNote, SubstackError> {
    match link {
        Some(url) => NoteWithLinkBuilder::from_note(url, note).publish(client),
        None => note.publish(client),
    }
}

fn print_published(output: &Output, note: &PublishedNote) {
    output.success("\nNote published!");
    output.info(&format!("ID: {}", note.id));
    output.info(&format!("Date: {}", note.date));
    if let Some(attachments) = &note.attachments
        && !attachments.is_empty()
    {
        output.info(&format!("Attachments: {}", attachments.len()));
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use substack_api::{HttpMethod, MockTransport};

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: PublishArgs,
    }

    fn parse(argv: &[&str]) -> PublishArgs {
        TestCli::try_parse_from(std::iter::once("publish").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&[
            "note.md",
            "--timeout",
            "5",
            "--tab-id",
            "subscribed",
            "--surface",
            "profile",
        ]);

        let settings = args.cli_settings();

        assert_eq!(settings.timeout_secs, Some(5));
        assert_eq!(settings.tab_id.as_deref(), Some("subscribed"));
        assert_eq!(settings.surface.as_deref(), Some("profile"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("substack.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = 60\n\n[notes]\ntab_id = \"for-you\"\n").unwrap();

        let config = Config::load(Some(path.as_path()), Some(&settings)).unwrap();
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.notes.tab_id, "subscribed");
        assert_eq!(config.notes.surface, "profile");
    }

    #[test]
    fn test_no_flags_leave_settings_empty() {
        let settings = parse(&["-"]).cli_settings();

        assert_eq!(settings.timeout_secs, None);
        assert_eq!(settings.surface, None);
    }

    fn published() -> serde_json::Value {
        json!({"id": 3, "date": "2026-10-17T10:00:00.000Z"})
    }

    #[test]
    fn test_compose_rejects_empty_markdown_without_link() {
        let err = compose("\n\n", None).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[test]
    fn test_compose_allows_empty_markdown_with_link() {
        let note = compose("", Some("https://example.com")).unwrap();
        assert!(note.document().blocks().is_empty());
    }

    #[test]
    fn test_publish_plain_note() {
        let client = SubstackClient::new(
            MockTransport::new().with_json(HttpMethod::Post, "comment/feed", published()),
            PublishOptions::default(),
        );
        let note = compose("Hello **world**", None).unwrap();

        let result = publish(&client, note, None).unwrap();

        assert_eq!(result.id, 3);
        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].body.as_ref().unwrap()["bodyJson"]["content"][0]["content"],
            json!([
                {"type": "text", "text": "Hello "},
                {"type": "text", "text": "world", "marks": [{"type": "bold"}]}
            ])
        );
    }

    #[test]
    fn test_publish_with_link_creates_attachment_first() {
        let client = SubstackClient::new(
            MockTransport::new()
                .with_json(HttpMethod::Post, "comment/attachment", json!({"id": "a1"}))
                .with_json(HttpMethod::Post, "comment/feed", published()),
            PublishOptions::default(),
        );
        let note = compose("Worth a read", Some("https://example.com/p")).unwrap();

        publish(&client, note, Some("https://example.com/p")).unwrap();

        let calls = client.transport().calls();
        assert_eq!(calls[0].path, "comment/attachment");
        assert_eq!(calls[1].path, "comment/feed");
        assert_eq!(
            calls[1].body.as_ref().unwrap()["attachmentIds"],
            json!(["a1"])
        );
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.md");
        std::fs::write(&path, "- one\n- two\n").unwrap();

        assert_eq!(read_input(&path).unwrap(), "- one\n- two\n");
    }
}
