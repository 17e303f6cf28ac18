//! `wikembed check` command implementation.

use std::path::PathBuf;

use clap::Args;
use wikembed_core::{
    EmbedProcessor, MediaInfo, MediaResolver, RenderContext, RenderMode, Severity, fetch_url,
    is_absolute_url,
};
use wikembed_html::HtmlFragments;

use crate::commands::render::{derive_doc_id, load_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Wiki text file to check.
    file: PathBuf,

    /// Document id for the file (default: derived from the file name).
    #[arg(short, long)]
    doc_id: Option<String>,

    /// Path to configuration file (default: auto-discover wikembed.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Media directory to check locators against. Without it every
    /// locator is assumed to exist.
    #[arg(short, long)]
    media_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config or input file cannot be read, or
    /// if any embed reports an error-level diagnostic.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = load_config(self.config.as_deref(), &self.file)?;
        let doc_id = self
            .doc_id
            .unwrap_or_else(|| derive_doc_id(&self.file));

        let input = std::fs::read_to_string(&self.file)?;

        let mut processor = EmbedProcessor::new(
            config.context(doc_id).with_mode(RenderMode::Preview),
        )
        .with_alt_path(config.alt_path());
        if let Some(media_dir) = self.media_dir {
            processor = processor.with_media(FsMediaResolver::new(media_dir));
        }

        let _ = processor.process(&input, &HtmlFragments);

        let diagnostics = processor.diagnostics();
        for (severity, message) in diagnostics.entries() {
            match severity {
                Severity::Error => output.error(&format!("error: {message}")),
                Severity::Warning => output.warning(&format!("warning: {message}")),
                Severity::Info => output.info(&format!("info: {message}")),
            }
        }

        if diagnostics.has_errors() {
            return Err(CliError::Validation(format!(
                "{} has embed errors",
                self.file.display()
            )));
        }
        output.success(&format!("{}: no embed errors", self.file.display()));
        Ok(())
    }
}

/// Media resolver backed by files under a media directory.
///
/// A namespaced locator maps to a relative path (`ns:file.pdf` becomes
/// `ns/file.pdf`); the media exists when that file does. Absolute URLs
/// always exist.
struct FsMediaResolver {
    media_dir: PathBuf,
}

impl FsMediaResolver {
    fn new(media_dir: PathBuf) -> Self {
        Self { media_dir }
    }
}

impl MediaResolver for FsMediaResolver {
    fn resolve(&self, locator: &str, ctx: &RenderContext) -> MediaInfo {
        let url = fetch_url(locator, ctx);
        let exists = if is_absolute_url(locator) {
            true
        } else {
            let id = locator.strip_prefix(':').unwrap_or(locator);
            self.media_dir.join(id.replace(':', "/")).is_file()
        };
        MediaInfo {
            url,
            exists,
            is_public: true,
            forces_download: false,
        }
    }
}
