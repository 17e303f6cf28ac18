//! `wikembed render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use wikembed_config::Config;
use wikembed_core::EmbedProcessor;
use wikembed_html::HtmlFragments;

use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Wiki text file to render.
    file: PathBuf,

    /// Document id for the file (default: derived from the file name).
    #[arg(short, long)]
    doc_id: Option<String>,

    /// Path to configuration file (default: auto-discover wikembed.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config or input file cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = load_config(self.config.as_deref(), &self.file)?;
        let doc_id = self
            .doc_id
            .unwrap_or_else(|| derive_doc_id(&self.file));

        let input = std::fs::read_to_string(&self.file)?;

        let mut processor = EmbedProcessor::new(config.context(doc_id))
            .with_alt_path(config.alt_path());
        let rendered = processor.process(&input, &HtmlFragments);

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;

        Ok(())
    }
}

/// Load an explicit config file, or discover one from the input file's
/// directory.
pub(crate) fn load_config(explicit: Option<&Path>, input: &Path) -> Result<Config, CliError> {
    let config = match explicit {
        Some(path) => Config::load(path)?,
        None => {
            let start = input.parent().unwrap_or_else(|| Path::new("."));
            Config::load_or_default(start)?
        }
    };
    Ok(config)
}

/// Derive a document id from the input file's stem.
pub(crate) fn derive_doc_id(file: &Path) -> String {
    file.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_owned())
}
