//! Configuration management for wikembed.
//!
//! Parses `wikembed.toml` with serde and provides auto-discovery of the
//! config file in parent directories. All settings default to a host
//! with URL rewriting off, serving from the site root.
//!
//! ```toml
//! [media]
//! rewrite = "server"
//! base_url = "/"
//! site_url = "https://wiki.example.com"
//! alt_media_path = "/data/upload/"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use wikembed_core::{AltMediaPath, RenderContext, RewriteMode};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wikembed.toml";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// URL-rewrite mode as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteSetting {
    /// Query-string fetch URLs.
    #[default]
    Off,
    /// Web-server rewriting (`_media/` paths).
    Server,
    /// Application-internal rewriting.
    Internal,
}

impl From<RewriteSetting> for RewriteMode {
    fn from(setting: RewriteSetting) -> Self {
        match setting {
            RewriteSetting::Off => Self::Off,
            RewriteSetting::Server => Self::Server,
            RewriteSetting::Internal => Self::Internal,
        }
    }
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Media URL settings.
    pub media: MediaConfig,
}

/// Media URL configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// URL-rewrite mode of the host.
    pub rewrite: RewriteSetting,
    /// Path prefix under which fetch URLs live.
    pub base_url: String,
    /// Absolute site root, needed for viewer-service embeds of relative
    /// media.
    pub site_url: String,
    /// Base for alternate media URLs. Needs a leading and a trailing
    /// slash, or may be a full external base URL.
    pub alt_media_path: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            rewrite: RewriteSetting::Off,
            base_url: "/".to_owned(),
            site_url: String::new(),
            alt_media_path: "/".to_owned(),
        }
    }
}

impl Config {
    /// Load configuration from a specific file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;
        config.media.alt_media_path = normalize_alt_path(&config.media.alt_media_path);
        Ok(config)
    }

    /// Find `wikembed.toml` in `start_dir` or any parent directory.
    #[must_use]
    pub fn discover(start_dir: &Path) -> Option<PathBuf> {
        start_dir
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load the discovered config, or defaults when none exists.
    pub fn load_or_default(start_dir: &Path) -> Result<Self, ConfigError> {
        match Self::discover(start_dir) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Build a render context for a document from these settings.
    #[must_use]
    pub fn context(&self, doc_id: impl Into<String>) -> RenderContext {
        RenderContext::new(doc_id)
            .with_rewrite(self.media.rewrite.into())
            .with_base_url(self.media.base_url.clone())
            .with_site_url(self.media.site_url.clone())
    }

    /// Alternate-path provider from these settings.
    #[must_use]
    pub fn alt_path(&self) -> AltMediaPath {
        AltMediaPath::new(self.media.alt_media_path.clone())
    }
}

/// Ensure a leading and a trailing slash on path-style alternate bases.
/// Full external base URLs only get the trailing slash.
fn normalize_alt_path(base: &str) -> String {
    if base.is_empty() {
        return "/".to_owned();
    }
    let mut out = String::new();
    let external = base.starts_with("http://") || base.starts_with("https://");
    if !external && !base.starts_with('/') {
        out.push('/');
    }
    out.push_str(base);
    if !out.ends_with('/') {
        out.push('/');
    }
    out
}
