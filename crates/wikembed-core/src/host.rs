//! Host collaborator interfaces.
//!
//! The directive engine talks to its host through four seams: media
//! lookup, alternate-path construction, fragment output, and author
//! diagnostics. Concrete implementations for a standalone host live here
//! as well; a CMS embeds the engine by providing its own.

use std::collections::HashMap;

use crate::context::{RenderContext, RewriteMode};

/// Result of resolving a media locator against the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaInfo {
    /// Resolved fetch URL (or opaque id) for the media.
    pub url: String,
    /// Whether the media exists in the host's store.
    pub exists: bool,
    /// Whether the media is readable without authentication.
    pub is_public: bool,
    /// Whether the host's MIME policy forces a download for this media.
    /// Embedding through the standard URL would fail in that case.
    pub forces_download: bool,
}

/// Resolves media locators to fetch URLs, applying the host's rewrite
/// mode and MIME policy.
pub trait MediaResolver {
    /// Resolve a locator within the given render context.
    fn resolve(&self, locator: &str, ctx: &RenderContext) -> MediaInfo;
}

/// Builds a non-rewritten URL for media whose standard fetch URL would
/// break an embed (forced downloads, external viewer services).
pub trait AltPathProvider {
    /// Alternate URL or path for the given locator.
    fn alt_url(&self, locator: &str) -> String;
}

/// Receives rendered HTML fragments in document order.
pub trait RenderSink {
    /// Append one fragment.
    fn append(&mut self, fragment: &str);
}

impl RenderSink for String {
    fn append(&mut self, fragment: &str) {
        self.push_str(fragment);
    }
}

impl RenderSink for Vec<String> {
    fn append(&mut self, fragment: &str) {
        self.push(fragment.to_owned());
    }
}

/// Severity of a resolution diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Receives resolution diagnostics during preview renders.
///
/// Reporting never blocks or aborts rendering.
pub trait DiagnosticSink {
    /// Report one diagnostic.
    fn report(&mut self, severity: Severity, message: &str);
}

/// Collecting diagnostic sink.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<(Severity, String)>,
}

impl Diagnostics {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All collected diagnostics in report order.
    #[must_use]
    pub fn entries(&self) -> &[(Severity, String)] {
        &self.entries
    }

    /// Whether any error-level diagnostic was reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|(s, _)| *s == Severity::Error)
    }

    /// Whether nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, severity: Severity, message: &str) {
        self.entries.push((severity, message.to_owned()));
    }
}

/// Build the standard fetch URL for a locator under the given rewrite
/// mode.
///
/// Absolute `http(s)` locators pass through unchanged.
#[must_use]
pub fn fetch_url(locator: &str, ctx: &RenderContext) -> String {
    if is_absolute_url(locator) {
        return locator.to_owned();
    }
    let base = &ctx.base_url;
    match ctx.rewrite {
        RewriteMode::Off => format!("{base}lib/exe/fetch.php?media={locator}"),
        RewriteMode::Server => format!("{base}_media/{locator}"),
        RewriteMode::Internal => format!("{base}lib/exe/fetch.php/{locator}"),
    }
}

/// Whether a locator is already an absolute `http(s)` URL.
#[must_use]
pub fn is_absolute_url(locator: &str) -> bool {
    let lower = locator.get(..8).unwrap_or(locator).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Media resolver that only constructs fetch URLs.
///
/// Every locator is treated as existing, public, and embeddable. Suits
/// hosts without a media store, and normal-mode rendering where missing
/// media must still produce best-effort output.
#[derive(Debug, Default)]
pub struct FetchUrlResolver;

impl MediaResolver for FetchUrlResolver {
    fn resolve(&self, locator: &str, ctx: &RenderContext) -> MediaInfo {
        MediaInfo {
            url: fetch_url(locator, ctx),
            exists: true,
            is_public: true,
            forces_download: false,
        }
    }
}

/// Per-media metadata for [`TableMediaResolver`].
#[derive(Debug, Clone, Copy)]
pub struct MediaEntry {
    /// Readable without authentication.
    pub is_public: bool,
    /// MIME policy forces a download.
    pub forces_download: bool,
}

impl Default for MediaEntry {
    fn default() -> Self {
        Self {
            is_public: true,
            forces_download: false,
        }
    }
}

/// Media resolver backed by a fixed table of known locators.
///
/// Locators not in the table resolve with `exists = false` (the URL is
/// still constructed so normal-mode rendering stays best-effort).
/// Absolute URLs always exist.
#[derive(Debug, Default)]
pub struct TableMediaResolver {
    entries: HashMap<String, MediaEntry>,
}

impl TableMediaResolver {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a public, embeddable media locator.
    #[must_use]
    pub fn with_media(mut self, locator: impl Into<String>) -> Self {
        self.entries.insert(locator.into(), MediaEntry::default());
        self
    }

    /// Register a locator with explicit metadata.
    #[must_use]
    pub fn with_entry(mut self, locator: impl Into<String>, entry: MediaEntry) -> Self {
        self.entries.insert(locator.into(), entry);
        self
    }
}

impl MediaResolver for TableMediaResolver {
    fn resolve(&self, locator: &str, ctx: &RenderContext) -> MediaInfo {
        let url = fetch_url(locator, ctx);
        if is_absolute_url(locator) {
            return MediaInfo {
                url,
                exists: true,
                is_public: true,
                forces_download: false,
            };
        }
        match self.entries.get(locator) {
            Some(entry) => MediaInfo {
                url,
                exists: true,
                is_public: entry.is_public,
                forces_download: entry.forces_download,
            },
            None => MediaInfo {
                url,
                exists: false,
                is_public: true,
                forces_download: false,
            },
        }
    }
}

/// Alternate media path construction.
///
/// Maps a namespaced locator onto a configured base URL: the leading
/// namespace separator is dropped and the remaining separators become
/// path segments. The base needs a leading and a trailing slash (or be a
/// full external base URL).
#[derive(Debug, Clone)]
pub struct AltMediaPath {
    base: String,
}

impl AltMediaPath {
    /// Create a provider with the given base. An empty base falls back
    /// to `/`.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: if base.is_empty() { "/".to_owned() } else { base },
        }
    }
}

impl Default for AltMediaPath {
    fn default() -> Self {
        Self::new("/")
    }
}

impl AltPathProvider for AltMediaPath {
    fn alt_url(&self, locator: &str) -> String {
        let id = locator.strip_prefix(':').unwrap_or(locator);
        format!("{}{}", self.base, id.replace(':', "/"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context::RenderContext;

    fn ctx(rewrite: RewriteMode) -> RenderContext {
        RenderContext::new("wiki:page").with_rewrite(rewrite)
    }

    #[test]
    fn test_fetch_url_rewrite_off() {
        assert_eq!(
            fetch_url("ns:file.pdf", &ctx(RewriteMode::Off)),
            "/lib/exe/fetch.php?media=ns:file.pdf"
        );
    }

    #[test]
    fn test_fetch_url_rewrite_server() {
        assert_eq!(
            fetch_url("ns:file.pdf", &ctx(RewriteMode::Server)),
            "/_media/ns:file.pdf"
        );
    }

    #[test]
    fn test_fetch_url_rewrite_internal() {
        assert_eq!(
            fetch_url("ns:file.pdf", &ctx(RewriteMode::Internal)),
            "/lib/exe/fetch.php/ns:file.pdf"
        );
    }

    #[test]
    fn test_fetch_url_absolute_passthrough() {
        assert_eq!(
            fetch_url("https://example.com/doc.pdf", &ctx(RewriteMode::Off)),
            "https://example.com/doc.pdf"
        );
    }

    #[test]
    fn test_is_absolute_url_case_insensitive() {
        assert!(is_absolute_url("HTTPS://example.com/x"));
        assert!(is_absolute_url("http://example.com/x"));
        assert!(!is_absolute_url("ns:file.pdf"));
        assert!(!is_absolute_url("httpx://nope"));
    }

    #[test]
    fn test_alt_media_path() {
        let alt = AltMediaPath::new("/data/upload/");
        assert_eq!(alt.alt_url(":ns:file.pdf"), "/data/upload/ns/file.pdf");
        assert_eq!(alt.alt_url("file.pdf"), "/data/upload/file.pdf");
    }

    #[test]
    fn test_alt_media_path_empty_base() {
        let alt = AltMediaPath::new("");
        assert_eq!(alt.alt_url("ns:file.pdf"), "/ns/file.pdf");
    }

    #[test]
    fn test_table_resolver_missing_media() {
        let resolver = TableMediaResolver::new().with_media("known.pdf");
        let info = resolver.resolve("missing.pdf", &ctx(RewriteMode::Off));
        assert!(!info.exists);
        assert_eq!(info.url, "/lib/exe/fetch.php?media=missing.pdf");
    }

    #[test]
    fn test_table_resolver_known_media() {
        let resolver = TableMediaResolver::new().with_entry(
            "secret.pdf",
            MediaEntry {
                is_public: false,
                forces_download: false,
            },
        );
        let info = resolver.resolve("secret.pdf", &ctx(RewriteMode::Off));
        assert!(info.exists);
        assert!(!info.is_public);
    }

    #[test]
    fn test_diagnostics_collects() {
        let mut diag = Diagnostics::new();
        diag.report(Severity::Warning, "nearly");
        diag.report(Severity::Error, "broken");
        assert_eq!(diag.entries().len(), 2);
        assert!(diag.has_errors());
    }
}
