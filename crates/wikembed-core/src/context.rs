//! Render context.
//!
//! One context value travels through every resolver and collaborator
//! call for a document render pass, replacing any ambient host state.

/// Execution mode of the current render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Normal page rendering: best-effort output, no diagnostics.
    #[default]
    Normal,
    /// Author preview: resolution problems are reported via the
    /// diagnostic sink.
    Preview,
}

/// Host URL-rewrite mode for media fetch URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RewriteMode {
    /// No rewriting; media is fetched through a query-string URL.
    #[default]
    Off,
    /// Web-server rewriting (e.g. `.htaccess`); `_media/` style paths.
    Server,
    /// Application-internal rewriting; path-info style fetch URLs.
    Internal,
}

/// Per-render-pass context passed into every resolution call.
///
/// # Example
///
/// ```
/// use wikembed_core::context::{RenderContext, RenderMode, RewriteMode};
///
/// let ctx = RenderContext::new("wiki:start")
///     .with_mode(RenderMode::Preview)
///     .with_rewrite(RewriteMode::Server);
/// assert_eq!(ctx.doc_id, "wiki:start");
/// ```
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Execution mode (normal render or author preview).
    pub mode: RenderMode,
    /// Identifier of the document being rendered.
    pub doc_id: String,
    /// URL-rewrite mode of the host.
    pub rewrite: RewriteMode,
    /// Path prefix under which media fetch URLs live (trailing slash).
    pub base_url: String,
    /// Absolute site root, used when an embed needs a full URL.
    pub site_url: String,
}

impl RenderContext {
    /// Create a context for the given document with default settings.
    #[must_use]
    pub fn new(doc_id: impl Into<String>) -> Self {
        Self {
            mode: RenderMode::default(),
            doc_id: doc_id.into(),
            rewrite: RewriteMode::default(),
            base_url: "/".to_owned(),
            site_url: String::new(),
        }
    }

    /// Set the execution mode.
    #[must_use]
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the URL-rewrite mode.
    #[must_use]
    pub fn with_rewrite(mut self, rewrite: RewriteMode) -> Self {
        self.rewrite = rewrite;
        self
    }

    /// Set the media base URL path prefix.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the absolute site root URL.
    #[must_use]
    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = site_url.into();
        self
    }

    /// Whether this pass runs in author preview mode.
    #[must_use]
    pub fn is_preview(&self) -> bool {
        self.mode == RenderMode::Preview
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(String::new())
    }
}
