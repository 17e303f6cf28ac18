//! Embed occurrence processing.
//!
//! Scans a document for embed occurrences in document order and drives
//! each through the full pipeline: split, attribute parse, type and
//! locator resolution, directive build, dispatch, fragment render.
//! Failures never escape to the caller; a bad occurrence renders
//! best-effort or not at all.

use std::sync::LazyLock;

use regex::Regex;

use crate::attr::AttrMap;
use crate::context::RenderContext;
use crate::directive::Directive;
use crate::dispatch::{FragmentRenderer, Route, route};
use crate::host::{
    AltMediaPath, AltPathProvider, Diagnostics, FetchUrlResolver, MediaResolver, RenderSink,
};
use crate::resolve::{resolve_locator, resolve_type};
use crate::split::split;

/// The embed occurrence shapes recognized in wiki text. Non-greedy, one
/// line: the same shapes the original markup registered.
static EMBED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(?:obj:|gview).*?>.*?\}\}").unwrap());

/// Pipeline driver over a document's embed occurrences.
///
/// Each occurrence is processed independently; the processor holds no
/// state across occurrences beyond the collected diagnostics.
///
/// # Example
///
/// ```
/// use wikembed_core::context::RenderContext;
/// use wikembed_core::dispatch::{FragmentKind, FragmentRenderer};
/// use wikembed_core::directive::Directive;
/// use wikembed_core::processor::EmbedProcessor;
///
/// struct TitleOnly;
///
/// impl FragmentRenderer for TitleOnly {
///     fn render(&self, _kind: FragmentKind, directive: &Directive) -> String {
///         format!("[{}]", directive.title)
///     }
/// }
///
/// let mut processor = EmbedProcessor::new(RenderContext::new("wiki:start"));
/// let out = processor.process("see {{obj:pdf > file.pdf|Report}} here", &TitleOnly);
/// assert_eq!(out, "see [Report] here");
/// ```
pub struct EmbedProcessor {
    ctx: RenderContext,
    media: Box<dyn MediaResolver>,
    alt: Box<dyn AltPathProvider>,
    diagnostics: Diagnostics,
}

impl EmbedProcessor {
    /// Create a processor with the default collaborators (fetch-URL
    /// media resolution, root-based alternate paths).
    #[must_use]
    pub fn new(ctx: RenderContext) -> Self {
        Self {
            ctx,
            media: Box::new(FetchUrlResolver),
            alt: Box::new(AltMediaPath::default()),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Replace the media resolver.
    #[must_use]
    pub fn with_media<M: MediaResolver + 'static>(mut self, media: M) -> Self {
        self.media = Box::new(media);
        self
    }

    /// Replace the alternate-path provider.
    #[must_use]
    pub fn with_alt_path<A: AltPathProvider + 'static>(mut self, alt: A) -> Self {
        self.alt = Box::new(alt);
        self
    }

    /// Process a document, splicing rendered fragments in place of the
    /// occurrences. Suppressed and unrenderable occurrences are removed.
    #[must_use]
    pub fn process(&mut self, input: &str, fragments: &dyn FragmentRenderer) -> String {
        let mut out = String::with_capacity(input.len());
        let mut last = 0;
        for m in EMBED_RE.find_iter(input) {
            out.push_str(&input[last..m.start()]);
            if let Some(fragment) = self.handle_occurrence(m.as_str(), fragments) {
                out.push_str(&fragment);
            }
            last = m.end();
        }
        out.push_str(&input[last..]);
        out
    }

    /// Process a document, appending each rendered fragment to the sink
    /// in document order. The surrounding text is discarded.
    pub fn render_into(
        &mut self,
        input: &str,
        fragments: &dyn FragmentRenderer,
        sink: &mut dyn RenderSink,
    ) {
        for m in EMBED_RE.find_iter(input) {
            if let Some(fragment) = self.handle_occurrence(m.as_str(), fragments) {
                sink.append(&fragment);
            }
        }
    }

    /// Run one occurrence through the pipeline.
    ///
    /// `None` means no output: a suppressed type, a malformed
    /// occurrence, or missing media in preview mode.
    fn handle_occurrence(
        &mut self,
        matched: &str,
        fragments: &dyn FragmentRenderer,
    ) -> Option<String> {
        let raw = match split(matched) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(doc = %self.ctx.doc_id, %err, "skipping embed occurrence");
                return None;
            }
        };

        let attrs = AttrMap::parse(&raw.params);
        let (kind, reference_override) = resolve_type(&raw.locator, &raw.markup_type);
        let id = resolve_locator(
            &raw.locator,
            &kind,
            &self.ctx,
            self.media.as_ref(),
            self.alt.as_ref(),
            &mut self.diagnostics,
        )?;

        let directive = Directive::build(&raw, attrs, kind, reference_override, id);
        tracing::debug!(kind = %directive.kind, id = %directive.id, "embed directive");

        match route(&directive.kind) {
            Route::Suppressed => None,
            Route::Rendered(strategy) => Some(fragments.render(strategy, &directive)),
        }
    }

    /// Diagnostics collected so far (preview mode only reports any).
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}
