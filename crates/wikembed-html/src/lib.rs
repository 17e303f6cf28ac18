//! HTML fragment strategies for embed directives.
//!
//! Implements [`FragmentRenderer`] for the full strategy set the core's
//! dispatch table routes to: PDF objects, page iframes, the external
//! viewer service, Google-hosted documents, and SkyDrive embeds. Each
//! builder consumes only the finished directive's fields.
//!
//! # Example
//!
//! ```
//! use wikembed_core::{EmbedProcessor, RenderContext};
//! use wikembed_html::HtmlFragments;
//!
//! let mut processor = EmbedProcessor::new(RenderContext::new("wiki:start"));
//! let html = processor.process(
//!     "{{obj:pdf no-reference > manual.pdf|Manual}}",
//!     &HtmlFragments,
//! );
//! assert!(html.contains("<object data="));
//! assert!(html.contains("Manual"));
//! ```

mod embed;
mod escape;
mod google;

use wikembed_core::{Directive, FragmentKind, FragmentRenderer};

pub use embed::VIEWER_URL;
pub use escape::escape_html;

/// The standard HTML fragment set.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlFragments;

impl FragmentRenderer for HtmlFragments {
    fn render(&self, kind: FragmentKind, directive: &Directive) -> String {
        match kind {
            FragmentKind::Pdf => embed::pdf_object(directive),
            FragmentKind::Frame => embed::page_frame(directive),
            FragmentKind::Viewer => embed::viewer_frame(directive),
            FragmentKind::GoogleDocument => google::document(directive),
            FragmentKind::GoogleSpreadsheet => google::spreadsheet(directive),
            FragmentKind::GooglePresentation => google::presentation(directive),
            FragmentKind::GoogleDrawings => google::drawings(directive),
            FragmentKind::SkyDrive => embed::skydrive_frame(directive),
        }
    }
}

#[cfg(test)]
mod tests {
    use wikembed_core::{EmbedProcessor, RenderContext, RenderMode};

    use super::*;

    #[test]
    fn test_pdf_end_to_end() {
        let mut processor = EmbedProcessor::new(RenderContext::new("wiki:start"));
        let html = processor.process("{{obj:pdf 640x480 > ns:file.pdf|Manual}}", &HtmlFragments);
        assert!(html.contains("obj_container_pdf"));
        assert!(html.contains("/lib/exe/fetch.php?media=ns:file.pdf"));
        assert!(html.contains("width: 640px; height: 480px;"));
    }

    #[test]
    fn test_drawings_end_to_end_reference_forced_off() {
        let mut processor = EmbedProcessor::new(RenderContext::new("wiki:start"));
        let html = processor.process(
            "{{obj: reference > https://docs.google.com/drawings/d/xyz/pub?w=10}}",
            &HtmlFragments,
        );
        assert!(html.contains("<img src="));
        assert!(!html.contains("Reference:"));
    }

    #[test]
    fn test_unknown_extension_falls_back_to_viewer() {
        let mut processor = EmbedProcessor::new(
            RenderContext::new("wiki:start").with_site_url("https://wiki.example.com"),
        );
        let html = processor.process("{{obj: > slides.pptx}}", &HtmlFragments);
        assert!(html.contains("obj_container_gview"));
    }

    #[test]
    fn test_nodisp_renders_nothing() {
        let mut processor = EmbedProcessor::new(
            RenderContext::new("wiki:start").with_mode(RenderMode::Preview),
        );
        let html = processor.process("{{obj:nodisp > file.pdf}}", &HtmlFragments);
        assert_eq!(html, "");
        assert!(!processor.diagnostics().has_errors());
    }
}
