//! Fragment builders for Google-hosted documents.
//!
//! The resolved id is the document's own embed URL; reference links
//! rewrite the last path segment to the document's edit page.

use std::fmt::Write;

use wikembed_core::Directive;

use crate::escape::escape_html;

/// Replace the last path segment of `id` with `suffix`.
fn edit_url(id: &str, suffix: &str) -> String {
    match id.rfind('/') {
        Some(pos) => format!("{}{suffix}", &id[..pos]),
        None => format!("{id}{suffix}"),
    }
}

/// Reference note linking to the document's sharing URL.
fn sharing_note(d: &Directive) -> String {
    let url = edit_url(&d.id, "/edit?usp=sharing");
    let text = if d.title.is_empty() { &url } else { &d.title };
    format!(
        "<div class=\"obj_note\">Reference: <a href=\"{}\">{}</a></div>\n",
        escape_html(&url),
        escape_html(text)
    )
}

/// Google document `<iframe>`.
///
/// Draws a grey border unless the `border` flag is explicitly false.
pub fn document(d: &Directive) -> String {
    let mut out = String::new();
    if d.reference {
        out.push_str(&sharing_note(d));
    }
    let border = if d.attrs.get_flag("border") == Some(false) {
        "border: none;"
    } else {
        "border: 1px solid grey;"
    };
    write!(
        out,
        "<iframe src=\"{}\" style=\"width: {}; height: {}; {border}\"></iframe>\n",
        escape_html(&d.id),
        d.width,
        d.height
    )
    .unwrap();
    out
}

/// Google presentation `<iframe>` with fullscreen enabled.
pub fn presentation(d: &Directive) -> String {
    let mut out = String::new();
    if d.reference {
        out.push_str(&sharing_note(d));
    }
    write!(
        out,
        "<iframe src=\"{}\" frameborder=\"0\" allowfullscreen=\"true\" mozallowfullscreen=\"true\" webkitallowfullscreen=\"true\" style=\"width: {}; height: {};\"></iframe>\n",
        escape_html(&d.id),
        d.width,
        d.height
    )
    .unwrap();
    out
}

/// Google spreadsheet `<iframe>`.
pub fn spreadsheet(d: &Directive) -> String {
    format!(
        "<iframe src=\"{}\" frameborder=\"0\" style=\"width: {}; height: {};\"></iframe>\n",
        escape_html(&d.id),
        d.width,
        d.height
    )
}

/// Google drawing as an `<img>`.
///
/// The image is itself the link back to the document, so no reference
/// note is ever rendered. The `editable` flag wraps the image in a link
/// to the drawing's edit page.
pub fn drawings(d: &Directive) -> String {
    let mut img = String::new();
    write!(
        img,
        "<img src=\"{}\" width=\"{}\" height=\"{}\"",
        escape_html(&d.id),
        d.width,
        d.height
    )
    .unwrap();
    if !d.title.is_empty() {
        write!(img, " title=\"{}\"", escape_html(&d.title)).unwrap();
    }
    img.push_str(" />");

    if d.attrs.get_flag("editable") == Some(true) {
        let url = edit_url(&d.id, "/edit");
        return format!("<a href=\"{}\">{img}</a>\n", escape_html(&url));
    }
    img.push('\n');
    img
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wikembed_core::{AttrMap, AttrValue, GoogleKind, ResolvedType};

    use super::*;

    fn directive(kind: GoogleKind) -> Directive {
        Directive {
            kind: ResolvedType::Google(kind),
            id: "https://docs.google.com/document/d/abc/pub".to_owned(),
            title: "Doc".to_owned(),
            width: "98%".to_owned(),
            height: "300px".to_owned(),
            reference: true,
            attrs: AttrMap::default(),
        }
    }

    #[test]
    fn test_edit_url_replaces_last_segment() {
        assert_eq!(
            edit_url("https://docs.google.com/document/d/abc/pub", "/edit"),
            "https://docs.google.com/document/d/abc/edit"
        );
    }

    #[test]
    fn test_document_reference_links_sharing_url() {
        let html = document(&directive(GoogleKind::Document));
        assert!(html.contains("/d/abc/edit?usp=sharing"));
        assert!(html.contains(">Doc</a>"));
    }

    #[test]
    fn test_document_default_border() {
        let html = document(&directive(GoogleKind::Document));
        assert!(html.contains("border: 1px solid grey;"));
    }

    #[test]
    fn test_document_border_off() {
        let mut d = directive(GoogleKind::Document);
        d.attrs.insert("border", AttrValue::Flag(false));
        let html = document(&d);
        assert!(html.contains("border: none;"));
    }

    #[test]
    fn test_presentation_allows_fullscreen() {
        let html = presentation(&directive(GoogleKind::Presentation));
        assert!(html.contains("allowfullscreen=\"true\""));
    }

    #[test]
    fn test_spreadsheet_plain_frame() {
        let html = spreadsheet(&directive(GoogleKind::Spreadsheet));
        assert!(!html.contains("Reference:"));
        assert!(html.contains("frameborder=\"0\""));
    }

    #[test]
    fn test_drawings_never_references() {
        let mut d = directive(GoogleKind::Drawings);
        d.reference = false;
        let html = drawings(&d);
        assert!(!html.contains("Reference:"));
        assert!(html.starts_with("<img src="));
    }

    #[test]
    fn test_drawings_editable_wraps_in_link() {
        let mut d = directive(GoogleKind::Drawings);
        d.reference = false;
        d.attrs.insert("editable", AttrValue::Flag(true));
        let html = drawings(&d);
        assert!(html.starts_with("<a href=\"https://docs.google.com/document/d/abc/edit\">"));
        assert!(html.contains("<img src="));
    }

    #[test]
    fn test_reference_falls_back_to_url_without_title() {
        let mut d = directive(GoogleKind::Document);
        d.title = String::new();
        let html = document(&d);
        assert!(html.contains(">https://docs.google.com/document/d/abc/edit?usp=sharing</a>"));
    }
}
