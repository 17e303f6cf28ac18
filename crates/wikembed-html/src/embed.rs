//! Fragment builders for file and page embeds.

use std::fmt::Write;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use wikembed_core::Directive;

use crate::escape::escape_html;

/// URL of the external document viewer service.
pub const VIEWER_URL: &str = "https://docs.google.com/viewer";

/// Query-string encoding: everything but unreserved characters.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.');

/// `Reference: <a …>` line shown above an embed.
pub(crate) fn reference_link(href: &str, text: &str) -> String {
    format!(
        r#"Reference: <a href="{}">{}</a>"#,
        escape_html(href),
        escape_html(text)
    )
}

/// Inline PDF via an `<object>` embed.
pub fn pdf_object(d: &Directive) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"obj_container_pdf\">\n");
    if d.reference {
        out.push_str(&reference_link(&d.id, &d.id));
        out.push_str("<br />\n");
    }
    write!(out, r#"<object data="{}""#, escape_html(&d.id)).unwrap();
    if !d.title.is_empty() {
        write!(out, r#" title="{}""#, escape_html(&d.title)).unwrap();
    }
    write!(
        out,
        " style=\"width: {}; height: {};\">\n{}</object>\n</div>\n",
        d.width,
        d.height,
        escape_html(&d.title)
    )
    .unwrap();
    out
}

/// Arbitrary page in an `<iframe>`.
///
/// A truthy `border` flag draws a grey frame; otherwise the frame border
/// is turned off.
pub fn page_frame(d: &Directive) -> String {
    let mut out = String::new();
    write!(
        out,
        r#"<iframe src="{}" width="{}" height="{}""#,
        escape_html(&d.id),
        d.width,
        d.height
    )
    .unwrap();
    if d.attrs.get_flag("border") == Some(true) {
        out.push_str(r#" style="border:1px solid grey;""#);
    } else {
        out.push_str(r#" frameborder="0""#);
    }
    write!(out, ">{}</iframe>\n", escape_html(&d.title)).unwrap();
    out
}

/// External viewer service embed; also the fallback for unknown types.
///
/// The viewer fetches the document itself, so the id is passed
/// percent-encoded in the query string and must be a clean absolute URL.
pub fn viewer_frame(d: &Directive) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"obj_container_gview\">\n");
    if d.reference {
        write!(
            out,
            "<div class=\"obj_note\">{}</div>\n",
            reference_link(&d.id, &d.id)
        )
        .unwrap();
    }
    write!(
        out,
        "<iframe src=\"{VIEWER_URL}?url={}&embedded=true\" style=\"width: {}; height: {}; border: none;\"></iframe>\n",
        utf8_percent_encode(&d.id, QUERY),
        d.width,
        d.height
    )
    .unwrap();
    out.push_str("</div>\n");
    out
}

/// SkyDrive web app `<iframe>`.
pub fn skydrive_frame(d: &Directive) -> String {
    format!(
        "<iframe src=\"{}\" frameborder=\"0\" width=\"{}\" height=\"{}\"></iframe>\n",
        escape_html(&d.id),
        d.width,
        d.height
    )
}
