//! Embed type and locator resolution.
//!
//! Decides the final embed type of an occurrence: hosted-document URL
//! shapes win over the explicit markup token, which wins over the
//! file-extension fallback. Also resolves the media locator to the id
//! the fragment builders embed, including the alternate-path branch the
//! external viewer service needs.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::context::{RenderContext, RewriteMode};
use crate::host::{AltPathProvider, DiagnosticSink, MediaResolver, Severity, is_absolute_url};

/// URL shape of Google Docs, Sheets, Slides, and Drawings documents.
static GOOGLE_DRIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://docs\.google\.com/(document|presentation|spreadsheet|drawings)/")
        .unwrap()
});

/// URL shape of SkyDrive web app embeds.
static SKYDRIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://skydrive\.live\.com/embed\?cid=").unwrap());

/// Google-hosted document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoogleKind {
    Document,
    Presentation,
    Spreadsheet,
    Drawings,
}

impl GoogleKind {
    fn from_url_group(group: &str) -> Self {
        match group {
            "document" => Self::Document,
            "presentation" => Self::Presentation,
            "spreadsheet" => Self::Spreadsheet,
            _ => Self::Drawings,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Document => "google.document",
            Self::Presentation => "google.presentation",
            Self::Spreadsheet => "google.spreadsheet",
            Self::Drawings => "google.drawings",
        }
    }
}

/// The resolved embed type of a directive.
///
/// Unrecognized tokens are preserved verbatim in [`Other`](Self::Other)
/// rather than rejected; dispatch treats them as "unknown" and routes
/// them to the generic viewer. The empty token (no explicit type, no
/// file extension) is `Other("")` and renders nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    /// Inline PDF via an `<object>` embed.
    Pdf,
    /// Arbitrary page in an `<iframe>`.
    Url,
    /// Google viewer service embed.
    Gview,
    /// Explicitly suppressed: parse but render nothing.
    Nodisp,
    /// Google-hosted document, matched from the locator URL.
    Google(GoogleKind),
    /// SkyDrive web app embed, matched from the locator URL.
    SkyDrive,
    /// Any other token or file extension, kept verbatim.
    Other(String),
}

impl ResolvedType {
    /// Map an explicit type token or file extension to a type.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "pdf" => Self::Pdf,
            "url" => Self::Url,
            "gview" => Self::Gview,
            "nodisp" => Self::Nodisp,
            "google.document" => Self::Google(GoogleKind::Document),
            "google.presentation" => Self::Google(GoogleKind::Presentation),
            "google.spreadsheet" => Self::Google(GoogleKind::Spreadsheet),
            "google.drawings" => Self::Google(GoogleKind::Drawings),
            "skydrive" => Self::SkyDrive,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Canonical token for this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pdf => "pdf",
            Self::Url => "url",
            Self::Gview => "gview",
            Self::Nodisp => "nodisp",
            Self::Google(kind) => kind.as_str(),
            Self::SkyDrive => "skydrive",
            Self::Other(token) => token,
        }
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the embed type for a locator and explicit markup token.
///
/// Priority chain, first match wins:
///
/// 1. Google document URL shape (overrides any explicit token). Drawings
///    additionally force `reference` off, returned as the second tuple
///    element: a drawings embed is itself a clickable image, so a
///    separate reference link is never shown.
/// 2. SkyDrive embed URL shape.
/// 3. The explicit token, verbatim.
/// 4. The substring after the locator's last `.`; without a `.` the type
///    is empty and dispatch renders nothing.
///
/// The type is resolved exactly once per directive and never re-derived.
///
/// # Example
///
/// ```
/// use wikembed_core::resolve::{resolve_type, GoogleKind, ResolvedType};
///
/// let (kind, _) = resolve_type("ns:report.pdf", "");
/// assert_eq!(kind, ResolvedType::Pdf);
///
/// let (kind, reference) = resolve_type(
///     "https://docs.google.com/drawings/d/abc/pub?w=10",
///     "pdf",
/// );
/// assert_eq!(kind, ResolvedType::Google(GoogleKind::Drawings));
/// assert_eq!(reference, Some(false));
/// ```
#[must_use]
pub fn resolve_type(locator: &str, explicit: &str) -> (ResolvedType, Option<bool>) {
    if let Some(captures) = GOOGLE_DRIVE_RE.captures(locator) {
        let kind = GoogleKind::from_url_group(&captures[1]);
        let reference = (kind == GoogleKind::Drawings).then_some(false);
        return (ResolvedType::Google(kind), reference);
    }
    if SKYDRIVE_RE.is_match(locator) {
        return (ResolvedType::SkyDrive, None);
    }
    if !explicit.is_empty() {
        return (ResolvedType::from_token(explicit), None);
    }
    let extension = match locator.rfind('.') {
        Some(pos) => &locator[pos + 1..],
        None => "",
    };
    (ResolvedType::from_token(extension), None)
}

/// Resolve a locator to the id embedded by the fragment builders.
///
/// Absolute URLs pass through untouched. A `gview` embed with rewriting
/// off and a relative locator goes through the alternate-path provider
/// prefixed with the site root, because the viewer service needs a clean
/// absolute URL and cannot consume a query-string fetch URL. Everything
/// else goes through the media resolver; a forced-download result falls
/// back to the alternate path.
///
/// Returns `None` only for missing media in preview mode (the occurrence
/// is suppressed and an error diagnostic reported). Normal-mode renders
/// always produce a best-effort id.
pub fn resolve_locator(
    locator: &str,
    kind: &ResolvedType,
    ctx: &RenderContext,
    media: &dyn MediaResolver,
    alt: &dyn AltPathProvider,
    diag: &mut dyn DiagnosticSink,
) -> Option<String> {
    if is_absolute_url(locator) {
        return Some(locator.to_owned());
    }

    if *kind == ResolvedType::Gview && ctx.rewrite == RewriteMode::Off {
        let site = ctx.site_url.strip_suffix('/').unwrap_or(&ctx.site_url);
        return Some(format!("{site}{}", alt.alt_url(locator)));
    }

    let info = media.resolve(locator, ctx);
    if !info.exists && ctx.is_preview() {
        diag.report(Severity::Error, &format!("media does not exist: {locator}"));
        return None;
    }
    if !info.is_public && ctx.is_preview() {
        diag.report(Severity::Warning, &format!("media is not public: {locator}"));
    }
    if info.forces_download {
        let alt_url = alt.alt_url(locator);
        if ctx.is_preview() {
            diag.report(
                Severity::Info,
                &format!("alternate url ({alt_url}) will be used for {locator}"),
            );
        }
        return Some(alt_url);
    }
    Some(info.url)
}
