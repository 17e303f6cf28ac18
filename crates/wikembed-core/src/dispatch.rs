//! Directive routing.
//!
//! Maps a resolved embed type to exactly one fragment-generation
//! strategy, or suppresses it. Fragment bodies live outside the core;
//! this module only owns the routing table.

use crate::directive::Directive;
use crate::resolve::ResolvedType;

/// The fragment-generation strategies a directive can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// Inline PDF `<object>` embed.
    Pdf,
    /// Generic page `<iframe>`.
    Frame,
    /// External viewer service `<iframe>` (also the unknown-type
    /// default).
    Viewer,
    GoogleDocument,
    GoogleSpreadsheet,
    GooglePresentation,
    GoogleDrawings,
    SkyDrive,
}

/// Terminal state of routing one directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Produce no output; this is success, not an error.
    Suppressed,
    /// Render through the given strategy.
    Rendered(FragmentKind),
}

/// Route a resolved type to its strategy.
///
/// `nodisp` and the empty type suppress output. Unrecognized non-empty
/// types fall back to the generic viewer strategy rather than erroring.
///
/// # Example
///
/// ```
/// use wikembed_core::dispatch::{route, FragmentKind, Route};
/// use wikembed_core::resolve::ResolvedType;
///
/// assert_eq!(route(&ResolvedType::Pdf), Route::Rendered(FragmentKind::Pdf));
/// assert_eq!(route(&ResolvedType::Nodisp), Route::Suppressed);
/// ```
#[must_use]
pub fn route(kind: &ResolvedType) -> Route {
    use crate::resolve::GoogleKind;

    match kind {
        ResolvedType::Nodisp => Route::Suppressed,
        ResolvedType::Other(token) if token.is_empty() => Route::Suppressed,
        ResolvedType::Pdf => Route::Rendered(FragmentKind::Pdf),
        ResolvedType::Url => Route::Rendered(FragmentKind::Frame),
        ResolvedType::Google(GoogleKind::Document) => Route::Rendered(FragmentKind::GoogleDocument),
        ResolvedType::Google(GoogleKind::Spreadsheet) => {
            Route::Rendered(FragmentKind::GoogleSpreadsheet)
        }
        ResolvedType::Google(GoogleKind::Presentation) => {
            Route::Rendered(FragmentKind::GooglePresentation)
        }
        ResolvedType::Google(GoogleKind::Drawings) => Route::Rendered(FragmentKind::GoogleDrawings),
        ResolvedType::SkyDrive => Route::Rendered(FragmentKind::SkyDrive),
        ResolvedType::Gview | ResolvedType::Other(_) => Route::Rendered(FragmentKind::Viewer),
    }
}

/// Renders one fragment kind from a finished directive.
///
/// Implementations consume only the directive's fields; they perform no
/// further resolution, network access, or mutation.
pub trait FragmentRenderer {
    /// Render the fragment for `kind`.
    fn render(&self, kind: FragmentKind, directive: &Directive) -> String;
}
