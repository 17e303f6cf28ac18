//! Normalized embed directive.
//!
//! The immutable result of parsing one markup occurrence: built once,
//! consumed once by dispatch, then discarded. No directive outlives the
//! render call that produced it.

use crate::attr::{AttrMap, AttrValue};
use crate::resolve::ResolvedType;
use crate::split::RawDirective;

/// Default embed width when the markup gives none.
pub const DEFAULT_WIDTH: &str = "98%";
/// Default embed height when the markup gives none.
pub const DEFAULT_HEIGHT: &str = "300px";

/// A normalized embed directive, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Resolved embed type.
    pub kind: ResolvedType,
    /// Resolved media id or URL, as produced by locator resolution.
    pub id: String,
    /// Display title; the media locator when the markup gives none.
    pub title: String,
    /// Width with unit suffix.
    pub width: String,
    /// Height with unit suffix.
    pub height: String,
    /// Whether to render a visible reference link back to the resource.
    pub reference: bool,
    /// Attributes not consumed above (`border`, `editable`, anything
    /// else), forwarded untouched to the fragment builders.
    pub attrs: AttrMap,
}

impl Directive {
    /// Build a directive from the split occurrence, its parsed
    /// attributes, and the resolution results.
    ///
    /// Defaults (`width="98%"`, `height="300px"`, `reference=true`,
    /// `title=locator`) are overlaid, in order, by attribute values and
    /// then by the resolver's reference override. The override is
    /// forced: it wins even over an explicit `reference` attribute,
    /// matching drawings semantics. Unconsumed attributes stay in
    /// [`attrs`](Self::attrs).
    #[must_use]
    pub fn build(
        raw: &RawDirective,
        mut attrs: AttrMap,
        kind: ResolvedType,
        reference_override: Option<bool>,
        id: String,
    ) -> Self {
        let mut width = DEFAULT_WIDTH.to_owned();
        let mut height = DEFAULT_HEIGHT.to_owned();
        let mut reference = true;
        let mut title = raw.title.clone().unwrap_or_else(|| raw.locator.clone());

        if let Some(value) = take_str(&mut attrs, "width") {
            width = value;
        }
        if let Some(value) = take_str(&mut attrs, "height") {
            height = value;
        }
        if let Some(value) = take_str(&mut attrs, "title") {
            title = value;
        }
        if let Some(value) = take_flag(&mut attrs, "reference") {
            reference = value;
        }
        // The bare spellings documented for the markup also turn the
        // reference link off.
        for negation in ["noreference", "nolink"] {
            if take_flag(&mut attrs, negation) == Some(true) {
                reference = false;
            }
        }
        if let Some(forced) = reference_override {
            reference = forced;
        }

        Self {
            kind,
            id,
            title,
            width,
            height,
            reference,
            attrs,
        }
    }
}

/// Take a string attribute; a flag under the same key stays put.
fn take_str(attrs: &mut AttrMap, key: &str) -> Option<String> {
    match attrs.remove(key) {
        Some(AttrValue::Str(value)) => Some(value),
        Some(other) => {
            attrs.insert(key, other);
            None
        }
        None => None,
    }
}

/// Take a flag attribute; a string under the same key stays put.
fn take_flag(attrs: &mut AttrMap, key: &str) -> Option<bool> {
    match attrs.remove(key) {
        Some(AttrValue::Flag(value)) => Some(value),
        Some(other) => {
            attrs.insert(key, other);
            None
        }
        None => None,
    }
}
