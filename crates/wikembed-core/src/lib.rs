//! Inline embed directive parsing and type resolution.
//!
//! This crate recognizes a wiki inline-embed markup and turns each
//! occurrence into a normalized [`Directive`](directive::Directive) for
//! a rendering layer to consume:
//!
//! ```text
//! {{obj:type width,height noreference > media_id|title}}
//! {{gview ... > ... }}
//! ```
//!
//! # Architecture
//!
//! One occurrence flows through a fixed pipeline:
//!
//! 1. [`split`](split::split) cuts the matched text into markup token,
//!    parameter string, media locator, and optional title.
//! 2. [`AttrMap::parse`](attr::AttrMap::parse) tokenizes the parameter
//!    string into named attributes and flags.
//! 3. [`resolve_type`](resolve::resolve_type) decides the embed type
//!    (hosted-document URL shapes > explicit token > file extension) and
//!    [`resolve_locator`](resolve::resolve_locator) produces the id to
//!    embed.
//! 4. [`Directive::build`](directive::Directive::build) merges defaults,
//!    attributes, and resolution results into an immutable record.
//! 5. [`route`](dispatch::route) maps the type to one fragment strategy
//!    or suppresses the occurrence.
//!
//! [`EmbedProcessor`](processor::EmbedProcessor) drives the pipeline
//! over a whole document. Fragment bodies are supplied by the caller
//! through [`FragmentRenderer`](dispatch::FragmentRenderer); the
//! `wikembed-html` crate provides the standard set.
//!
//! The engine holds no state beyond a single render pass and never lets
//! an occurrence failure escape: bad markup renders best-effort or not
//! at all.

pub mod attr;
pub mod context;
pub mod directive;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod processor;
pub mod resolve;
pub mod split;

pub use attr::{AttrMap, AttrValue};
pub use context::{RenderContext, RenderMode, RewriteMode};
pub use directive::Directive;
pub use dispatch::{FragmentKind, FragmentRenderer, Route, route};
pub use error::EmbedError;
pub use host::{
    AltMediaPath, AltPathProvider, DiagnosticSink, Diagnostics, FetchUrlResolver, MediaEntry,
    MediaInfo, MediaResolver, RenderSink, Severity, TableMediaResolver, fetch_url, is_absolute_url,
};
pub use processor::EmbedProcessor;
pub use resolve::{GoogleKind, ResolvedType, resolve_locator, resolve_type};
pub use split::{RawDirective, split};
