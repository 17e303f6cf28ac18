//! Core error types.

/// Errors from embed markup handling.
///
/// A malformed occurrence is never fatal to a document render; callers
/// skip the occurrence and continue.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EmbedError {
    /// The matched text has no `>` separator between the parameter part
    /// and the media part.
    #[error("embed markup has no '>' separator")]
    MalformedDirective,
}
