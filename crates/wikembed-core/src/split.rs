//! Markup occurrence splitting.
//!
//! Splits one matched `{{obj:…>…}}` / `{{gview…>…}}` occurrence into its
//! markup-type token, parameter string, media locator, and optional
//! title. Attribute parsing and type resolution happen downstream.

use crate::error::EmbedError;

/// The pieces of one markup occurrence, before attribute parsing and
/// type resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDirective {
    /// Explicit type token from the markup (`pdf` in `{{obj:pdf …}}`,
    /// `gview` in `{{gview …}}`). Empty when omitted (`{{obj: …}}`).
    pub markup_type: String,
    /// Unparsed parameter string between the type token and the `>`.
    pub params: String,
    /// Media locator: a wiki media id or an absolute URL.
    pub locator: String,
    /// Title from `locator|title`, if given and non-empty.
    pub title: Option<String>,
}

/// Split a matched occurrence into a [`RawDirective`].
///
/// # Errors
///
/// Returns [`EmbedError::MalformedDirective`] when the text has no `>`
/// separator.
///
/// # Example
///
/// ```
/// use wikembed_core::split::split;
///
/// let raw = split(r#"{{obj:pdf w="1" > foo.pdf|My Title}}"#).unwrap();
/// assert_eq!(raw.markup_type, "pdf");
/// assert_eq!(raw.locator, "foo.pdf");
/// assert_eq!(raw.title.as_deref(), Some("My Title"));
/// ```
pub fn split(matched: &str) -> Result<RawDirective, EmbedError> {
    let (params_part, media_part) = matched
        .split_once('>')
        .ok_or(EmbedError::MalformedDirective)?;

    // Drop the two-character "{{" opener.
    let params_part = params_part.get(2..).unwrap_or("");

    let (markup_token, params) = match params_part.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest),
        None => (params_part, ""),
    };

    // "obj:pdf" carries the type after the prefix; a prefix-less token
    // like "gview" is itself the type.
    let markup_type = match markup_token.split_once(':') {
        Some((_, explicit)) => explicit,
        None => markup_token,
    };

    let media_part = media_part.trim_matches(|c: char| c.is_whitespace() || c == '{' || c == '}');

    let (locator, title) = match media_part.split_once('|') {
        Some((locator, title)) => {
            let title = title.trim();
            (
                locator.trim(),
                (!title.is_empty()).then(|| title.to_owned()),
            )
        }
        None => (media_part, None),
    };

    Ok(RawDirective {
        markup_type: markup_type.to_owned(),
        params: params.to_owned(),
        locator: locator.to_owned(),
        title,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_explicit_type_with_title() {
        let raw = split(r#"{{obj:pdf w="1" > foo.pdf|My Title}}"#).unwrap();
        assert_eq!(raw.markup_type, "pdf");
        assert_eq!(raw.params, r#"w="1" "#);
        assert_eq!(raw.locator, "foo.pdf");
        assert_eq!(raw.title.as_deref(), Some("My Title"));
    }

    #[test]
    fn test_omitted_type() {
        let raw = split("{{obj: 300x200 > ns:doc.pdf}}").unwrap();
        assert_eq!(raw.markup_type, "");
        assert_eq!(raw.params.trim(), "300x200");
        assert_eq!(raw.locator, "ns:doc.pdf");
        assert_eq!(raw.title, None);
    }

    #[test]
    fn test_gview_shorthand() {
        let raw = split("{{gview 50% > report.docx}}").unwrap();
        assert_eq!(raw.markup_type, "gview");
        assert_eq!(raw.locator, "report.docx");
    }

    #[test]
    fn test_no_params() {
        let raw = split("{{obj:pdf>file.pdf}}").unwrap();
        assert_eq!(raw.markup_type, "pdf");
        assert_eq!(raw.params, "");
        assert_eq!(raw.locator, "file.pdf");
    }

    #[test]
    fn test_empty_title_defaults_to_none() {
        let raw = split("{{obj:pdf > file.pdf|}}").unwrap();
        assert_eq!(raw.title, None);
    }

    #[test]
    fn test_title_trimmed() {
        let raw = split("{{obj:pdf > file.pdf |  Spaced Title  }}").unwrap();
        assert_eq!(raw.locator, "file.pdf");
        assert_eq!(raw.title.as_deref(), Some("Spaced Title"));
    }

    #[test]
    fn test_missing_separator_is_malformed() {
        assert_eq!(
            split("{{obj:pdf file.pdf}}"),
            Err(EmbedError::MalformedDirective)
        );
    }

    #[test]
    fn test_absolute_url_locator() {
        let raw = split("{{gview > https://example.com/slides.pptx|Slides}}").unwrap();
        assert_eq!(raw.locator, "https://example.com/slides.pptx");
        assert_eq!(raw.title.as_deref(), Some("Slides"));
    }
}
