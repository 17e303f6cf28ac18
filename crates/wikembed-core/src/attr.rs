//! Embed argument parsing.
//!
//! Parses the free-form parameter string of an embed occurrence into a
//! map of named attributes: quoted `key="value"` pairs, `WxH` dimension
//! shorthand, and boolean flags (`showdate`, `no-reference`, `!editable`).

use std::collections::HashMap;
use std::fmt::Write;

/// An attribute value: either a string or a boolean flag.
///
/// Quoted `key="value"` arguments produce [`Str`](Self::Str) values;
/// bare and negated tokens produce [`Flag`](Self::Flag) values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// String value from a quoted pair.
    Str(String),
    /// Boolean flag from a bare (`true`) or negated (`false`) token.
    Flag(bool),
}

impl AttrValue {
    /// The string value, if this is a string attribute.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Flag(_) => None,
        }
    }

    /// The flag value, if this is a boolean attribute.
    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Str(_) => None,
            Self::Flag(b) => Some(*b),
        }
    }
}

/// Parsed attributes from an embed parameter string.
///
/// Keys are unique; when a key is set twice the later write wins. Quoted
/// pairs are parsed before flags, so a flag can overwrite a quoted value
/// of the same name.
///
/// # Example
///
/// ```
/// use wikembed_core::attr::AttrMap;
///
/// let attrs = AttrMap::parse(r#"width="50%" 300pt no-reference showdate"#);
/// assert_eq!(attrs.get_str("width"), Some("50%"));
/// assert_eq!(attrs.get_str("height"), Some("300pt"));
/// assert_eq!(attrs.get_flag("reference"), Some(false));
/// assert_eq!(attrs.get_flag("showdate"), Some(true));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrMap {
    entries: HashMap<String, AttrValue>,
}

impl AttrMap {
    /// Parse a parameter string into an attribute map.
    ///
    /// Processing order:
    ///
    /// 1. Quoted `key="value"` pairs are extracted and removed from the
    ///    working string. The quote character may be `"`, `'`, or a
    ///    backtick; the same character must close the value. Backslash
    ///    escapes inside the value are preserved literally.
    /// 2. The remainder is split on whitespace into tokens.
    /// 3. Dimension tokens (`300x200`, `50%,30%`, `300px`) set `width`
    ///    and/or `height`. A single dimension *with* a unit sets height
    ///    only; a bare number is not a dimension and falls through.
    /// 4. Everything else becomes a boolean flag: `no-name`/`no_name` and
    ///    `!name` set `name` to false, any other token sets itself true.
    ///
    /// No attribute-name validation is performed; arbitrary tokens become
    /// arbitrary boolean keys and consumers must tolerate unexpected keys.
    #[must_use]
    pub fn parse(args: &str) -> Self {
        let mut map = Self::default();
        let rest = extract_quoted_pairs(args, &mut map);

        for token in rest.split_whitespace() {
            match match_dimension(token) {
                Some(Dimension::Pair { width, height }) => {
                    map.insert("width", AttrValue::Str(width));
                    map.insert("height", AttrValue::Str(height));
                }
                // A lone dimensioned token sets height, not width. This
                // asymmetry is long-standing observable contract; see
                // DESIGN.md before changing it.
                Some(Dimension::HeightOnly(height)) => {
                    map.insert("height", AttrValue::Str(height));
                }
                None => {
                    let (name, value) = parse_flag(token);
                    map.insert(name, AttrValue::Flag(value));
                }
            }
        }

        map
    }

    /// Set an attribute, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: AttrValue) {
        self.entries.insert(key.into(), value);
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    /// Get a string attribute by key.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(AttrValue::as_str)
    }

    /// Get a flag attribute by key.
    #[must_use]
    pub fn get_flag(&self, key: &str) -> Option<bool> {
        self.entries.get(key).and_then(AttrValue::as_flag)
    }

    /// Remove an attribute, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.entries.remove(key)
    }

    /// Whether the map contains no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over all attributes in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize back to a parameter string that reparses to an
    /// equivalent map.
    ///
    /// Keys are sorted for deterministic output. String values pick a
    /// quote character the value does not contain; flags render as the
    /// bare name or its `no-` negation.
    ///
    /// # Example
    ///
    /// ```
    /// use wikembed_core::attr::AttrMap;
    ///
    /// let attrs = AttrMap::parse(r#"title="My Doc" border no-reference"#);
    /// let reparsed = AttrMap::parse(&attrs.to_params());
    /// assert_eq!(attrs, reparsed);
    /// ```
    #[must_use]
    pub fn to_params(&self) -> String {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();

        let mut out = String::new();
        for key in keys {
            if !out.is_empty() {
                out.push(' ');
            }
            match &self.entries[key] {
                AttrValue::Str(value) => {
                    let quote = pick_quote(value);
                    write!(out, "{key}={quote}{value}{quote}").unwrap();
                }
                AttrValue::Flag(true) => out.push_str(key),
                AttrValue::Flag(false) => {
                    out.push_str("no-");
                    out.push_str(key);
                }
            }
        }
        out
    }
}

/// Pick a quote character not present unescaped in the value.
fn pick_quote(value: &str) -> char {
    for quote in ['"', '\'', '`'] {
        if !value.contains(quote) {
            return quote;
        }
    }
    '"'
}

/// Extract `key="value"` pairs left to right, returning the unconsumed
/// remainder of the input.
fn extract_quoted_pairs(input: &str, map: &mut AttrMap) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut rest = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        if is_word_char(chars[i]) {
            let key_start = i;
            let mut j = i;
            while j < chars.len() && is_word_char(chars[j]) {
                j += 1;
            }
            if let Some(next) = try_quoted_value(&chars, j, map, key_start) {
                i = next;
                continue;
            }
            // Not a pair: emit the whole word so it is not rescanned
            // mid-token.
            rest.extend(&chars[key_start..j]);
            i = j;
        } else {
            rest.push(chars[i]);
            i += 1;
        }
    }

    rest
}

/// Try to consume `= "value"` after the key ending at `key_end`.
///
/// On success stores the attribute and returns the index just past the
/// closing quote.
fn try_quoted_value(
    chars: &[char],
    key_end: usize,
    map: &mut AttrMap,
    key_start: usize,
) -> Option<usize> {
    let mut k = key_end;
    while k < chars.len() && chars[k].is_whitespace() {
        k += 1;
    }
    if chars.get(k) != Some(&'=') {
        return None;
    }
    k += 1;
    while k < chars.len() && chars[k].is_whitespace() {
        k += 1;
    }
    let quote = match chars.get(k) {
        Some(&q @ ('"' | '\'' | '`')) => q,
        _ => return None,
    };
    k += 1;

    let mut value = String::new();
    while k < chars.len() {
        let c = chars[k];
        if c == '\\' && k + 1 < chars.len() {
            // Escapes are preserved verbatim, never unescaped.
            value.push(c);
            value.push(chars[k + 1]);
            k += 2;
        } else if c == quote {
            let key: String = chars[key_start..key_end].iter().collect();
            map.insert(key, AttrValue::Str(value));
            return Some(k + 1);
        } else {
            value.push(c);
            k += 1;
        }
    }
    // Unterminated value: not a pair.
    None
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A matched dimension shorthand token.
enum Dimension {
    /// `WxH` / `W,H`: both dimensions, `px` appended where no unit was
    /// given.
    Pair { width: String, height: String },
    /// A single number carrying a unit.
    HeightOnly(String),
}

/// Match the dimension shorthand anywhere within a token.
///
/// Returns `None` for tokens without digits and for bare unit-less
/// numbers with no second group (those fall through to flag handling).
fn match_dimension(token: &str) -> Option<Dimension> {
    let start = token.find(|c: char| c.is_ascii_digit())?;
    let (first, first_unit, rest) = scan_number(&token[start..])?;

    if let Some(sep) = rest.chars().next() {
        if matches!(sep, ',' | 'x' | 'X') {
            if let Some((second, second_unit, _)) = scan_number(&rest[1..]) {
                return Some(Dimension::Pair {
                    width: with_default_unit(first, first_unit),
                    height: with_default_unit(second, second_unit),
                });
            }
        }
    }

    if let Some(unit) = first_unit {
        return Some(Dimension::HeightOnly(format!("{first}{unit}")));
    }
    None
}

/// Scan digits plus an optional unit suffix, returning the remainder.
fn scan_number(s: &str) -> Option<(&str, Option<&str>, &str)> {
    let digits_end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    if digits_end == 0 {
        return None;
    }
    let (digits, rest) = s.split_at(digits_end);
    for unit in ["%", "em", "pt", "px"] {
        if let Some(after) = rest.strip_prefix(unit) {
            return Some((digits, Some(unit), after));
        }
    }
    Some((digits, None, rest))
}

fn with_default_unit(number: &str, unit: Option<&str>) -> String {
    match unit {
        Some(unit) => format!("{number}{unit}"),
        None => format!("{number}px"),
    }
}

/// Interpret a non-dimension token as a boolean flag.
fn parse_flag(token: &str) -> (String, bool) {
    if let Some(name) = token.strip_prefix("no-").or_else(|| token.strip_prefix("no_")) {
        if !name.is_empty() {
            return (name.to_owned(), false);
        }
    }
    if let Some(name) = token.strip_prefix('!') {
        if !name.is_empty() {
            return (name.to_owned(), false);
        }
    }
    (token.to_owned(), true)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty() {
        let attrs = AttrMap::parse("");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_quoted_pair() {
        let attrs = AttrMap::parse(r#"title="My Document""#);
        assert_eq!(attrs.get_str("title"), Some("My Document"));
    }

    #[test]
    fn test_quote_characters() {
        let attrs = AttrMap::parse(r#"a="double" b='single' c=`backtick`"#);
        assert_eq!(attrs.get_str("a"), Some("double"));
        assert_eq!(attrs.get_str("b"), Some("single"));
        assert_eq!(attrs.get_str("c"), Some("backtick"));
    }

    #[test]
    fn test_mismatched_quotes_not_a_pair() {
        let attrs = AttrMap::parse(r#"a="oops'"#);
        assert_eq!(attrs.get("a"), None);
    }

    #[test]
    fn test_escapes_preserved_verbatim() {
        let attrs = AttrMap::parse(r#"title="say \"hi\"""#);
        assert_eq!(attrs.get_str("title"), Some(r#"say \"hi\""#));
    }

    #[test]
    fn test_other_quote_char_inside_value() {
        let attrs = AttrMap::parse(r#"title="it's fine""#);
        assert_eq!(attrs.get_str("title"), Some("it's fine"));
    }

    #[test]
    fn test_whitespace_around_equals() {
        let attrs = AttrMap::parse(r#"width = "100""#);
        assert_eq!(attrs.get_str("width"), Some("100"));
    }

    #[test]
    fn test_later_pair_wins() {
        let attrs = AttrMap::parse(r#"width="1" width="2""#);
        assert_eq!(attrs.get_str("width"), Some("2"));
    }

    #[test]
    fn test_flag_overwrites_quoted_pair() {
        // Pairs are extracted first, flags after, so the flag wins.
        let attrs = AttrMap::parse(r#"border="1" border"#);
        assert_eq!(attrs.get_flag("border"), Some(true));
    }

    #[test]
    fn test_dimension_pair_defaults_px() {
        let attrs = AttrMap::parse("300x200");
        assert_eq!(attrs.get_str("width"), Some("300px"));
        assert_eq!(attrs.get_str("height"), Some("200px"));
    }

    #[test]
    fn test_dimension_pair_keeps_units() {
        let attrs = AttrMap::parse("50%x30%");
        assert_eq!(attrs.get_str("width"), Some("50%"));
        assert_eq!(attrs.get_str("height"), Some("30%"));
    }

    #[test]
    fn test_dimension_comma_separator() {
        let attrs = AttrMap::parse("640,480");
        assert_eq!(attrs.get_str("width"), Some("640px"));
        assert_eq!(attrs.get_str("height"), Some("480px"));
    }

    #[test]
    fn test_dimension_mixed_units() {
        let attrs = AttrMap::parse("50%x200");
        assert_eq!(attrs.get_str("width"), Some("50%"));
        assert_eq!(attrs.get_str("height"), Some("200px"));
    }

    #[test]
    fn test_single_dimension_with_unit_sets_height() {
        // Long-standing asymmetry: a lone dimensioned token is height.
        let attrs = AttrMap::parse("300px");
        assert_eq!(attrs.get_str("height"), Some("300px"));
        assert_eq!(attrs.get("width"), None);
    }

    #[test]
    fn test_single_em_dimension() {
        let attrs = AttrMap::parse("20em");
        assert_eq!(attrs.get_str("height"), Some("20em"));
    }

    #[test]
    fn test_bare_number_becomes_flag() {
        let attrs = AttrMap::parse("300");
        assert_eq!(attrs.get("width"), None);
        assert_eq!(attrs.get("height"), None);
        assert_eq!(attrs.get_flag("300"), Some(true));
    }

    #[test]
    fn test_negated_flags() {
        let attrs = AttrMap::parse("no-reference no_footer !editable");
        assert_eq!(attrs.get_flag("reference"), Some(false));
        assert_eq!(attrs.get_flag("footer"), Some(false));
        assert_eq!(attrs.get_flag("editable"), Some(false));
    }

    #[test]
    fn test_bare_flag() {
        let attrs = AttrMap::parse("showdate");
        assert_eq!(attrs.get_flag("showdate"), Some(true));
    }

    #[test]
    fn test_arbitrary_token_becomes_flag() {
        // No name validation: punctuation survives into the key.
        let attrs = AttrMap::parse("foo.bar");
        assert_eq!(attrs.get_flag("foo.bar"), Some(true));
    }

    #[test]
    fn test_mixed_arguments() {
        let attrs = AttrMap::parse(r#"title="Q3 Report" 640x480 border no-reference"#);
        assert_eq!(attrs.get_str("title"), Some("Q3 Report"));
        assert_eq!(attrs.get_str("width"), Some("640px"));
        assert_eq!(attrs.get_str("height"), Some("480px"));
        assert_eq!(attrs.get_flag("border"), Some(true));
        assert_eq!(attrs.get_flag("reference"), Some(false));
    }

    #[test]
    fn test_to_params_round_trip() {
        let attrs = AttrMap::parse(r#"title="My Doc" 640x480 border !editable"#);
        let reparsed = AttrMap::parse(&attrs.to_params());
        assert_eq!(attrs, reparsed);
    }

    #[test]
    fn test_to_params_quote_selection() {
        let mut attrs = AttrMap::default();
        attrs.insert("title", AttrValue::Str(r#"has "quotes""#.to_owned()));
        let reparsed = AttrMap::parse(&attrs.to_params());
        assert_eq!(attrs, reparsed);
    }

    #[test]
    fn test_to_params_sorted() {
        let attrs = AttrMap::parse("zeta alpha");
        assert_eq!(attrs.to_params(), "alpha zeta");
    }
}
