//! Dotted-path tokenizer.
//!
//! A path is split on `.`; a segment made only of ASCII digits is an array
//! index, anything else is a mapping key. There is no escaping of dots. A key
//! may carry the `##` prefix so that a digits-only name can still be used as a
//! literal key (`"##1"` addresses key `"1"`, not index 1).

/// Prefix that forces a digits-only segment to be treated as a key.
pub const KEY_ESCAPE: &str = "##";

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// One atomic unit of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Mapping key, with any `##` escape already stripped.
    Key(&'a str),
    /// Array index together with its original text.
    Index(usize, &'a str),
}

impl<'a> Segment<'a> {
    /// Text used when this segment is looked up in a mapping.
    ///
    /// Index segments fall back to their digits, so `{"1": ..}` is still
    /// reachable through `"1"` during traversal.
    pub fn key(&self) -> &'a str {
        match *self {
            Segment::Key(key) => key,
            Segment::Index(_, raw) => raw,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match *self {
            Segment::Key(_) => None,
            Segment::Index(index, _) => Some(index),
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(..))
    }
}

/// Check if a string consists only of ASCII digits.
///
/// # Example
///
/// ```
/// use dataschema_value::path::is_integer;
///
/// assert!(is_integer("0"));
/// assert!(is_integer("007"));
/// assert!(!is_integer(""));
/// assert!(!is_integer("-1"));
/// assert!(!is_integer("1.5"));
/// ```
pub fn is_integer(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Strip the `##` key escape, if present.
pub fn unescape_key(key: &str) -> &str {
    key.strip_prefix(KEY_ESCAPE).unwrap_or(key)
}

/// Classify a single raw segment.
///
/// Digits that overflow `usize` cannot address any element, so they are
/// kept as a key.
pub fn classify(raw: &str) -> Segment<'_> {
    if is_integer(raw) {
        if let Ok(index) = raw.parse::<usize>() {
            return Segment::Index(index, raw);
        }
        return Segment::Key(raw);
    }
    Segment::Key(unescape_key(raw))
}

/// Split a dotted path into segments.
///
/// The empty path is a single empty key, matching how `"".split('.')`
/// behaves.
///
/// # Example
///
/// ```
/// use dataschema_value::path::{parse_path, Segment};
///
/// assert_eq!(
///     parse_path("items.3.##7"),
///     vec![Segment::Key("items"), Segment::Index(3, "3"), Segment::Key("7")]
/// );
/// ```
pub fn parse_path(path: &str) -> Vec<Segment<'_>> {
    path.split(PATH_SEPARATOR).map(classify).collect()
}

/// Append a segment to a base path, omitting the separator when the base is
/// empty.
///
/// # Example
///
/// ```
/// use dataschema_value::path::join_path;
///
/// assert_eq!(join_path("", "orders"), "orders");
/// assert_eq!(join_path("orders.0", "items"), "orders.0.items");
/// ```
pub fn join_path(base: &str, segment: &str) -> String {
    if base.is_empty() {
        return segment.to_string();
    }
    let mut out = String::with_capacity(base.len() + segment.len() + 1);
    out.push_str(base);
    out.push(PATH_SEPARATOR);
    out.push_str(segment);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_index() {
        assert_eq!(classify("0"), Segment::Index(0, "0"));
        assert_eq!(classify("12"), Segment::Index(12, "12"));
        assert_eq!(classify("007"), Segment::Index(7, "007"));
    }

    #[test]
    fn test_classify_key() {
        assert_eq!(classify("name"), Segment::Key("name"));
        assert_eq!(classify("-1"), Segment::Key("-1"));
        assert_eq!(classify("1a"), Segment::Key("1a"));
        assert_eq!(classify(""), Segment::Key(""));
    }

    #[test]
    fn test_classify_escape() {
        assert_eq!(classify("##1"), Segment::Key("1"));
        assert_eq!(classify("##name"), Segment::Key("name"));
        assert_eq!(classify("#1"), Segment::Key("#1"));
    }

    #[test]
    fn test_classify_overflowing_digits() {
        let raw = "99999999999999999999999999";
        assert_eq!(classify(raw), Segment::Key(raw));
    }

    #[test]
    fn test_segment_key_text() {
        assert_eq!(classify("3").key(), "3");
        assert_eq!(classify("##3").key(), "3");
        assert_eq!(classify("3").index(), Some(3));
        assert_eq!(classify("a").index(), None);
    }

    #[test]
    fn test_parse_path_empty() {
        assert_eq!(parse_path(""), vec![Segment::Key("")]);
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "0"), "0");
        assert_eq!(join_path("a", "0"), "a.0");
        assert_eq!(join_path("a.0", "b"), "a.0.b");
    }
}
