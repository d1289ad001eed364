//! Placeholder and script-mode syntax.
//!
//! Two placeholder forms follow the `$` marker:
//!
//! - braced: `{TYPE_path.to.value}`
//! - legacy: `TYPE_path.to.value`, ending at the first whitespace
//!
//! `TYPE` is everything before the first underscore. The path is split on `.`
//! with empty segments dropped.

use lazy_static::lazy_static;
use regex::Regex;
use smallvec::SmallVec;

lazy_static! {
    static ref BRACED_PLACEHOLDER: Regex =
        Regex::new(r"^\{(?P<type>[^_]*)_(?P<path>[^\s]*)\}").unwrap();
    static ref LEGACY_PLACEHOLDER: Regex =
        Regex::new(r"^(?P<type>[^_]*)_(?P<path>[^\s]*)").unwrap();
}

const SCRIPT_PREFIX: &str = "Script(";
const SCRIPT_SUFFIX: &str = ")";

/// Path segments of a placeholder, borrowed from the template
pub type Path<'a> = SmallVec<[&'a str; 4]>;

/// A placeholder recognized right after a `$` marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Text before the first underscore
    pub kind: &'a str,
    /// Dotted path after the underscore
    pub path: Path<'a>,
    /// Bytes consumed, excluding the marker
    pub len: usize,
}

/// Parse a placeholder at the start of `text`, braced form first
pub fn parse_placeholder(text: &str) -> Option<Placeholder<'_>> {
    let captures = BRACED_PLACEHOLDER
        .captures(text)
        .or_else(|| LEGACY_PLACEHOLDER.captures(text))?;

    let kind = captures.name("type").map_or("", |m| m.as_str());
    let path = captures
        .name("path")
        .map_or("", |m| m.as_str())
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect();
    let len = captures.get(0).map_or(0, |m| m.end());

    Some(Placeholder { kind, path, len })
}

/// Body of a `Script(...)` template; the keyword ignores ASCII case
pub fn script_body(text: &str) -> Option<&str> {
    if text.len() < SCRIPT_PREFIX.len() + SCRIPT_SUFFIX.len() {
        return None;
    }

    let prefix = text.get(..SCRIPT_PREFIX.len())?;

    if !prefix.eq_ignore_ascii_case(SCRIPT_PREFIX) || !text.ends_with(SCRIPT_SUFFIX) {
        return None;
    }

    text.get(SCRIPT_PREFIX.len()..text.len() - SCRIPT_SUFFIX.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braced_placeholder() {
        let placeholder = parse_placeholder("{CONTENT_DATA.title.iv} rest").unwrap();

        assert_eq!(placeholder.kind, "CONTENT");
        assert_eq!(placeholder.path.as_slice(), &["DATA", "title", "iv"]);
        assert_eq!(placeholder.len, "{CONTENT_DATA.title.iv}".len());
    }

    #[test]
    fn test_legacy_placeholder_ends_at_whitespace() {
        let placeholder = parse_placeholder("EVENT_user.email was here").unwrap();

        assert_eq!(placeholder.kind, "EVENT");
        assert_eq!(placeholder.path.as_slice(), &["user", "email"]);
        assert_eq!(placeholder.len, "EVENT_user.email".len());
    }

    #[test]
    fn test_empty_segments_dropped() {
        let placeholder = parse_placeholder("{EVENT_..data..title.}").unwrap();
        assert_eq!(placeholder.path.as_slice(), &["data", "title"]);
    }

    #[test]
    fn test_unclosed_brace_falls_back_to_legacy() {
        let placeholder = parse_placeholder("{EVENT_data.title and more").unwrap();

        assert_eq!(placeholder.kind, "{EVENT");
        assert_eq!(placeholder.len, "{EVENT_data.title".len());
    }

    #[test]
    fn test_no_underscore_is_not_a_placeholder() {
        assert!(parse_placeholder("5.00").is_none());
        assert!(parse_placeholder("").is_none());
    }

    #[test]
    fn test_script_body() {
        assert_eq!(script_body("Script(1+1)"), Some("1+1"));
        assert_eq!(script_body("script(event.name)"), Some("event.name"));
        assert_eq!(script_body("SCRIPT()"), Some(""));
        assert_eq!(script_body("Script(a) + Script(b)"), Some("a) + Script(b"));
    }

    #[test]
    fn test_not_a_script() {
        assert_eq!(script_body("Script(1+1"), None);
        assert_eq!(script_body("Scripts(1)"), None);
        assert_eq!(script_body("Hello Script(1)"), None);
        assert_eq!(script_body("Scrïpt(1)"), None);
    }
}
