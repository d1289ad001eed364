//! Dotted-path lookup over event graphs.
//!
//! Events mix several kinds of values: content data maps, JSON trees, user
//! principals with claims, and plain records. [`resolve`] walks a path through
//! all of them, picking the lookup strategy from the kind of the current node.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use crate::event::{claim_types, ContentData, FieldData, User};

/// Read access to named fields of a structured record.
///
/// Implementations compare `name` ignoring ASCII case. Returning
/// `Some(Node::Null)` means the field exists but has no value.
pub trait FieldAccess: Send + Sync {
    fn field(&self, name: &str) -> Option<Node<'_>>;

    /// Text form used when the record itself is the resolved value
    fn as_text(&self) -> Option<String> {
        None
    }
}

/// One step of a path walk
#[derive(Clone)]
pub enum Node<'a> {
    Null,
    Text(Cow<'a, str>),
    Json(&'a Value),
    Data(&'a ContentData),
    Field(&'a FieldData),
    User(&'a User),
    Record(&'a dyn FieldAccess),
}

impl<'a> Node<'a> {
    pub fn text(value: &'a str) -> Self {
        Node::Text(Cow::Borrowed(value))
    }

    pub fn owned(value: impl ToString) -> Self {
        Node::Text(Cow::Owned(value.to_string()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null | Node::Json(Value::Null))
    }

    /// Text substituted into a template; `None` renders as the fallback
    pub fn to_text(&self) -> Option<String> {
        match self {
            Node::Null => None,
            Node::Text(text) => Some(text.to_string()),
            Node::Json(Value::Null) => None,
            Node::Json(Value::String(text)) => Some(text.clone()),
            Node::Json(value) => Some(value.to_string()),
            Node::Data(data) => serde_json::to_string(data).ok(),
            Node::Field(field) => serde_json::to_string(field).ok(),
            Node::User(user) => Some(user.id.clone()),
            Node::Record(record) => record.as_text(),
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => f.write_str("Null"),
            Node::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Node::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Node::Data(data) => f.debug_tuple("Data").field(data).finish(),
            Node::Field(field) => f.debug_tuple("Field").field(field).finish(),
            Node::User(user) => f.debug_tuple("User").field(&user.id).finish(),
            Node::Record(record) => f.debug_tuple("Record").field(&record.as_text()).finish(),
        }
    }
}

/// Walk `path` starting at `root`.
///
/// Returns the value at the end of the path and an empty remainder, or `None`
/// and the segments that could not be consumed (starting with the one that
/// failed).
pub fn resolve<'a, 'p, S: AsRef<str>>(root: Node<'a>, path: &'p [S]) -> (Option<Node<'a>>, &'p [S]) {
    let mut current = root;

    for (i, segment) in path.iter().enumerate() {
        let segment = segment.as_ref();

        let next = match current {
            Node::Null | Node::Text(_) => None,
            Node::Data(data) => data.get(segment).map(Node::Field),
            Node::Field(field) => field
                .get(segment)
                .filter(|value| !value.is_null())
                .map(Node::Json),
            Node::Json(value) => json_child(value, segment).map(Node::Json),
            Node::User(user) => user_child(user, segment),
            Node::Record(record) => record.field(segment),
        };

        match next {
            Some(node) => current = node,
            None => return (None, &path[i..]),
        }
    }

    let value = if current.is_null() { None } else { Some(current) };

    (value, &path[path.len()..])
}

fn json_child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    let child = match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    };

    child.filter(|child| !child.is_null())
}

fn user_child<'a>(user: &'a User, segment: &str) -> Option<Node<'a>> {
    let claim_type = if segment.eq_ignore_ascii_case("name") {
        claim_types::DISPLAY_NAME
    } else {
        segment
    };

    match user.claim(claim_type) {
        Some(value) => Some(Node::text(value)),
        None => user.field(segment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Article {
        title: String,
        subtitle: Option<String>,
        tags: Value,
    }

    impl FieldAccess for Article {
        fn field(&self, name: &str) -> Option<Node<'_>> {
            match name.to_ascii_lowercase().as_str() {
                "title" => Some(Node::text(&self.title)),
                "subtitle" => Some(self.subtitle.as_deref().map_or(Node::Null, Node::text)),
                "tags" => Some(Node::Json(&self.tags)),
                _ => None,
            }
        }

        fn as_text(&self) -> Option<String> {
            Some(self.title.clone())
        }
    }

    fn article() -> Article {
        Article {
            title: "Hello".to_string(),
            subtitle: None,
            tags: json!({ "primary": ["news", "tech"], "empty": null }),
        }
    }

    fn text_of(node: Option<Node<'_>>) -> Option<String> {
        node.and_then(|n| n.to_text())
    }

    #[test]
    fn test_record_field_ignores_case() {
        let article = article();
        let (value, remaining) = resolve(Node::Record(&article), &["TITLE"]);

        assert_eq!(text_of(value), Some("Hello".to_string()));
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_missing_first_segment_returns_full_path() {
        let article = article();
        let path = ["author", "name"];
        let (value, remaining) = resolve(Node::Record(&article), &path);

        assert!(value.is_none());
        assert_eq!(remaining, &path[..]);
    }

    #[test]
    fn test_null_field_stops_before_next_segment() {
        let article = article();
        let (value, remaining) = resolve(Node::Record(&article), &["subtitle", "length"]);

        assert!(value.is_none());
        assert_eq!(remaining, &["length"]);
    }

    #[test]
    fn test_null_field_at_end_is_unresolved() {
        let article = article();
        let (value, remaining) = resolve(Node::Record(&article), &["subtitle"]);

        assert!(value.is_none());
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_json_object_and_array_lookup() {
        let article = article();
        let (value, remaining) = resolve(Node::Record(&article), &["tags", "primary", "1"]);

        assert_eq!(text_of(value), Some("tech".to_string()));
        assert!(remaining.is_empty());

        let (value, remaining) = resolve(Node::Record(&article), &["tags", "primary", "7"]);
        assert!(value.is_none());
        assert_eq!(remaining, &["7"]);
    }

    #[test]
    fn test_json_null_is_absent() {
        let article = article();
        let (value, remaining) = resolve(Node::Record(&article), &["tags", "empty"]);

        assert!(value.is_none());
        assert_eq!(remaining, &["empty"]);
    }

    #[test]
    fn test_json_container_stringifies_as_json() {
        let article = article();
        let (value, _) = resolve(Node::Record(&article), &["tags", "primary"]);

        assert_eq!(text_of(value), Some(r#"["news","tech"]"#.to_string()));
    }

    #[test]
    fn test_content_data_lookup_is_exact() {
        let data = ContentData::new()
            .with("title", FieldData::new().with("iv", json!("Hello")))
            .with_null("body");

        let (value, _) = resolve(Node::Data(&data), &["title", "iv"]);
        assert_eq!(text_of(value), Some("Hello".to_string()));

        let (value, remaining) = resolve(Node::Data(&data), &["Title", "iv"]);
        assert!(value.is_none());
        assert_eq!(remaining, &["Title", "iv"]);

        let (value, remaining) = resolve(Node::Data(&data), &["body", "iv"]);
        assert!(value.is_none());
        assert_eq!(remaining, &["body", "iv"]);
    }

    #[test]
    fn test_user_name_maps_to_display_name_claim() {
        let user = User::new("u1", "jane@example.com").with_display_name("Jane");

        let (value, _) = resolve(Node::User(&user), &["Name"]);
        assert_eq!(text_of(value), Some("Jane".to_string()));

        let (value, _) = resolve(Node::User(&user), &["urn:squidex:NAME"]);
        assert_eq!(text_of(value), Some("Jane".to_string()));
    }

    #[test]
    fn test_user_falls_back_to_record_fields() {
        let user = User::new("u1", "jane@example.com");

        let (value, _) = resolve(Node::User(&user), &["email"]);
        assert_eq!(text_of(value), Some("jane@example.com".to_string()));

        let (value, remaining) = resolve(Node::User(&user), &["name"]);
        assert!(value.is_none());
        assert_eq!(remaining, &["name"]);
    }

    #[test]
    fn test_claim_value_has_no_fields() {
        let user = User::new("u1", "jane@example.com").with_display_name("Jane");
        let (value, remaining) = resolve(Node::User(&user), &["name", "length"]);

        assert!(value.is_none());
        assert_eq!(remaining, &["length"]);
    }

    #[test]
    fn test_empty_path_returns_root() {
        let article = article();
        let path: [&str; 0] = [];
        let (value, remaining) = resolve(Node::Record(&article), &path);

        assert_eq!(text_of(value), Some("Hello".to_string()));
        assert!(remaining.is_empty());
    }
}
