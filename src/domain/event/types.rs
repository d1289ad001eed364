use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;

/// Identity with a stable ID and a display name (apps, schemas)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedId {
    pub id: Uuid,
    pub name: String,
}

impl NamedId {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for NamedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.id, self.name)
    }
}

/// Values of one content field, keyed by partition (language or `iv`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldData(BTreeMap<String, serde_json::Value>);

impl FieldData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a partition value
    pub fn with(mut self, partition: impl Into<String>, value: serde_json::Value) -> Self {
        self.0.insert(partition.into(), value);
        self
    }

    pub fn get(&self, partition: &str) -> Option<&serde_json::Value> {
        self.0.get(partition)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Content fields keyed by field name; a field may be explicitly null
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentData(BTreeMap<String, Option<FieldData>>);

impl ContentData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field
    pub fn with(mut self, field: impl Into<String>, data: FieldData) -> Self {
        self.0.insert(field.into(), Some(data));
        self
    }

    /// Add a field whose value is null
    pub fn with_null(mut self, field: impl Into<String>) -> Self {
        self.0.insert(field.into(), None);
        self
    }

    /// Field by exact name; missing and null fields both yield `None`
    pub fn get(&self, field: &str) -> Option<&FieldData> {
        self.0.get(field).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Fields shared by every event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBase {
    /// App the event belongs to
    pub app_id: NamedId,
    /// Event name (e.g. "ArticleCreated")
    pub name: String,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// Aggregate version after the event
    #[serde(default)]
    pub version: i64,
    /// Actor token (e.g. "subject:123", "client:frontend")
    #[serde(default)]
    pub actor: String,
}

impl EventBase {
    pub fn new(app_id: NamedId, name: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            app_id,
            name: name.into(),
            timestamp,
            version: 0,
            actor: String::new(),
        }
    }
}

/// What happened to a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ContentAction {
    Created,
    Updated,
    Deleted,
    Published,
    Unpublished,
    StatusChanged,
}

impl ContentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentAction::Created => "Created",
            ContentAction::Updated => "Updated",
            ContentAction::Deleted => "Deleted",
            ContentAction::Published => "Published",
            ContentAction::Unpublished => "Unpublished",
            ContentAction::StatusChanged => "StatusChanged",
        }
    }
}

/// What happened to an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum AssetAction {
    Created,
    Updated,
    Annotated,
    Deleted,
}

impl AssetAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetAction::Created => "Created",
            AssetAction::Updated => "Updated",
            AssetAction::Annotated => "Annotated",
            AssetAction::Deleted => "Deleted",
        }
    }
}

/// What happened to a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SchemaAction {
    Created,
    Updated,
    Deleted,
    Published,
    Unpublished,
}

impl SchemaAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaAction::Created => "Created",
            SchemaAction::Updated => "Updated",
            SchemaAction::Deleted => "Deleted",
            SchemaAction::Published => "Published",
            SchemaAction::Unpublished => "Unpublished",
        }
    }
}

/// Media kind of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub enum AssetType {
    #[default]
    Unknown,
    Image,
    Audio,
    Video,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Unknown => "Unknown",
            AssetType::Image => "Image",
            AssetType::Audio => "Audio",
            AssetType::Video => "Video",
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display_as_str!(ContentAction, AssetAction, SchemaAction, AssetType);

/// API usage went over the configured limit (no user, no schema)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageExceededEvent {
    #[serde(flatten)]
    pub base: EventBase,
    pub calls_current: i64,
    pub calls_limit: i64,
}

/// Rule triggered by hand from the management UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualEvent {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub user: Option<User>,
}

/// Schema lifecycle change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaEvent {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub user: Option<User>,
    pub schema_id: NamedId,
    pub action: SchemaAction,
}

/// Content item change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEvent {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub user: Option<User>,
    pub schema_id: NamedId,
    pub id: Uuid,
    pub action: ContentAction,
    #[serde(default)]
    pub data: ContentData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_old: Option<ContentData>,
    #[serde(default)]
    pub status: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub last_modified_by: String,
}

/// Asset change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetEvent {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub user: Option<User>,
    pub id: Uuid,
    pub action: AssetAction,
    pub file_name: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub file_size: i64,
    #[serde(default)]
    pub file_version: i64,
    #[serde(default)]
    pub asset_type: AssetType,
}

/// Comment mentioning another user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentEvent {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub user: Option<User>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub mentioned_user: User,
}

/// Enriched domain event a rule fired for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    UsageExceeded(UsageExceededEvent),
    Manual(ManualEvent),
    Schema(SchemaEvent),
    Content(ContentEvent),
    Asset(AssetEvent),
    Comment(CommentEvent),
}

impl Event {
    /// Fields every variant carries
    pub fn base(&self) -> &EventBase {
        match self {
            Event::UsageExceeded(e) => &e.base,
            Event::Manual(e) => &e.base,
            Event::Schema(e) => &e.base,
            Event::Content(e) => &e.base,
            Event::Asset(e) => &e.base,
            Event::Comment(e) => &e.base,
        }
    }

    /// The acting user, if this variant carries one and it is known
    pub fn user(&self) -> Option<&User> {
        match self {
            Event::UsageExceeded(_) => None,
            Event::Manual(e) => e.user.as_ref(),
            Event::Schema(e) => e.user.as_ref(),
            Event::Content(e) => e.user.as_ref(),
            Event::Asset(e) => e.user.as_ref(),
            Event::Comment(e) => e.user.as_ref(),
        }
    }

    /// Schema identity for schema-scoped variants
    pub fn schema_id(&self) -> Option<&NamedId> {
        match self {
            Event::Schema(e) => Some(&e.schema_id),
            Event::Content(e) => Some(&e.schema_id),
            _ => None,
        }
    }

    pub fn as_content(&self) -> Option<&ContentEvent> {
        match self {
            Event::Content(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_asset(&self) -> Option<&AssetEvent> {
        match self {
            Event::Asset(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&CommentEvent> {
        match self {
            Event::Comment(e) => Some(e),
            _ => None,
        }
    }

    /// Variant name, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Event::UsageExceeded(_) => "usageExceeded",
            Event::Manual(_) => "manual",
            Event::Schema(_) => "schema",
            Event::Content(_) => "content",
            Event::Asset(_) => "asset",
            Event::Comment(_) => "comment",
        }
    }
}
