//! Named-field access for event records, used by placeholder paths such as
//! `$CONTENT_DATA.title.iv` or `{EVENT_USER.email}`.

use chrono::{DateTime, SecondsFormat, Utc};

use super::types::{
    AssetEvent, CommentEvent, ContentEvent, Event, EventBase, ManualEvent, NamedId, SchemaEvent,
    UsageExceededEvent,
};
use super::user::User;
use crate::formatter::{FieldAccess, Node};

fn timestamp(value: &DateTime<Utc>) -> Node<'static> {
    Node::owned(value.to_rfc3339_opts(SecondsFormat::Secs, true))
}

fn user_node(value: &Option<User>) -> Node<'_> {
    value.as_ref().map_or(Node::Null, Node::User)
}

impl FieldAccess for NamedId {
    fn field(&self, name: &str) -> Option<Node<'_>> {
        match name.to_ascii_lowercase().as_str() {
            "id" => Some(Node::owned(self.id)),
            "name" => Some(Node::text(&self.name)),
            _ => None,
        }
    }

    fn as_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl FieldAccess for User {
    fn field(&self, name: &str) -> Option<Node<'_>> {
        match name.to_ascii_lowercase().as_str() {
            "id" => Some(Node::text(&self.id)),
            "email" => Some(Node::text(&self.email)),
            _ => None,
        }
    }

    fn as_text(&self) -> Option<String> {
        Some(self.id.clone())
    }
}

impl FieldAccess for EventBase {
    fn field(&self, name: &str) -> Option<Node<'_>> {
        match name.to_ascii_lowercase().as_str() {
            "appid" => Some(Node::Record(&self.app_id)),
            "name" => Some(Node::text(&self.name)),
            "timestamp" => Some(timestamp(&self.timestamp)),
            "version" => Some(Node::owned(self.version)),
            "actor" => Some(Node::text(&self.actor)),
            _ => None,
        }
    }
}

impl FieldAccess for UsageExceededEvent {
    fn field(&self, name: &str) -> Option<Node<'_>> {
        match name.to_ascii_lowercase().as_str() {
            "callscurrent" => Some(Node::owned(self.calls_current)),
            "callslimit" => Some(Node::owned(self.calls_limit)),
            _ => self.base.field(name),
        }
    }
}

impl FieldAccess for ManualEvent {
    fn field(&self, name: &str) -> Option<Node<'_>> {
        match name.to_ascii_lowercase().as_str() {
            "user" => Some(user_node(&self.user)),
            _ => self.base.field(name),
        }
    }
}

impl FieldAccess for SchemaEvent {
    fn field(&self, name: &str) -> Option<Node<'_>> {
        match name.to_ascii_lowercase().as_str() {
            "user" => Some(user_node(&self.user)),
            "schemaid" => Some(Node::Record(&self.schema_id)),
            "type" | "action" => Some(Node::text(self.action.as_str())),
            _ => self.base.field(name),
        }
    }
}

impl FieldAccess for ContentEvent {
    fn field(&self, name: &str) -> Option<Node<'_>> {
        match name.to_ascii_lowercase().as_str() {
            "user" => Some(user_node(&self.user)),
            "schemaid" => Some(Node::Record(&self.schema_id)),
            "id" => Some(Node::owned(self.id)),
            "type" | "action" => Some(Node::text(self.action.as_str())),
            "data" => Some(Node::Data(&self.data)),
            "dataold" => Some(self.data_old.as_ref().map_or(Node::Null, Node::Data)),
            "status" => Some(Node::text(&self.status)),
            "created" => Some(timestamp(&self.created)),
            "lastmodified" => Some(timestamp(&self.last_modified)),
            "createdby" => Some(Node::text(&self.created_by)),
            "lastmodifiedby" => Some(Node::text(&self.last_modified_by)),
            _ => self.base.field(name),
        }
    }
}

impl FieldAccess for AssetEvent {
    fn field(&self, name: &str) -> Option<Node<'_>> {
        match name.to_ascii_lowercase().as_str() {
            "user" => Some(user_node(&self.user)),
            "id" => Some(Node::owned(self.id)),
            "type" | "action" => Some(Node::text(self.action.as_str())),
            "filename" => Some(Node::text(&self.file_name)),
            "mimetype" => Some(Node::text(&self.mime_type)),
            "filesize" => Some(Node::owned(self.file_size)),
            "fileversion" => Some(Node::owned(self.file_version)),
            "assettype" => Some(Node::text(self.asset_type.as_str())),
            _ => self.base.field(name),
        }
    }
}

impl FieldAccess for CommentEvent {
    fn field(&self, name: &str) -> Option<Node<'_>> {
        match name.to_ascii_lowercase().as_str() {
            "user" => Some(user_node(&self.user)),
            "text" => Some(Node::text(&self.text)),
            "url" => Some(self.url.as_deref().map_or(Node::Null, Node::text)),
            "mentioneduser" => Some(Node::User(&self.mentioned_user)),
            _ => self.base.field(name),
        }
    }
}

impl FieldAccess for Event {
    fn field(&self, name: &str) -> Option<Node<'_>> {
        match self {
            Event::UsageExceeded(e) => e.field(name),
            Event::Manual(e) => e.field(name),
            Event::Schema(e) => e.field(name),
            Event::Content(e) => e.field(name),
            Event::Asset(e) => e.field(name),
            Event::Comment(e) => e.field(name),
        }
    }
}
