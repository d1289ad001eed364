//! Enriched rule events.
//!
//! Events form a closed set of variants. Every variant carries an
//! [`EventBase`]; the others add capabilities on top:
//!
//! | Variant | User | Schema | Extra |
//! |---------|------|--------|-------|
//! | `UsageExceeded` | - | - | call counters |
//! | `Manual` | yes | - | - |
//! | `Schema` | yes | yes | schema action |
//! | `Content` | yes | yes | content ID, action, data |
//! | `Asset` | yes | - | asset ID, file metadata |
//! | `Comment` | yes | - | text, mentioned user |

mod fields;
mod types;
mod user;

pub use types::{
    AssetAction, AssetEvent, AssetType, CommentEvent, ContentAction, ContentData, ContentEvent,
    Event, EventBase, FieldData, ManualEvent, NamedId, SchemaAction, SchemaEvent,
    UsageExceededEvent,
};
pub use user::{claim_types, Claim, User};
