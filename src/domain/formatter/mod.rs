//! Rule event formatter.
//!
//! Renders notification text, webhook payloads and URLs from enriched events.
//! A template is literal text with `$`-prefixed placeholders:
//!
//! - built-in names: `$APP_NAME`, `$USER_EMAIL`, `$TIMESTAMP_DATE`, ...
//! - event paths: `${CONTENT_DATA.title.iv}` or legacy `$CONTENT_DATA.title.iv`
//! - anything a registered [`FormatterExtension`] claims
//!
//! A whole template of the form `Script(...)` is handed to the
//! [`ScriptEngine`] instead.
//!
//! # Example
//!
//! ```ignore
//! let formatter = RuleEventFormatter::builder(
//!     Arc::new(BaseUrlGenerator::new("https://cms.example.com")),
//!     Arc::new(DisabledScriptEngine),
//! )
//! .build();
//!
//! let text = formatter
//!     .format("$USER_NAME updated ${CONTENT_DATA.title.iv}", &event)
//!     .await?;
//! ```

mod engine;
mod extension;
mod factory;
mod patterns;
mod script;
mod syntax;
mod types;
mod urls;
mod value;

pub use engine::{RuleEventFormatter, RuleEventFormatterBuilder, FALLBACK};
pub use extension::{FormatterExtension, PendingReplacement, SpanMatch};
pub use factory::create_formatter;
pub use patterns::{patterns, Pattern};
pub use script::{DisabledScriptEngine, ScriptContext, ScriptEngine, ScriptError, EVENT_VARIABLE};
pub use syntax::{parse_placeholder, script_body, Path, Placeholder};
pub use types::{FormatError, FormatResult};
pub use urls::{BaseUrlGenerator, UrlGenerator};
pub use value::{resolve, FieldAccess, Node};
