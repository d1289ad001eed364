//! Pluggable placeholder resolvers.
//!
//! Extensions are asked in registration order, first match wins, at two
//! points:
//!
//! 1. [`FormatterExtension::format_span`] right after the built-in table
//!    misses, with the raw text after the `$` marker. Lets an extension claim
//!    its own syntax.
//! 2. [`FormatterExtension::format_path`] once the text parsed as a
//!    `TYPE_path` placeholder. Lets an extension resolve a path namespace,
//!    possibly asynchronously.
//!
//! Errors from either hook abort the render.

use futures::future::BoxFuture;

use crate::event::Event;

use super::types::FormatResult;

/// Replacement claimed by [`FormatterExtension::format_span`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanMatch {
    pub replacement: String,
    /// Bytes consumed after the `$` marker
    pub consumed: usize,
}

impl SpanMatch {
    pub fn new(replacement: impl Into<String>, consumed: usize) -> Self {
        Self {
            replacement: replacement.into(),
            consumed,
        }
    }
}

/// Pending replacement; `None` renders as the fallback text
pub type PendingReplacement<'a> = BoxFuture<'a, FormatResult<Option<String>>>;

pub trait FormatterExtension: Send + Sync {
    fn format_span(&self, _event: &Event, _text: &str) -> FormatResult<Option<SpanMatch>> {
        Ok(None)
    }

    fn format_path<'a>(
        &'a self,
        _event: &'a Event,
        _path: &[&str],
    ) -> Option<PendingReplacement<'a>> {
        None
    }
}
