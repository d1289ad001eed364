//! Template scanning and assembly.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use futures::future::{self, try_join_all, FutureExt};
use serde::Serialize;

use crate::event::Event;
use crate::metrics::FormatterMetrics;

use super::extension::{FormatterExtension, PendingReplacement};
use super::patterns;
use super::script::{ScriptContext, ScriptEngine, EVENT_VARIABLE};
use super::syntax;
use super::types::{FormatError, FormatResult};
use super::urls::UrlGenerator;
use super::value::{resolve, Node};

/// Text substituted when a placeholder has no value
pub const FALLBACK: &str = "null";

/// Span of a template: literal text, or the next pending replacement
enum Part<'a> {
    Literal(&'a str),
    Pending,
}

#[derive(Serialize)]
struct Envelope<'a> {
    #[serde(rename = "type")]
    event_type: &'a str,
    payload: &'a Event,
    timestamp: DateTime<Utc>,
}

/// Renders rule templates against enriched events.
///
/// Immutable once built; share it behind an `Arc` across concurrent renders.
pub struct RuleEventFormatter {
    url_generator: Arc<dyn UrlGenerator>,
    script_engine: Arc<dyn ScriptEngine>,
    extensions: Vec<Arc<dyn FormatterExtension>>,
}

/// Builder for [`RuleEventFormatter`]
pub struct RuleEventFormatterBuilder {
    url_generator: Arc<dyn UrlGenerator>,
    script_engine: Arc<dyn ScriptEngine>,
    extensions: Vec<Arc<dyn FormatterExtension>>,
}

impl RuleEventFormatterBuilder {
    /// Register an extension; earlier registrations are asked first
    pub fn extension(mut self, extension: Arc<dyn FormatterExtension>) -> Self {
        self.extensions.push(extension);
        self
    }

    pub fn extensions(
        mut self,
        extensions: impl IntoIterator<Item = Arc<dyn FormatterExtension>>,
    ) -> Self {
        self.extensions.extend(extensions);
        self
    }

    pub fn build(self) -> RuleEventFormatter {
        RuleEventFormatter {
            url_generator: self.url_generator,
            script_engine: self.script_engine,
            extensions: self.extensions,
        }
    }
}

impl RuleEventFormatter {
    pub fn builder(
        url_generator: Arc<dyn UrlGenerator>,
        script_engine: Arc<dyn ScriptEngine>,
    ) -> RuleEventFormatterBuilder {
        RuleEventFormatterBuilder {
            url_generator,
            script_engine,
            extensions: Vec::new(),
        }
    }

    /// Formatter without extensions
    pub fn new(url_generator: Arc<dyn UrlGenerator>, script_engine: Arc<dyn ScriptEngine>) -> Self {
        Self::builder(url_generator, script_engine).build()
    }

    pub fn extension_count(&self) -> usize {
        self.extensions.len()
    }

    /// Serialize any value as a JSON payload
    pub fn to_payload<T: Serialize + ?Sized>(&self, value: &T) -> FormatResult<String> {
        Ok(serde_json::to_string(value)?)
    }

    /// Serialize the event wrapped as `{type, payload, timestamp}`
    pub fn to_envelope(&self, event: &Event) -> FormatResult<String> {
        let base = event.base();

        let envelope = Envelope {
            event_type: &base.name,
            payload: event,
            timestamp: base.timestamp,
        };

        Ok(serde_json::to_string(&envelope)?)
    }

    /// Render `text` for `event`.
    ///
    /// Placeholders without a value render as `"null"`. Fails only when an
    /// extension or the script engine fails.
    #[tracing::instrument(
        name = "formatter.format",
        skip(self, text, event),
        fields(event_kind = event.kind(), event_name = %event.base().name)
    )]
    pub async fn format(&self, text: &str, event: &Event) -> FormatResult<String> {
        let start = Instant::now();

        let result = self.render(text, event).await;

        FormatterMetrics::record_latency(start.elapsed().as_secs_f64());

        if let Err(e) = &result {
            FormatterMetrics::record_failure();
            tracing::warn!(error = %e, "Template rendering failed");
        }

        result
    }

    async fn render(&self, text: &str, event: &Event) -> FormatResult<String> {
        let trimmed = text.trim();

        if trimmed.is_empty() {
            FormatterMetrics::record_render("empty");
            return Ok(text.to_string());
        }

        if let Some(script) = syntax::script_body(trimmed) {
            FormatterMetrics::record_render("script");
            tracing::debug!(script_len = script.len(), "Delegating template to script engine");

            let mut context = ScriptContext::new();
            context.insert(EVENT_VARIABLE, serde_json::to_value(event)?);

            return Ok(self.script_engine.interpolate(&context, script).await?);
        }

        FormatterMetrics::record_render("text");

        let (parts, pending) = self.build_parts(text, event)?;

        tracing::debug!(placeholders = pending.len(), "Resolving placeholders");

        let values = try_join_all(pending).await?;

        Ok(build_text(&parts, values))
    }

    fn build_parts<'a>(
        &'a self,
        text: &'a str,
        event: &'a Event,
    ) -> FormatResult<(Vec<Part<'a>>, Vec<PendingReplacement<'a>>)> {
        let mut parts = Vec::new();
        let mut pending = Vec::new();

        let mut literal_start = 0;
        let mut cursor = 0;

        while let Some(found) = text[cursor..].find('$') {
            let marker = cursor + found;

            parts.push(Part::Literal(&text[literal_start..marker]));

            match self.replacement(&text[marker + 1..], event, marker)? {
                Some((replacement, consumed)) => {
                    parts.push(Part::Pending);
                    pending.push(replacement);

                    cursor = marker + 1 + consumed;
                    literal_start = cursor;
                }
                None => {
                    // Marker stays, as the first character of the next literal
                    literal_start = marker;
                    cursor = marker + 1;
                }
            }
        }

        parts.push(Part::Literal(&text[literal_start..]));

        Ok((parts, pending))
    }

    /// Resolve the placeholder at the start of `text`, returning the pending
    /// value and the bytes it consumed
    fn replacement<'a>(
        &'a self,
        text: &'a str,
        event: &'a Event,
        offset: usize,
    ) -> FormatResult<Option<(PendingReplacement<'a>, usize)>> {
        if let Some(pattern) = patterns::find(text) {
            FormatterMetrics::record_placeholder("pattern");

            let value = pattern.resolve(event, self.url_generator.as_ref());

            return Ok(Some((ready(value), pattern.name.len())));
        }

        for extension in &self.extensions {
            if let Some(span) = extension.format_span(event, text)? {
                if span.consumed == 0 {
                    FormatterMetrics::record_placeholder("unmatched");
                    return Ok(None);
                }

                if text.get(..span.consumed).is_none() {
                    return Err(FormatError::InvalidSpan {
                        offset,
                        consumed: span.consumed,
                    });
                }

                FormatterMetrics::record_placeholder("span");

                return Ok(Some((ready(Some(span.replacement)), span.consumed)));
            }
        }

        let Some(placeholder) = syntax::parse_placeholder(text) else {
            FormatterMetrics::record_placeholder("unmatched");
            tracing::debug!(offset, "No placeholder after marker");
            return Ok(None);
        };

        for extension in &self.extensions {
            if let Some(replacement) = extension.format_path(event, &placeholder.path) {
                FormatterMetrics::record_placeholder("path");
                return Ok(Some((replacement, placeholder.len)));
            }
        }

        FormatterMetrics::record_placeholder("value");

        let (value, remaining) = resolve(Node::Record(event), &placeholder.path);

        if !remaining.is_empty() {
            tracing::debug!(
                kind = placeholder.kind,
                remaining = ?remaining,
                "Placeholder path not found in event"
            );
        }

        Ok(Some((
            ready(value.and_then(|node| node.to_text())),
            placeholder.len,
        )))
    }
}

fn ready<'a>(value: Option<String>) -> PendingReplacement<'a> {
    future::ready(Ok::<_, FormatError>(value)).boxed()
}

fn build_text(parts: &[Part<'_>], values: Vec<Option<String>>) -> String {
    let mut values = values.into_iter();
    let mut output = String::new();

    for part in parts {
        match part {
            Part::Literal(text) => output.push_str(text),
            Part::Pending => {
                let value = values.next().flatten();
                output.push_str(value.as_deref().unwrap_or(FALLBACK));
            }
        }
    }

    output
}
