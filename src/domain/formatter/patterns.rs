//! Built-in placeholders such as `$APP_NAME` or `$USER_EMAIL`.
//!
//! Names match as ASCII case-insensitive prefixes of the text after the `$`
//! marker, in table order. A resolver returns `None` when the event variant
//! does not carry the value, which renders as the fallback text.

use crate::event::Event;

use super::urls::UrlGenerator;

type Resolver = fn(&Event, &dyn UrlGenerator) -> Option<String>;

/// A named built-in placeholder
pub struct Pattern {
    pub name: &'static str,
    resolver: Resolver,
}

impl Pattern {
    pub fn resolve(&self, event: &Event, urls: &dyn UrlGenerator) -> Option<String> {
        (self.resolver)(event, urls)
    }

    fn matches(&self, text: &str) -> bool {
        text.as_bytes()
            .get(..self.name.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(self.name.as_bytes()))
    }
}

/// `TIMESTAMP_DATETIME` must come before its prefix `TIMESTAMP_DATE`.
static PATTERNS: &[Pattern] = &[
    Pattern { name: "APP_ID", resolver: app_id },
    Pattern { name: "APP_NAME", resolver: app_name },
    Pattern { name: "ASSET_CONTENT_URL", resolver: asset_content_url },
    Pattern { name: "CONTENT_ACTION", resolver: content_action },
    Pattern { name: "CONTENT_URL", resolver: content_url },
    Pattern { name: "MENTIONED_ID", resolver: mentioned_id },
    Pattern { name: "MENTIONED_NAME", resolver: mentioned_name },
    Pattern { name: "MENTIONED_EMAIL", resolver: mentioned_email },
    Pattern { name: "SCHEMA_ID", resolver: schema_id },
    Pattern { name: "SCHEMA_NAME", resolver: schema_name },
    Pattern { name: "TIMESTAMP_DATETIME", resolver: timestamp_datetime },
    Pattern { name: "TIMESTAMP_DATE", resolver: timestamp_date },
    Pattern { name: "USER_ID", resolver: user_id },
    Pattern { name: "USER_NAME", resolver: user_name },
    Pattern { name: "USER_EMAIL", resolver: user_email },
];

/// All built-in placeholders in match order
pub fn patterns() -> &'static [Pattern] {
    PATTERNS
}

/// First built-in placeholder that prefixes `text`
pub fn find(text: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|pattern| pattern.matches(text))
}

fn app_id(event: &Event, _: &dyn UrlGenerator) -> Option<String> {
    Some(event.base().app_id.id.to_string())
}

fn app_name(event: &Event, _: &dyn UrlGenerator) -> Option<String> {
    Some(event.base().app_id.name.clone())
}

fn asset_content_url(event: &Event, urls: &dyn UrlGenerator) -> Option<String> {
    event.as_asset().map(|asset| urls.asset_content(asset.id))
}

fn content_action(event: &Event, _: &dyn UrlGenerator) -> Option<String> {
    event.as_content().map(|content| content.action.to_string())
}

fn content_url(event: &Event, urls: &dyn UrlGenerator) -> Option<String> {
    event
        .as_content()
        .map(|content| urls.content_ui(&content.base.app_id, &content.schema_id, content.id))
}

fn mentioned_id(event: &Event, _: &dyn UrlGenerator) -> Option<String> {
    event.as_comment().map(|c| c.mentioned_user.id.clone())
}

fn mentioned_name(event: &Event, _: &dyn UrlGenerator) -> Option<String> {
    event
        .as_comment()
        .and_then(|c| c.mentioned_user.display_name())
        .map(str::to_string)
}

fn mentioned_email(event: &Event, _: &dyn UrlGenerator) -> Option<String> {
    event.as_comment().map(|c| c.mentioned_user.email.clone())
}

fn schema_id(event: &Event, _: &dyn UrlGenerator) -> Option<String> {
    event.schema_id().map(|schema| schema.id.to_string())
}

fn schema_name(event: &Event, _: &dyn UrlGenerator) -> Option<String> {
    event.schema_id().map(|schema| schema.name.clone())
}

fn timestamp_date(event: &Event, _: &dyn UrlGenerator) -> Option<String> {
    Some(event.base().timestamp.format("%Y-%m-%d").to_string())
}

// 12-hour clock, no AM/PM marker
fn timestamp_datetime(event: &Event, _: &dyn UrlGenerator) -> Option<String> {
    Some(event.base().timestamp.format("%Y-%m-%d-%I-%M-%S").to_string())
}

fn user_id(event: &Event, _: &dyn UrlGenerator) -> Option<String> {
    event.user().map(|user| user.id.clone())
}

fn user_name(event: &Event, _: &dyn UrlGenerator) -> Option<String> {
    event
        .user()
        .and_then(|user| user.display_name())
        .map(str::to_string)
}

fn user_email(event: &Event, _: &dyn UrlGenerator) -> Option<String> {
    event.user().map(|user| user.email.clone())
}
