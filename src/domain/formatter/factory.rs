//! Formatter factory

use std::sync::Arc;

use crate::config::UrlConfig;

use super::engine::RuleEventFormatter;
use super::extension::FormatterExtension;
use super::script::ScriptEngine;
use super::urls::BaseUrlGenerator;

/// Create a shared formatter from configuration.
///
/// URLs are generated relative to `urls.base_url`. Extensions are asked in
/// the order given.
///
/// # Example
///
/// ```rust,ignore
/// let formatter = create_formatter(&settings.urls, Arc::new(DisabledScriptEngine), vec![]);
/// ```
pub fn create_formatter(
    urls: &UrlConfig,
    script_engine: Arc<dyn ScriptEngine>,
    extensions: Vec<Arc<dyn FormatterExtension>>,
) -> Arc<RuleEventFormatter> {
    tracing::info!(
        base_url = %urls.base_url,
        extensions = extensions.len(),
        "Creating rule event formatter"
    );

    Arc::new(
        RuleEventFormatter::builder(Arc::new(BaseUrlGenerator::new(&urls.base_url)), script_engine)
            .extensions(extensions)
            .build(),
    )
}
