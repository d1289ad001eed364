//! Script-mode collaborator.
//!
//! A template of the form `Script(<body>)` is not scanned for placeholders;
//! the body goes to a [`ScriptEngine`] together with a [`ScriptContext`] in
//! which the event is bound as `event`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

/// Variable the event is bound to in script mode
pub const EVENT_VARIABLE: &str = "event";

/// Errors raised by script engines
#[derive(Debug, Error)]
pub enum ScriptError {
    /// No engine is configured
    #[error("Script templates are disabled")]
    Disabled,

    /// The engine failed to evaluate the script
    #[error("Script evaluation failed: {0}")]
    Evaluation(String),
}

/// Variables visible to a script
#[derive(Debug, Clone, Default)]
pub struct ScriptContext {
    vars: BTreeMap<String, serde_json::Value>,
}

impl ScriptContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.vars.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.vars.get(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Evaluates script templates.
///
/// Implementations must be thread-safe (`Send + Sync`) as one engine is
/// shared by every render.
#[async_trait]
pub trait ScriptEngine: Send + Sync {
    async fn interpolate(&self, context: &ScriptContext, script: &str)
        -> Result<String, ScriptError>;
}

/// Engine that rejects every script
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledScriptEngine;

#[async_trait]
impl ScriptEngine for DisabledScriptEngine {
    async fn interpolate(
        &self,
        _context: &ScriptContext,
        _script: &str,
    ) -> Result<String, ScriptError> {
        Err(ScriptError::Disabled)
    }
}
