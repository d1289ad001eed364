//! Formatter error definitions

use std::fmt;

use thiserror::Error;

use super::script::ScriptError;

/// Errors that abort rendering.
///
/// Placeholders that cannot be resolved are not errors; they render as the
/// fallback text instead.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A formatter extension failed while resolving a placeholder
    #[error("Formatter extension failed: {0}")]
    Extension(String),

    /// The script engine rejected or failed to evaluate the template
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// Event could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An extension claimed more text than is left, or split a character
    #[error("Extension claimed invalid span of {consumed} bytes at offset {offset}")]
    InvalidSpan { offset: usize, consumed: usize },
}

impl FormatError {
    pub fn extension(err: impl fmt::Display) -> Self {
        FormatError::Extension(err.to_string())
    }
}

/// Result type for formatter operations
pub type FormatResult<T> = Result<T, FormatError>;
