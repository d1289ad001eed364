//! Domain layer
//!
//! - `event`: enriched rule events and their named-field access
//! - `formatter`: template rendering over events

pub mod event;
pub mod formatter;
