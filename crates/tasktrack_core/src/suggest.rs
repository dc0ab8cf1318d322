//! Subtask suggestion port.
//!
//! # Responsibility
//! - Define the contract for external checklist suggestion sources.
//!
//! # Invariants
//! - Suggestion failures are opaque to core and never corrupt engine state;
//!   callers surface them as a "suggestions unavailable" condition.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque failure from a suggestion source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionError {
    message: String,
}

impl SuggestionError {
    /// Wraps a provider-specific failure message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the provider-reported message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for SuggestionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "suggestions unavailable: {}", self.message)
    }
}

impl Error for SuggestionError {}

/// Produces candidate subtask texts from a task description.
///
/// The algorithm behind a suggester is not part of this core; callers feed
/// accepted candidates back through the append-subtasks operation.
pub trait SubtaskSuggester {
    /// Returns candidate checklist entries for the given description text.
    fn suggest(&self, description: &str) -> Result<Vec<String>, SuggestionError>;
}
