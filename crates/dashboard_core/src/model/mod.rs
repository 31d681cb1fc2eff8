//! Widget records and their validation rules.
//!
//! # Invariants
//! - Every id-bearing record's id is unique within its collection.
//! - Stored text fields are trimmed and non-empty.
//! - Wire names match the persisted JSON layout (`id`, `text`, `completed`, ...).

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod goal;
pub mod mood;
pub mod note;
pub mod todo;

/// Integer id, unique within one collection.
pub type RecordId = u64;

/// User input rejected before any state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty after trimming whitespace.
    EmptyText { field: &'static str },
    /// A mood name outside the supported set.
    UnknownMood(String),
    /// A pomodoro mode name outside the supported set.
    UnknownMode(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText { field } => write!(f, "`{field}` cannot be empty"),
            Self::UnknownMood(value) => write!(f, "unknown mood `{value}`"),
            Self::UnknownMode(value) => write!(f, "unknown pomodoro mode `{value}`"),
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText { field });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{require_text, ValidationError};

    #[test]
    fn require_text_trims_surrounding_whitespace() {
        assert_eq!(require_text("text", "  walk the dog \n").unwrap(), "walk the dog");
    }

    #[test]
    fn require_text_rejects_whitespace_only() {
        assert_eq!(
            require_text("text", " \t ").unwrap_err(),
            ValidationError::EmptyText { field: "text" }
        );
    }
}
