//! Error types for the Happy Kitty Score core
//!
//! The scoring engine itself never fails on well-typed input. These errors only
//! appear at the edges: parsing text into domain types, finalizing an
//! incomplete questionnaire, and validating user input before it reaches the
//! repository.

use crate::models::HealthCategory;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown weight unit: {0}")]
    UnknownUnit(String),

    #[error("Unknown health category: {0}")]
    UnknownCategory(String),

    #[error("Questionnaire incomplete, missing: {}", format_missing(.0))]
    IncompleteAnswers(Vec<HealthCategory>),

    #[error("Validation error: {0}")]
    Validation(String),
}

fn format_missing(missing: &[HealthCategory]) -> String {
    missing
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for fallible core operations
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_answers_message_lists_categories() {
        let err = CoreError::IncompleteAnswers(vec![HealthCategory::Poop, HealthCategory::Mood]);
        assert_eq!(err.to_string(), "Questionnaire incomplete, missing: poop, mood");
    }

    #[test]
    fn test_unknown_unit_message() {
        let err = CoreError::UnknownUnit("stone".to_string());
        assert_eq!(err.to_string(), "Unknown weight unit: stone");
    }
}
