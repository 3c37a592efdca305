//! Domain errors raised while collecting and scoring ratings.

use thiserror::Error;

/// Errors produced by intake validation and aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// A rating was not an integer between 1 and 5.
    #[error("Invalid rating for '{question}': '{value}' ({reason})")]
    InvalidRating {
        question: String,
        value: String,
        reason: String,
    },

    /// An answer referenced a question that is not part of the survey.
    #[error("Unknown question '{id}'")]
    UnknownQuestion { id: String },

    /// A record is missing one or more ratings.
    #[error("Incomplete record: {} question(s) unanswered ({})", missing.len(), missing.join(", "))]
    IncompleteRecord { missing: Vec<String> },
}

impl AssessmentError {
    /// Creates an invalid rating error.
    pub fn invalid_rating(
        question: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        AssessmentError::InvalidRating {
            question: question.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown question error.
    pub fn unknown_question(id: impl Into<String>) -> Self {
        AssessmentError::UnknownQuestion { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_record_message_lists_missing() {
        let err = AssessmentError::IncompleteRecord {
            missing: vec!["learning".to_string(), "adaptability".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Incomplete record: 2 question(s) unanswered (learning, adaptability)"
        );
    }

    #[test]
    fn test_invalid_rating_message() {
        let err = AssessmentError::invalid_rating("creativity", "7", "must be between 1 and 5");
        assert!(err.to_string().contains("creativity"));
        assert!(err.to_string().contains("'7'"));
    }
}
