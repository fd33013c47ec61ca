//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Question not found: {0}")]
    QuestionNotFound(String),

    #[error("Invalid difficulty: {0}")]
    InvalidDifficulty(String),

    #[error("Invalid question type: {0}")]
    InvalidQuestionType(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid sort key: {0}")]
    InvalidSortKey(String),

    #[error("Invalid app mode: {0}")]
    InvalidAppMode(String),

    #[error("Batch size must be at least 1")]
    InvalidBatchSize,
}

impl DomainError {
    /// Check if this error refers to a missing question
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::QuestionNotFound(_))
    }
}
