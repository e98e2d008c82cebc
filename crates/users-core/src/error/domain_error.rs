//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::classifier::ClassifierError;
use crate::value_objects::UserId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    /// The id is kept for logs; the message stays fixed for API consumers.
    #[error("User not found")]
    UserNotFound(UserId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Classifier Errors
    // =========================================================================
    #[error("Degenerate training set: {0}")]
    DegenerateTrainingSet(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::DegenerateTrainingSet(_) => "DEGENERATE_TRAINING_SET",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if the classifier could not be trained on the stored data
    pub fn is_degenerate_training_set(&self) -> bool {
        matches!(self, Self::DegenerateTrainingSet(_))
    }
}

impl From<ClassifierError> for DomainError {
    fn from(err: ClassifierError) -> Self {
        Self::DegenerateTrainingSet(err.to_string())
    }
}
