//! Application error types
//!
//! Failures while bringing the server up. Request errors never reach this
//! type; they are rendered by the API layer.

use users_core::DomainError;

/// Startup error of the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// HTTP status code for a domain error
#[must_use]
pub fn domain_status_code(err: &DomainError) -> u16 {
    if err.is_not_found() {
        404
    } else if err.is_validation() {
        400
    } else if err.is_degenerate_training_set() {
        422
    } else {
        500
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use users_core::UserId;

    #[test]
    fn test_domain_status_codes() {
        assert_eq!(domain_status_code(&DomainError::UserNotFound(UserId::new(1))), 404);
        assert_eq!(
            domain_status_code(&DomainError::ValidationError("email".to_string())),
            400
        );
        assert_eq!(
            domain_status_code(&DomainError::DegenerateTrainingSet("one class".to_string())),
            422
        );
        assert_eq!(domain_status_code(&DomainError::DatabaseError("down".to_string())), 500);
    }

    #[test]
    fn test_display() {
        let err = AppError::Database("connection refused".to_string());
        assert_eq!(err.to_string(), "Database error: connection refused");

        let err = AppError::Server("address in use".to_string());
        assert_eq!(err.to_string(), "Server error: address in use");
    }
}
