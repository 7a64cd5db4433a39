//! Custom error types for TripDesk
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for TripDesk operations
#[derive(Error, Debug)]
pub enum TripDeskError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A value was refused at the input boundary
    #[error("Validation error: {0}")]
    Validation(String),

    /// Something that must hold before an action runs does not
    #[error("{0}")]
    Precondition(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// The expense sink refused or could not store a submission
    #[error("Expense could not be saved: {0}")]
    CommitFailed(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl TripDeskError {
    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for trips
    pub fn trip_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Trip",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Error raised when no user identity is available for the session
    pub fn no_user() -> Self {
        Self::Precondition(
            "No user logged in. Pass --user <id> or set TRIPDESK_USER.".to_string(),
        )
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a precondition error
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }

    /// Only a failed commit can be retried by the user
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::CommitFailed(_))
    }
}

impl From<std::io::Error> for TripDeskError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TripDeskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for TripDesk operations
pub type TripDeskResult<T> = Result<T, TripDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TripDeskError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = TripDeskError::user_not_found("42");
        assert_eq!(err.to_string(), "User not found: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_only_commit_failures_are_retryable() {
        assert!(TripDeskError::CommitFailed("disk full".into()).is_retryable());
        assert!(!TripDeskError::Validation("negative cost".into()).is_retryable());
        assert!(!TripDeskError::no_user().is_retryable());
    }

    #[test]
    fn test_precondition_message() {
        let err = TripDeskError::no_user();
        assert!(err.is_precondition());
        assert!(err.to_string().starts_with("No user logged in"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TripDeskError = io_err.into();
        assert!(matches!(err, TripDeskError::Io(_)));
    }
}
