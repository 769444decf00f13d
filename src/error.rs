//! Custom error types for the expense tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::fmt;

use thiserror::Error;

/// Input fields that must be present before a record is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Payee,
    Description,
    ModeOfPayment,
    Category,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Payee => write!(f, "payee"),
            Self::Description => write!(f, "description"),
            Self::ModeOfPayment => write!(f, "payment mode"),
            Self::Category => write!(f, "category"),
        }
    }
}

/// Why a candidate expense was rejected before reaching the store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationFailure {
    /// A required field was empty
    #[error("Missing required field: {0}")]
    MissingField(Field),

    /// Amount is not a number, not finite, or not strictly positive
    #[error("Invalid amount '{0}': amount must be a positive number")]
    InvalidAmount(String),

    /// Date is not a real calendar date in YYYY-MM-DD form
    #[error("Invalid date '{0}': use YYYY-MM-DD")]
    InvalidDate(String),
}

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// The backing store could not be opened or its schema created
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A read against the store failed
    #[error("Storage read error: {0}")]
    StorageRead(String),

    /// A write against the store failed
    #[error("Storage write error: {0}")]
    StorageWrite(String),

    /// User input was rejected
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationFailure),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// PDF report generation failed
    #[error("Report error: {0}")]
    Report(String),

    /// Chart rendering failed
    #[error("Chart error: {0}")]
    Chart(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl ExpenseError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether the application must stop instead of continuing interactively
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpenseError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = ExpenseError::expense_not_found("42");
        assert_eq!(err.to_string(), "Expense not found: 42");
        assert!(err.is_not_found());
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_validation_failure_wraps() {
        let err: ExpenseError = ValidationFailure::MissingField(Field::Payee).into();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation error: Missing required field: payee"
        );
    }

    #[test]
    fn test_storage_unavailable_is_fatal() {
        let err = ExpenseError::StorageUnavailable("disk gone".into());
        assert!(err.is_fatal());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExpenseError = io_err.into();
        assert!(matches!(err, ExpenseError::Io(_)));
    }
}
