//! Error types for Simoly core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these to
//! user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for Simoly operations.
pub type Result<T> = std::result::Result<T, FormError>;

/// Core error type for Simoly operations.
#[derive(Debug, Error)]
pub enum FormError {
    /// An edit was refused; the document is unchanged
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bulk import produced nothing usable
    #[error("Import error: {0}")]
    Import(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Store file does not exist
    #[error("Store not found")]
    StoreNotFound,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error (fallback)
    #[error("{0}")]
    Other(String),
}

impl FormError {
    /// Whether the error means something the caller asked for does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::StoreNotFound)
    }
}

impl From<std::io::Error> for FormError {
    fn from(err: std::io::Error) -> Self {
        FormError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        FormError::InvalidInput(err.to_string())
    }
}

impl From<rusqlite::Error> for FormError {
    fn from(err: rusqlite::Error) -> Self {
        FormError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(FormError::StoreNotFound.is_not_found());
        assert!(FormError::NotFound("form".into()).is_not_found());
        assert!(!FormError::Validation("x".into()).is_not_found());
    }

    #[test]
    fn test_display_prefixes() {
        let err = FormError::Validation("a form must keep at least one page".into());
        assert_eq!(
            err.to_string(),
            "Validation error: a form must keep at least one page"
        );
    }
}
