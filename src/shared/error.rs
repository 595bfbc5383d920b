//! Shared Error Types
//!
//! Errors raised by the pure validation rules in [`crate::shared::social`].
//! They carry enough context to build a 400 response without any knowledge
//! of HTTP.
//!
//! # Usage
//!
//! ```rust
//! use amity::shared::error::SharedError;
//!
//! let error = SharedError::validation("content", "Post exceeds 280 characters");
//! assert!(error.to_string().contains("content"));
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = SharedError::validation("email", "Invalid email format");
        let SharedError::ValidationError { field, message } = error;
        assert_eq!(field, "email");
        assert_eq!(message, "Invalid email format");
    }

    #[test]
    fn test_error_display() {
        let error = SharedError::validation("content", "too long");
        let display = format!("{}", error);
        assert!(display.contains("content"));
        assert!(display.contains("too long"));
    }
}
