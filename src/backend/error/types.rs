/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Handler errors carry an explicit status and a message that is safe to show
 * to the caller: malformed input, missing entities, authorization failures,
 * conflicting state transitions.
 *
 * ## Internal Errors
 *
 * Storage, token, hashing and blob failures are internal. Their details are
 * logged and the caller only sees a generic 500.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::backend::upload::BlobError;
use crate::shared::SharedError;

/// Message returned for every internal failure
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use amity::backend::error::BackendError;
///
/// let err = BackendError::not_found("Post not found");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., invalid request, missing entity)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Storage operation failed or timed out
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Session token could not be issued
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Credential hashing failed
    #[error("Hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// Blob store rejected an upload
    #[error("Blob store error: {0}")]
    Blob(#[from] BlobError),

    /// Request failed a validation rule
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 Bad Request
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether details must stay out of the response
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Get the message shown to the caller
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(SharedError::ValidationError { message, .. }) => message.clone(),
            _ => INTERNAL_MESSAGE.to_string(),
        }
    }
}
