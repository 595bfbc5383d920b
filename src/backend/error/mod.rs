//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! # Architecture
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - `IntoResponse` and extractor-rejection conversions
//! - **`extract`** - Extractors whose rejections render as `BackendError`
//!
//! # Example
//!
//! ```rust,no_run
//! use amity::backend::error::{ApiJson, BackendError};
//! use amity::shared::social::CommentRequest;
//!
//! async fn handler(ApiJson(body): ApiJson<CommentRequest>) -> Result<String, BackendError> {
//!     body.validate()?;
//!     Ok(body.content)
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

/// Extractors with uniform rejections
pub mod extract;

pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use types::BackendError;
