//! Request extractors that reject with [`BackendError`]
//!
//! Plain axum extractors answer malformed input with plain-text bodies.
//! These wrappers keep every rejection inside the JSON error envelope.

use axum::extract::{FromRequest, FromRequestParts};

use super::BackendError;

/// JSON body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(BackendError))]
pub struct ApiJson<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(BackendError))]
pub struct ApiPath<T>(pub T);

/// Query string
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(BackendError))]
pub struct ApiQuery<T>(pub T);
