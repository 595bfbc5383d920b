//! Middleware Module
//!
//! This module contains all HTTP middleware for the backend server.
//!
//! - **`auth`** - Bearer-token authentication for protected routes, plus the
//!   `AuthUser` and `AdminUser` extractors that read its result

pub mod auth;

pub use auth::{auth_middleware, AdminUser, AuthUser, AuthenticatedUser};
