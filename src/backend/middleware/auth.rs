/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT tokens from the
 * Authorization header and provides the authenticated identity to handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data resolved from the JWT token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
    pub is_admin: bool,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the JWT token from the Authorization header
/// 2. Verifies the token
/// 3. Loads the user named in the claims, rejecting unknown or banned users
/// 4. Attaches the identity to request extensions for use in handlers
///
/// Returns 401 Unauthorized on any failure.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthorized("Missing bearer token")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        BackendError::unauthorized("Invalid Authorization header")
    })?;

    let claims = state.sessions.verify_token(token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    let user = get_user_by_username(&state.store, &claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token for unknown user: {}", claims.sub);
            BackendError::unauthorized("Unknown user")
        })?;

    if user.banned {
        tracing::warn!("Banned user attempted access: {}", user.username);
        return Err(BackendError::unauthorized("Account is banned"));
    }

    request.extensions_mut().insert(AuthenticatedUser {
        username: user.username,
        is_admin: user.is_admin,
    });

    Ok(next.run(request).await)
}

fn authenticated(parts: &Parts) -> Result<AuthenticatedUser, BackendError> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| {
            tracing::warn!("AuthenticatedUser not found in request extensions");
            BackendError::unauthorized("Authentication required")
        })
}

/// Axum extractor for the authenticated user
///
/// Only resolves on routes behind [`auth_middleware`].
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authenticated(parts).map(AuthUser)
    }
}

/// Axum extractor that additionally requires the admin flag
#[derive(Clone, Debug)]
pub struct AdminUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;
        if !user.is_admin {
            tracing::warn!("Non-admin {} attempted admin action", user.username);
            return Err(BackendError::unauthorized("Admin privileges required"));
        }
        Ok(AdminUser(user))
    }
}
