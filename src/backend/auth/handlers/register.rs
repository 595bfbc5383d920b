/**
 * Registration Handler
 *
 * This module implements the user registration handler for POST /register.
 *
 * # Registration Process
 *
 * 1. Validate username, email and password
 * 2. Check if the username is taken
 * 3. Hash password using bcrypt
 * 4. Create the user with default counters and settings
 * 5. Generate JWT token
 * 6. Return token and the user's own view
 *
 * Fields other than username, email, password and location are ignored, so
 * a client cannot register with followers, admin rights or a verified badge.
 */

use axum::{extract::State, response::Json};
use bcrypt::hash;

use crate::backend::auth::users::{create_user, get_user_by_username, set_flag, UserFlag};
use crate::backend::error::{ApiJson, BackendError};
use crate::backend::server::state::AppState;
use crate::shared::social::{AuthResponse, RegisterRequest, SocialGraph, UserView};

/// Registration handler
///
/// # Errors
///
/// * `400 Bad Request` - If username, email or password is invalid
/// * `409 Conflict` - If the username is taken
/// * `500 Internal Server Error` - If hashing, storage or token generation fails
///
/// # Example Request
///
/// ```http
/// POST /register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "securepassword123"
/// }
/// ```
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("Register request for username: {}", request.username);

    request.validate().map_err(|e| {
        tracing::warn!("Invalid registration for {}: {}", request.username, e);
        e
    })?;

    if get_user_by_username(&state.store, &request.username).await?.is_some() {
        tracing::warn!("Username already exists: {}", request.username);
        return Err(BackendError::conflict("Username already taken"));
    }

    let password_hash = hash(&request.password, state.config.bcrypt_cost)?;

    let mut user = create_user(
        &state.store,
        &request.username,
        &request.email,
        &password_hash,
        &request.location,
    )
    .await
    .map_err(|e| {
        if e.is_unique_violation() {
            BackendError::conflict("Username already taken")
        } else {
            e.into()
        }
    })?;

    if state.config.admins.contains(&user.username) {
        set_flag(&state.store, &user.username, UserFlag::Admin, true).await?;
        user.is_admin = true;
    }

    let token = state.sessions.create_token(&user.username)?;

    tracing::info!("User created successfully: {}", user.username);

    Ok(Json(AuthResponse {
        token,
        user: UserView::private(user, SocialGraph::default()),
    }))
}
