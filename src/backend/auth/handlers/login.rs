/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /login.
 *
 * # Authentication Process
 *
 * 1. Look up user by username
 * 2. Verify password using bcrypt
 * 3. Refuse banned accounts
 * 4. Generate JWT token
 * 5. Return token and the user's own view
 *
 * Unknown users and wrong passwords get the same 401 response.
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::{ApiJson, BackendError};
use crate::backend::server::state::AppState;
use crate::backend::users::db::load_graph;
use crate::shared::social::{AuthResponse, LoginRequest, UserView};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If credentials are wrong or the account is banned
/// * `500 Internal Server Error` - If storage, hashing or token generation fails
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("Login request for username: {}", request.username);

    let user = get_user_by_username(&state.store, &request.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login for unknown user: {}", request.username);
            BackendError::unauthorized(INVALID_CREDENTIALS)
        })?;

    if !verify(&request.password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", user.username);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    if user.banned {
        tracing::warn!("Banned user attempted login: {}", user.username);
        return Err(BackendError::unauthorized("Account is banned"));
    }

    let token = state.sessions.create_token(&user.username)?;
    let graph = load_graph(&state.store, &user.username).await?;

    tracing::info!("User logged in: {}", user.username);

    Ok(Json(AuthResponse {
        token,
        user: UserView::private(user, graph),
    }))
}
