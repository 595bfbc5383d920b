/**
 * Get Current User Handler
 *
 * This module implements the handler for GET /me, which returns the
 * authenticated user's own view, including email and blocked set.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::store::Store;
use crate::backend::users::db::load_graph;
use crate::shared::social::UserView;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - If the request is not authenticated
/// * `404 Not Found` - If the user disappeared after authentication
pub async fn get_me(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
) -> Result<Json<UserView>, BackendError> {
    let user = get_user_by_username(&store, &auth.username)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;
    let graph = load_graph(&store, &user.username).await?;
    Ok(Json(UserView::private(user, graph)))
}
