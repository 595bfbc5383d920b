//! User HTTP Handlers
//!
//! Profiles, the follow/block graph, pinning and search.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use super::db;
use crate::backend::auth::users::{
    get_user_by_username, search_users as search_user_records, set_pinned_post, update_profile,
};
use crate::backend::error::{ApiJson, ApiPath, ApiQuery, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::Notifier;
use crate::backend::posts::db::get_post;
use crate::backend::store::Store;
use crate::shared::social::{
    NotificationKind, PinPostRequest, SearchQuery, SocialGraph, UpdateProfileRequest, User,
    UserView,
};

const SEARCH_LIMIT: i64 = 50;

async fn require_user(store: &Store, username: &str) -> Result<User, BackendError> {
    get_user_by_username(store, username)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))
}

fn require_self(actor: &str, target: &str) -> Result<(), BackendError> {
    if actor != target {
        tracing::warn!("{} attempted to modify {}", actor, target);
        return Err(BackendError::unauthorized("Cannot modify another user's profile"));
    }
    Ok(())
}

/// `GET /users/{username}`
pub async fn get_user(
    State(store): State<Store>,
    ApiPath(username): ApiPath<String>,
) -> Result<Json<UserView>, BackendError> {
    let user = require_user(&store, &username).await?;
    let graph = db::load_graph(&store, &username).await?;
    Ok(Json(UserView::public(user, graph)))
}

/// `PUT /users/{username}/update`
pub async fn update_user(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiPath(username): ApiPath<String>,
    ApiJson(update): ApiJson<UpdateProfileRequest>,
) -> Result<Json<UserView>, BackendError> {
    require_self(&auth.username, &username)?;
    let mut user = require_user(&store, &username).await?;

    if let Some(location) = update.location {
        user.location = location;
    }
    if let Some(photo) = update.profile_photo {
        user.profile_photo = photo;
    }
    if let Some(banner) = update.banner_photo {
        user.banner_photo = banner;
    }
    if let Some(settings) = update.settings {
        user.settings = settings.apply(&user.settings);
    }

    update_profile(&store, &user).await?;
    tracing::info!("Updated profile of {}", username);

    let graph = db::load_graph(&store, &username).await?;
    Ok(Json(UserView::private(user, graph)))
}

/// `POST /users/{username}/follow`
pub async fn follow_user(
    State(store): State<Store>,
    State(notifier): State<Notifier>,
    AuthUser(auth): AuthUser,
    ApiPath(username): ApiPath<String>,
) -> Result<Json<Value>, BackendError> {
    if auth.username == username {
        return Err(BackendError::bad_request("Cannot follow yourself"));
    }
    require_user(&store, &username).await?;

    if db::follow(&store, &auth.username, &username).await? {
        let message = NotificationKind::Follow.describe(&auth.username, "");
        notifier
            .notify(&username, NotificationKind::Follow, &auth.username, &message, &auth.username)
            .await;
    }

    Ok(Json(json!({ "message": format!("Now following {}", username) })))
}

/// `POST /users/{username}/unfollow`
pub async fn unfollow_user(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiPath(username): ApiPath<String>,
) -> Result<Json<Value>, BackendError> {
    require_user(&store, &username).await?;
    db::unfollow(&store, &auth.username, &username).await?;
    Ok(Json(json!({ "message": format!("Unfollowed {}", username) })))
}

/// `POST /users/{username}/block`
pub async fn block_user(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiPath(username): ApiPath<String>,
) -> Result<Json<Value>, BackendError> {
    if auth.username == username {
        return Err(BackendError::bad_request("Cannot block yourself"));
    }
    require_user(&store, &username).await?;
    db::block(&store, &auth.username, &username).await?;
    Ok(Json(json!({ "message": format!("Blocked {}", username) })))
}

/// `POST /users/{username}/unblock`
pub async fn unblock_user(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiPath(username): ApiPath<String>,
) -> Result<Json<Value>, BackendError> {
    require_user(&store, &username).await?;
    db::unblock(&store, &auth.username, &username).await?;
    Ok(Json(json!({ "message": format!("Unblocked {}", username) })))
}

/// `POST /users/{username}/pin-post`
pub async fn pin_post(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiPath(username): ApiPath<String>,
    ApiJson(request): ApiJson<PinPostRequest>,
) -> Result<Json<Value>, BackendError> {
    require_self(&auth.username, &username)?;

    let post = get_post(&store, request.post_id)
        .await?
        .filter(|p| !p.deleted)
        .ok_or_else(|| BackendError::not_found("Post not found"))?;
    if post.username != username {
        return Err(BackendError::unauthorized("Can only pin your own posts"));
    }

    set_pinned_post(&store, &username, post.id).await?;
    Ok(Json(json!({ "message": "Post pinned", "post_id": post.id })))
}

/// `GET /search/users?q=`
pub async fn search_users(
    State(store): State<Store>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Vec<UserView>>, BackendError> {
    let q = query.q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let users = search_user_records(&store, q, SEARCH_LIMIT).await?;
    let views = users
        .into_iter()
        .map(|user| UserView::public(user, SocialGraph::default()))
        .collect();
    Ok(Json(views))
}
