//! Group and Page HTTP Handlers
//!
//! Groups let every member post. Pages have followers, and only the page's
//! creator may post to it.

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use super::db;
use crate::backend::error::{ApiJson, ApiPath, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::Notifier;
use crate::backend::posts::db::community_posts;
use crate::backend::posts::{publish_post, Origin, PostKind};
use crate::backend::store::Store;
use crate::shared::social::{
    Community, CommunityKind, CreateCommunityRequest, CreatePostRequest, GroupDetail, PageDetail,
    Post,
};

async fn require_community(store: &Store, kind: CommunityKind, id: Uuid) -> Result<Community, BackendError> {
    db::get(store, kind, id)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("{} not found", kind.label())))
}

async fn create(
    store: &Store,
    kind: CommunityKind,
    creator: &str,
    request: CreateCommunityRequest,
) -> Result<Community, BackendError> {
    request.validate()?;

    let community = Community {
        id: Uuid::new_v4(),
        name: request.name.trim().to_string(),
        description: request.description,
        creator: creator.to_string(),
        created_at: Utc::now(),
    };
    db::create(store, kind, &community).await?;
    tracing::info!("{} created {} {}", creator, kind.label(), community.id);
    Ok(community)
}

/// `GET /groups`
pub async fn list_groups(State(store): State<Store>) -> Result<Json<Vec<Community>>, BackendError> {
    Ok(Json(db::list(&store, CommunityKind::Group).await?))
}

/// `POST /groups`
pub async fn create_group(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiJson(request): ApiJson<CreateCommunityRequest>,
) -> Result<Json<Community>, BackendError> {
    Ok(Json(create(&store, CommunityKind::Group, &auth.username, request).await?))
}

/// `GET /groups/{id}`
pub async fn get_group(
    State(store): State<Store>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<GroupDetail>, BackendError> {
    let group = require_community(&store, CommunityKind::Group, id).await?;
    let members = db::members(&store, CommunityKind::Group, id).await?;
    let posts = community_posts(&store, CommunityKind::Group, id).await?;
    Ok(Json(GroupDetail { group, members, posts }))
}

/// `POST /groups/{id}/join`
pub async fn join_group(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, BackendError> {
    require_community(&store, CommunityKind::Group, id).await?;
    db::join(&store, CommunityKind::Group, id, &auth.username).await?;
    Ok(Json(json!({ "message": "Joined group" })))
}

/// `POST /groups/{id}/leave`
pub async fn leave_group(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, BackendError> {
    require_community(&store, CommunityKind::Group, id).await?;
    db::leave(&store, CommunityKind::Group, id, &auth.username).await?;
    Ok(Json(json!({ "message": "Left group" })))
}

/// `POST /groups/{id}/posts`
pub async fn post_to_group(
    State(store): State<Store>,
    State(notifier): State<Notifier>,
    AuthUser(auth): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CreatePostRequest>,
) -> Result<Json<Post>, BackendError> {
    require_community(&store, CommunityKind::Group, id).await?;
    if !db::is_member(&store, CommunityKind::Group, id, &auth.username).await? {
        return Err(BackendError::unauthorized("Only group members can post"));
    }

    let post = publish_post(&store, &notifier, &auth.username, request, PostKind::Regular, Origin::Group(id)).await?;
    Ok(Json(post))
}

/// `GET /pages`
pub async fn list_pages(State(store): State<Store>) -> Result<Json<Vec<Community>>, BackendError> {
    Ok(Json(db::list(&store, CommunityKind::Page).await?))
}

/// `POST /pages`
pub async fn create_page(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiJson(request): ApiJson<CreateCommunityRequest>,
) -> Result<Json<Community>, BackendError> {
    Ok(Json(create(&store, CommunityKind::Page, &auth.username, request).await?))
}

/// `GET /pages/{id}`
pub async fn get_page(
    State(store): State<Store>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<PageDetail>, BackendError> {
    let page = require_community(&store, CommunityKind::Page, id).await?;
    let followers = db::members(&store, CommunityKind::Page, id).await?;
    let posts = community_posts(&store, CommunityKind::Page, id).await?;
    Ok(Json(PageDetail { page, followers, posts }))
}

/// `POST /pages/{id}/follow`
pub async fn follow_page(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, BackendError> {
    require_community(&store, CommunityKind::Page, id).await?;
    db::join(&store, CommunityKind::Page, id, &auth.username).await?;
    Ok(Json(json!({ "message": "Following page" })))
}

/// `POST /pages/{id}/unfollow`
pub async fn unfollow_page(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, BackendError> {
    require_community(&store, CommunityKind::Page, id).await?;
    db::leave(&store, CommunityKind::Page, id, &auth.username).await?;
    Ok(Json(json!({ "message": "Unfollowed page" })))
}

/// `POST /pages/{id}/posts`
pub async fn post_to_page(
    State(store): State<Store>,
    State(notifier): State<Notifier>,
    AuthUser(auth): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CreatePostRequest>,
) -> Result<Json<Post>, BackendError> {
    let page = require_community(&store, CommunityKind::Page, id).await?;
    if page.creator != auth.username {
        return Err(BackendError::unauthorized("Only the page creator can post"));
    }

    let post = publish_post(&store, &notifier, &auth.username, request, PostKind::Regular, Origin::Page(id)).await?;
    Ok(Json(post))
}
