//! Post HTTP Handlers
//!
//! Creation, engagement, comments and the feed listings.

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use super::db::{self, Counter};
use super::publish::{publish_post, Origin, PostKind};
use crate::backend::error::{ApiJson, ApiPath, ApiQuery, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::Notifier;
use crate::backend::store::Store;
use crate::shared::social::{
    build_comment_tree, Comment, CommentRequest, CreatePostRequest, FeedQuery, NotificationKind,
    Post, PostDetail, ReactRequest, MAX_REPLY_DEPTH,
};

/// Load a post that has not been soft-deleted
async fn require_post(store: &Store, id: Uuid) -> Result<Post, BackendError> {
    db::get_post(store, id)
        .await?
        .filter(|post| !post.deleted)
        .ok_or_else(|| BackendError::not_found("Post not found"))
}

/// `POST /posts`
pub async fn create_post(
    State(store): State<Store>,
    State(notifier): State<Notifier>,
    AuthUser(auth): AuthUser,
    ApiJson(request): ApiJson<CreatePostRequest>,
) -> Result<Json<Post>, BackendError> {
    let post = publish_post(&store, &notifier, &auth.username, request, PostKind::Regular, Origin::Timeline).await?;
    Ok(Json(post))
}

/// `POST /posts/live`
pub async fn create_live_post(
    State(store): State<Store>,
    State(notifier): State<Notifier>,
    AuthUser(auth): AuthUser,
    ApiJson(request): ApiJson<CreatePostRequest>,
) -> Result<Json<Post>, BackendError> {
    let post = publish_post(&store, &notifier, &auth.username, request, PostKind::Live, Origin::Timeline).await?;
    Ok(Json(post))
}

/// `GET /posts/{id}`
pub async fn get_post(
    State(store): State<Store>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<PostDetail>, BackendError> {
    let post = require_post(&store, id).await?;
    let reactions = db::reactions(&store, id).await?;
    let hidden_by = db::hidden_by(&store, id).await?;
    let comments = build_comment_tree(db::comments_for(&store, id).await?);

    Ok(Json(PostDetail {
        post,
        reactions,
        hidden_by,
        comments,
    }))
}

async fn bump(
    store: &Store,
    notifier: &Notifier,
    actor: &str,
    id: Uuid,
    counter: Counter,
    kind: NotificationKind,
) -> Result<(), BackendError> {
    let post = require_post(store, id).await?;
    if !db::increment(store, id, counter).await? {
        return Err(BackendError::not_found("Post not found"));
    }

    let message = kind.describe(actor, "");
    notifier
        .notify(&post.username, kind, actor, &message, &id.to_string())
        .await;
    Ok(())
}

/// `POST /posts/{id}/like`
pub async fn like_post(
    State(store): State<Store>,
    State(notifier): State<Notifier>,
    AuthUser(auth): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, BackendError> {
    bump(&store, &notifier, &auth.username, id, Counter::Likes, NotificationKind::Like).await?;
    Ok(Json(json!({ "message": "Post liked" })))
}

/// `POST /posts/{id}/share`
pub async fn share_post(
    State(store): State<Store>,
    State(notifier): State<Notifier>,
    AuthUser(auth): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, BackendError> {
    bump(&store, &notifier, &auth.username, id, Counter::Shares, NotificationKind::Share).await?;
    Ok(Json(json!({ "message": "Post shared" })))
}

/// `POST /posts/{id}/react`
pub async fn react_to_post(
    State(store): State<Store>,
    State(notifier): State<Notifier>,
    AuthUser(auth): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<ReactRequest>,
) -> Result<Json<Value>, BackendError> {
    request.validate()?;
    let post = require_post(&store, id).await?;
    db::add_reaction(&store, id, &request.reaction).await?;

    let message = NotificationKind::Reaction.describe(&auth.username, &request.reaction);
    notifier
        .notify(&post.username, NotificationKind::Reaction, &auth.username, &message, &id.to_string())
        .await;

    Ok(Json(json!({ "message": "Reaction added" })))
}

/// `POST /posts/{id}/hide`
pub async fn hide_post(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, BackendError> {
    require_post(&store, id).await?;
    db::hide(&store, id, &auth.username).await?;
    Ok(Json(json!({ "message": "Post hidden" })))
}

/// `POST /posts/{id}/comment`
pub async fn comment_on_post(
    State(store): State<Store>,
    State(notifier): State<Notifier>,
    AuthUser(auth): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CommentRequest>,
) -> Result<Json<Comment>, BackendError> {
    request.validate()?;
    let post = require_post(&store, id).await?;

    let comment = Comment {
        id: Uuid::new_v4(),
        post_id: id,
        parent_id: None,
        depth: 0,
        username: auth.username.clone(),
        content: request.content,
        created_at: Utc::now(),
    };
    db::insert_comment(&store, &comment).await?;

    let message = NotificationKind::Comment.describe(&auth.username, "");
    notifier
        .notify(&post.username, NotificationKind::Comment, &auth.username, &message, &id.to_string())
        .await;

    Ok(Json(comment))
}

/// `POST /posts/{id}/comment/{comment_id}/reply`
pub async fn reply_to_comment(
    State(store): State<Store>,
    State(notifier): State<Notifier>,
    AuthUser(auth): AuthUser,
    ApiPath((id, comment_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(request): ApiJson<CommentRequest>,
) -> Result<Json<Comment>, BackendError> {
    request.validate()?;
    require_post(&store, id).await?;

    let parent = db::get_comment(&store, id, comment_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Comment not found"))?;

    let depth = parent.depth + 1;
    if depth > MAX_REPLY_DEPTH {
        return Err(BackendError::bad_request(format!(
            "Replies cannot nest deeper than {} levels",
            MAX_REPLY_DEPTH
        )));
    }

    let reply = Comment {
        id: Uuid::new_v4(),
        post_id: id,
        parent_id: Some(parent.id),
        depth,
        username: auth.username.clone(),
        content: request.content,
        created_at: Utc::now(),
    };
    db::insert_comment(&store, &reply).await?;

    let message = NotificationKind::Reply.describe(&auth.username, "");
    notifier
        .notify(&parent.username, NotificationKind::Reply, &auth.username, &message, &id.to_string())
        .await;

    Ok(Json(reply))
}

/// `GET /feed?filter=`
pub async fn get_feed(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiQuery(query): ApiQuery<FeedQuery>,
) -> Result<Json<Vec<Post>>, BackendError> {
    let posts = db::feed(&store, &auth.username, query.media_filter()).await?;
    Ok(Json(posts))
}

/// `GET /explore?filter=`
pub async fn explore(
    State(store): State<Store>,
    ApiQuery(query): ApiQuery<FeedQuery>,
) -> Result<Json<Vec<Post>>, BackendError> {
    let posts = db::explore(&store, query.media_filter()).await?;
    Ok(Json(posts))
}

/// `GET /shorts`
pub async fn shorts(State(store): State<Store>) -> Result<Json<Vec<Post>>, BackendError> {
    Ok(Json(db::shorts(&store).await?))
}
