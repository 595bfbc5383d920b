/**
 * Moderation Handlers
 *
 * Every handler here except `contact_admin` takes [`AdminUser`], which
 * rejects authenticated non-admins with 401 before the handler runs.
 *
 * Deleting a post is a soft delete: the record stays and is listed by
 * `GET /admin/deleted-posts`, but it drops out of every public listing.
 */

use axum::{extract::State, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use super::db;
use crate::backend::auth::users::{set_flag, UserFlag};
use crate::backend::error::{ApiJson, ApiPath, BackendError};
use crate::backend::middleware::{AdminUser, AuthUser};
use crate::backend::notifications::Notifier;
use crate::backend::posts::db::{deleted_posts as list_deleted_posts, soft_delete};
use crate::backend::posts::{publish_post, Origin, PostKind};
use crate::backend::store::Store;
use crate::shared::social::{AdminMessage, ContactAdminRequest, CreatePostRequest, NotificationKind, Post};

/// Actor name used for notifications the platform sends itself
const SYSTEM_ACTOR: &str = "system";

/// `POST /contact-admin`
pub async fn contact_admin(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiJson(request): ApiJson<ContactAdminRequest>,
) -> Result<Json<AdminMessage>, BackendError> {
    request.validate()?;
    let message = db::insert_admin_message(&store, &auth.username, &request.content).await?;
    tracing::info!("Admin contact from {}", auth.username);
    Ok(Json(message))
}

/// `GET /admin/messages`
pub async fn admin_messages(
    State(store): State<Store>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Vec<AdminMessage>>, BackendError> {
    Ok(Json(db::admin_messages(&store).await?))
}

async fn flag_user(store: &Store, admin: &str, username: &str, flag: UserFlag, value: bool) -> Result<(), BackendError> {
    if !set_flag(store, username, flag, value).await? {
        return Err(BackendError::not_found("User not found"));
    }
    tracing::info!("{} set {:?}={} on {}", admin, flag, value, username);
    Ok(())
}

/// `POST /users/{username}/ban`
pub async fn ban_user(
    State(store): State<Store>,
    AdminUser(admin): AdminUser,
    ApiPath(username): ApiPath<String>,
) -> Result<Json<Value>, BackendError> {
    flag_user(&store, &admin.username, &username, UserFlag::Banned, true).await?;
    Ok(Json(json!({ "message": format!("{} banned", username) })))
}

/// `POST /users/{username}/unban`
pub async fn unban_user(
    State(store): State<Store>,
    AdminUser(admin): AdminUser,
    ApiPath(username): ApiPath<String>,
) -> Result<Json<Value>, BackendError> {
    flag_user(&store, &admin.username, &username, UserFlag::Banned, false).await?;
    Ok(Json(json!({ "message": format!("{} unbanned", username) })))
}

/// `POST /users/{username}/verify`
pub async fn verify_user(
    State(store): State<Store>,
    State(notifier): State<Notifier>,
    AdminUser(admin): AdminUser,
    ApiPath(username): ApiPath<String>,
) -> Result<Json<Value>, BackendError> {
    flag_user(&store, &admin.username, &username, UserFlag::Verified, true).await?;

    let message = NotificationKind::Verified.describe(SYSTEM_ACTOR, "");
    notifier
        .notify(&username, NotificationKind::Verified, SYSTEM_ACTOR, &message, &username)
        .await;

    Ok(Json(json!({ "message": format!("{} verified", username) })))
}

/// `POST /posts/{id}/delete`
pub async fn delete_post(
    State(store): State<Store>,
    AdminUser(admin): AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, BackendError> {
    if !soft_delete(&store, id).await? {
        return Err(BackendError::not_found("Post not found"));
    }
    tracing::info!("{} deleted post {}", admin.username, id);
    Ok(Json(json!({ "message": "Post deleted" })))
}

/// `GET /admin/deleted-posts`
pub async fn deleted_posts(
    State(store): State<Store>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Vec<Post>>, BackendError> {
    Ok(Json(list_deleted_posts(&store).await?))
}

/// `POST /admin/sponsored-posts`
pub async fn create_sponsored_post(
    State(store): State<Store>,
    State(notifier): State<Notifier>,
    AdminUser(admin): AdminUser,
    ApiJson(request): ApiJson<CreatePostRequest>,
) -> Result<Json<Post>, BackendError> {
    let post = publish_post(&store, &notifier, &admin.username, request, PostKind::Sponsored, Origin::Timeline).await?;
    Ok(Json(post))
}
