//! Friend Request HTTP Handlers
//!
//! Sending, listing and answering friend requests. Only the recipient may
//! answer, and an answered request stays in its terminal state.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use super::db;
use crate::backend::auth::users::user_exists;
use crate::backend::error::{ApiJson, ApiPath, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::Notifier;
use crate::backend::store::Store;
use crate::backend::users::db::are_friends;
use crate::shared::social::{FriendRequest, FriendRequestDecision, NotificationKind, SendFriendRequest};

/// `GET /friend-requests`
pub async fn list_friend_requests(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<FriendRequest>>, BackendError> {
    Ok(Json(db::pending_for(&store, &auth.username).await?))
}

/// `POST /friend-requests`
pub async fn send_friend_request(
    State(store): State<Store>,
    State(notifier): State<Notifier>,
    AuthUser(auth): AuthUser,
    ApiJson(body): ApiJson<SendFriendRequest>,
) -> Result<Json<FriendRequest>, BackendError> {
    if body.to == auth.username {
        return Err(BackendError::bad_request("Cannot send a friend request to yourself"));
    }
    if !user_exists(&store, &body.to).await? {
        return Err(BackendError::not_found("User not found"));
    }
    if are_friends(&store, &auth.username, &body.to).await? {
        return Err(BackendError::conflict("Already friends"));
    }
    if db::pending_between(&store, &auth.username, &body.to).await? {
        return Err(BackendError::conflict("A friend request is already pending"));
    }

    let request = db::create_request(&store, &auth.username, &body.to).await?;
    tracing::info!("Friend request {} from {} to {}", request.id, request.from, request.to);

    let message = NotificationKind::FriendRequest.describe(&auth.username, "");
    notifier
        .notify(&body.to, NotificationKind::FriendRequest, &auth.username, &message, &request.id.to_string())
        .await;

    Ok(Json(request))
}

async fn answer(
    store: &Store,
    notifier: &Notifier,
    recipient: &str,
    id: Uuid,
    decision: FriendRequestDecision,
) -> Result<(), BackendError> {
    let request = db::get_request(store, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Friend request not found"))?;

    if request.to != recipient {
        tracing::warn!("{} attempted to answer friend request {}", recipient, id);
        return Err(BackendError::unauthorized("Only the recipient can answer a friend request"));
    }

    let target = decision.target_status();
    if !request.status.can_transition_to(target) || !db::resolve_request(store, id, target).await? {
        return Err(BackendError::conflict("Friend request already answered"));
    }

    if decision == FriendRequestDecision::Accept {
        db::add_friendship(store, &request.from, &request.to).await?;
    }

    let kind = decision.notification_kind();
    let message = kind.describe(recipient, "");
    notifier
        .notify(&request.from, kind, recipient, &message, &id.to_string())
        .await;

    Ok(())
}

/// `POST /friend-requests/{id}/accept`
pub async fn accept_friend_request(
    State(store): State<Store>,
    State(notifier): State<Notifier>,
    AuthUser(auth): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, BackendError> {
    answer(&store, &notifier, &auth.username, id, FriendRequestDecision::Accept).await?;
    Ok(Json(json!({ "message": "Friend request accepted" })))
}

/// `POST /friend-requests/{id}/reject`
pub async fn reject_friend_request(
    State(store): State<Store>,
    State(notifier): State<Notifier>,
    AuthUser(auth): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, BackendError> {
    answer(&store, &notifier, &auth.username, id, FriendRequestDecision::Reject).await?;
    Ok(Json(json!({ "message": "Friend request rejected" })))
}
