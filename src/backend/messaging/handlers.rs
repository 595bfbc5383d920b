//! Direct Message HTTP Handlers
//!
//! The recipient's messaging policy and block list decide whether a sender
//! may reach them.

use axum::{extract::State, Json};

use super::db;
use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::{ApiJson, ApiPath, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::Notifier;
use crate::backend::store::Store;
use crate::backend::users::db::{are_friends, is_blocked};
use crate::shared::social::{DirectMessage, MessagingPolicy, NotificationKind, SendMessageRequest};

/// Check whether `sender` may message `recipient`
async fn ensure_reachable(
    store: &Store,
    sender: &str,
    recipient: &str,
    policy: MessagingPolicy,
) -> Result<(), BackendError> {
    if is_blocked(store, recipient, sender).await? {
        return Err(BackendError::unauthorized("You cannot message this user"));
    }

    match policy {
        MessagingPolicy::Everyone => Ok(()),
        MessagingPolicy::None => Err(BackendError::unauthorized("This user does not accept messages")),
        MessagingPolicy::Friends => {
            if are_friends(store, recipient, sender).await? {
                Ok(())
            } else {
                Err(BackendError::unauthorized("This user only accepts messages from friends"))
            }
        }
    }
}

/// `POST /messages`
pub async fn send_message(
    State(store): State<Store>,
    State(notifier): State<Notifier>,
    AuthUser(auth): AuthUser,
    ApiJson(request): ApiJson<SendMessageRequest>,
) -> Result<Json<DirectMessage>, BackendError> {
    request.validate()?;

    let recipient = get_user_by_username(&store, &request.to)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    if recipient.username != auth.username {
        ensure_reachable(&store, &auth.username, &recipient.username, recipient.settings.messaging).await?;
    }

    let message = db::insert_message(
        &store,
        &auth.username,
        &recipient.username,
        &request.content,
        request.ai_response,
    )
    .await?;

    let text = NotificationKind::Message.describe(&auth.username, "");
    notifier
        .notify(&recipient.username, NotificationKind::Message, &auth.username, &text, &message.id.to_string())
        .await;

    Ok(Json(message))
}

/// `GET /messages/{username}`
pub async fn get_conversation(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiPath(username): ApiPath<String>,
) -> Result<Json<Vec<DirectMessage>>, BackendError> {
    Ok(Json(db::conversation(&store, &auth.username, &username).await?))
}
