//! Hangout HTTP Handlers
//!
//! Creating a hangout announces it to the creator's friends.

use axum::{extract::State, Json};
use chrono::Utc;
use uuid::Uuid;

use super::db;
use crate::backend::error::{ApiJson, ApiPath, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::Notifier;
use crate::backend::store::Store;
use crate::backend::users::db::friends_of;
use crate::shared::social::{CreateHangoutRequest, Hangout, HangoutDetail, NotificationKind};

async fn detail(store: &Store, hangout: Hangout) -> Result<HangoutDetail, BackendError> {
    let participants = db::participants(store, hangout.id).await?;
    Ok(HangoutDetail { hangout, participants })
}

async fn require_hangout(store: &Store, id: Uuid) -> Result<Hangout, BackendError> {
    db::get_hangout(store, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Hangout not found"))
}

/// `POST /hangouts`
pub async fn create_hangout(
    State(store): State<Store>,
    State(notifier): State<Notifier>,
    AuthUser(auth): AuthUser,
    ApiJson(request): ApiJson<CreateHangoutRequest>,
) -> Result<Json<HangoutDetail>, BackendError> {
    request.validate()?;

    let hangout = Hangout {
        id: Uuid::new_v4(),
        name: request.name.trim().to_string(),
        description: request.description,
        creator: auth.username.clone(),
        date: request.date,
        location: request.location,
        created_at: Utc::now(),
    };
    db::create_hangout(&store, &hangout).await?;
    tracing::info!("{} created hangout {}", auth.username, hangout.id);

    let friends = friends_of(&store, &auth.username).await?;
    let message = NotificationKind::Hangout.describe(&auth.username, &hangout.name);
    notifier
        .fan_out(&friends, NotificationKind::Hangout, &auth.username, &message, &hangout.id.to_string())
        .await;

    Ok(Json(detail(&store, hangout).await?))
}

/// `GET /hangouts`
pub async fn list_hangouts(State(store): State<Store>) -> Result<Json<Vec<HangoutDetail>>, BackendError> {
    let mut details = Vec::new();
    for hangout in db::list_hangouts(&store).await? {
        details.push(detail(&store, hangout).await?);
    }
    Ok(Json(details))
}

/// `POST /hangouts/{id}/join`
pub async fn join_hangout(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<HangoutDetail>, BackendError> {
    let hangout = require_hangout(&store, id).await?;
    db::join(&store, id, &auth.username).await?;
    Ok(Json(detail(&store, hangout).await?))
}

/// `POST /hangouts/{id}/leave`
pub async fn leave_hangout(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<HangoutDetail>, BackendError> {
    let hangout = require_hangout(&store, id).await?;
    db::leave(&store, id, &auth.username).await?;
    Ok(Json(detail(&store, hangout).await?))
}
