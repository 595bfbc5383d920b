//! Notification HTTP Handlers

use axum::{extract::State, Json};
use uuid::Uuid;

use super::db;
use crate::backend::error::{ApiPath, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::store::Store;
use crate::shared::social::Notification;

/// `GET /notifications`
pub async fn list_notifications(
    State(store): State<Store>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Notification>>, BackendError> {
    let notifications = db::list_notifications(&store, &user.username).await?;
    Ok(Json(notifications))
}

/// `POST /notifications/{id}/read`
pub async fn mark_read(
    State(store): State<Store>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<serde_json::Value>, BackendError> {
    if !db::mark_read(&store, id, &user.username).await? {
        return Err(BackendError::not_found("Notification not found"));
    }
    Ok(Json(serde_json::json!({ "message": "Notification marked as read" })))
}
