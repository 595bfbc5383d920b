//! List HTTP Handlers

use axum::{extract::State, Json};
use uuid::Uuid;

use super::db;
use crate::backend::error::{ApiJson, ApiPath, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::store::Store;
use crate::shared::social::{AddListItemRequest, CreateListRequest, ListDetail, UserList};

/// `POST /lists`
pub async fn create_list(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiJson(request): ApiJson<CreateListRequest>,
) -> Result<Json<UserList>, BackendError> {
    request.validate()?;
    let list = db::create_list(&store, &auth.username, request.name.trim()).await?;
    Ok(Json(list))
}

/// `GET /lists`
pub async fn get_lists(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<ListDetail>>, BackendError> {
    let mut details = Vec::new();
    for list in db::lists_of(&store, &auth.username).await? {
        let items = db::items(&store, list.id).await?;
        details.push(ListDetail { list, items });
    }
    Ok(Json(details))
}

/// `POST /lists/{id}/add`
pub async fn add_to_list(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<AddListItemRequest>,
) -> Result<Json<ListDetail>, BackendError> {
    request.validate()?;

    let list = db::get_list(&store, id)
        .await?
        .ok_or_else(|| BackendError::not_found("List not found"))?;
    if list.owner != auth.username {
        return Err(BackendError::unauthorized("Only the owner can modify a list"));
    }

    db::add_item(&store, id, &request.item_type, &request.item_id).await?;
    let items = db::items(&store, id).await?;
    Ok(Json(ListDetail { list, items }))
}
