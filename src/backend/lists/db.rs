//! Database operations for user lists
//!
//! Item positions are assigned inside the inserting statement so two
//! concurrent additions never share a position.

use chrono::Utc;
use uuid::Uuid;

use crate::backend::store::{Store, StoreError};
use crate::shared::social::{ListItem, UserList};

pub async fn create_list(store: &Store, owner: &str, name: &str) -> Result<UserList, StoreError> {
    let list = UserList {
        id: Uuid::new_v4(),
        owner: owner.to_string(),
        name: name.to_string(),
        created_at: Utc::now(),
    };

    store
        .timed(
            sqlx::query("INSERT INTO lists (id, owner, name, created_at) VALUES (?, ?, ?, ?)")
                .bind(list.id)
                .bind(&list.owner)
                .bind(&list.name)
                .bind(list.created_at)
                .execute(store.pool()),
        )
        .await?;

    Ok(list)
}

pub async fn get_list(store: &Store, id: Uuid) -> Result<Option<UserList>, StoreError> {
    store
        .timed(
            sqlx::query_as::<_, UserList>("SELECT id, owner, name, created_at FROM lists WHERE id = ?")
                .bind(id)
                .fetch_optional(store.pool()),
        )
        .await
}

pub async fn lists_of(store: &Store, owner: &str) -> Result<Vec<UserList>, StoreError> {
    store
        .timed(
            sqlx::query_as::<_, UserList>(
                "SELECT id, owner, name, created_at FROM lists WHERE owner = ? ORDER BY created_at, rowid",
            )
            .bind(owner)
            .fetch_all(store.pool()),
        )
        .await
}

/// Append an item; returns its position
pub async fn add_item(store: &Store, list_id: Uuid, item_type: &str, item_id: &str) -> Result<i64, StoreError> {
    store
        .timed(
            sqlx::query_scalar(
                r#"
                INSERT INTO list_items (list_id, position, item_type, item_id, added_at)
                SELECT ?, COALESCE(MAX(position), -1) + 1, ?, ?, ?
                FROM list_items WHERE list_id = ?
                RETURNING position
                "#,
            )
            .bind(list_id)
            .bind(item_type)
            .bind(item_id)
            .bind(Utc::now())
            .bind(list_id)
            .fetch_one(store.pool()),
        )
        .await
}

/// Items of a list in insertion order
pub async fn items(store: &Store, list_id: Uuid) -> Result<Vec<ListItem>, StoreError> {
    store
        .timed(
            sqlx::query_as::<_, ListItem>(
                "SELECT position, item_type, item_id, added_at FROM list_items WHERE list_id = ? ORDER BY position",
            )
            .bind(list_id)
            .fetch_all(store.pool()),
        )
        .await
}
