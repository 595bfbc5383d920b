//! Database operations for messages addressed to administrators

use chrono::Utc;
use uuid::Uuid;

use crate::backend::store::{Store, StoreError};
use crate::shared::social::AdminMessage;

pub async fn insert_admin_message(store: &Store, from: &str, content: &str) -> Result<AdminMessage, StoreError> {
    let message = AdminMessage {
        id: Uuid::new_v4(),
        from: from.to_string(),
        content: content.to_string(),
        read: false,
        created_at: Utc::now(),
    };

    store
        .timed(
            sqlx::query(
                "INSERT INTO admin_messages (id, from_username, content, read, created_at) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(message.id)
            .bind(&message.from)
            .bind(&message.content)
            .bind(message.read)
            .bind(message.created_at)
            .execute(store.pool()),
        )
        .await?;

    Ok(message)
}

/// Every admin message, newest first
pub async fn admin_messages(store: &Store) -> Result<Vec<AdminMessage>, StoreError> {
    store
        .timed(
            sqlx::query_as::<_, AdminMessage>(
                r#"
                SELECT id, from_username, content, read, created_at
                FROM admin_messages
                ORDER BY created_at DESC, rowid DESC
                "#,
            )
            .fetch_all(store.pool()),
        )
        .await
}
