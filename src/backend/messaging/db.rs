//! Database operations for direct messages

use chrono::Utc;
use uuid::Uuid;

use crate::backend::store::{Store, StoreError};
use crate::shared::social::DirectMessage;

pub async fn insert_message(
    store: &Store,
    from: &str,
    to: &str,
    content: &str,
    ai_response: bool,
) -> Result<DirectMessage, StoreError> {
    let message = DirectMessage {
        id: Uuid::new_v4(),
        from: from.to_string(),
        to: to.to_string(),
        content: content.to_string(),
        ai_response,
        created_at: Utc::now(),
    };

    store
        .timed(
            sqlx::query(
                r#"
                INSERT INTO messages (id, from_username, to_username, content, ai_response, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(message.id)
            .bind(&message.from)
            .bind(&message.to)
            .bind(&message.content)
            .bind(message.ai_response)
            .bind(message.created_at)
            .execute(store.pool()),
        )
        .await?;

    Ok(message)
}

/// Messages exchanged between `a` and `b` in either direction, oldest first
pub async fn conversation(store: &Store, a: &str, b: &str) -> Result<Vec<DirectMessage>, StoreError> {
    store
        .timed(
            sqlx::query_as::<_, DirectMessage>(
                r#"
                SELECT id, from_username, to_username, content, ai_response, created_at
                FROM messages
                WHERE (from_username = ? AND to_username = ?)
                   OR (from_username = ? AND to_username = ?)
                ORDER BY created_at, rowid
                "#,
            )
            .bind(a)
            .bind(b)
            .bind(b)
            .bind(a)
            .fetch_all(store.pool()),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_conversation_covers_both_directions_in_order() {
        let store = Store::in_memory(Duration::from_secs(5)).await.unwrap();
        store.migrate().await.unwrap();

        insert_message(&store, "alice", "bob", "hi bob", false).await.unwrap();
        insert_message(&store, "bob", "alice", "hi alice", false).await.unwrap();
        insert_message(&store, "alice", "carol", "unrelated", false).await.unwrap();

        let messages = conversation(&store, "bob", "alice").await.unwrap();
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["hi bob", "hi alice"]);
    }
}
