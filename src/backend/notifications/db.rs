//! Database operations for notifications

use uuid::Uuid;

use crate::backend::store::{Store, StoreError};
use crate::shared::social::Notification;

/// Append a notification
pub async fn insert_notification(store: &Store, notification: &Notification) -> Result<(), StoreError> {
    store
        .timed(
            sqlx::query(
                r#"
                INSERT INTO notifications (id, recipient, kind, actor, message, related_id, is_read, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(notification.id)
            .bind(&notification.recipient)
            .bind(notification.kind)
            .bind(&notification.actor)
            .bind(&notification.message)
            .bind(&notification.related_id)
            .bind(notification.is_read)
            .bind(notification.created_at)
            .execute(store.pool()),
        )
        .await?;
    Ok(())
}

/// Notifications for `recipient`, newest first
pub async fn list_notifications(store: &Store, recipient: &str) -> Result<Vec<Notification>, StoreError> {
    store
        .timed(
            sqlx::query_as::<_, Notification>(
                r#"
                SELECT id, recipient, kind, actor, message, related_id, is_read, created_at
                FROM notifications
                WHERE recipient = ?
                ORDER BY created_at DESC, rowid DESC
                "#,
            )
            .bind(recipient)
            .fetch_all(store.pool()),
        )
        .await
}

/// Flip the read flag on one of `recipient`'s notifications
///
/// Returns false when no such notification belongs to `recipient`.
pub async fn mark_read(store: &Store, id: Uuid, recipient: &str) -> Result<bool, StoreError> {
    let result = store
        .timed(
            sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ? AND recipient = ?")
                .bind(id)
                .bind(recipient)
                .execute(store.pool()),
        )
        .await?;
    Ok(result.rows_affected() == 1)
}
