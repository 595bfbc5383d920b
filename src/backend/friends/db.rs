//! Database operations for friend requests and friendships
//!
//! A request moves out of `pending` exactly once: the transition is a
//! conditional `UPDATE ... WHERE status = 'pending'`, so concurrent answers
//! to the same request cannot both succeed.

use chrono::Utc;
use uuid::Uuid;

use crate::backend::store::{Store, StoreError};
use crate::shared::social::{FriendRequest, FriendRequestStatus};

const REQUEST_COLUMNS: &str = "id, from_username, to_username, status, created_at, responded_at";

pub async fn create_request(store: &Store, from: &str, to: &str) -> Result<FriendRequest, StoreError> {
    let request = FriendRequest {
        id: Uuid::new_v4(),
        from: from.to_string(),
        to: to.to_string(),
        status: FriendRequestStatus::Pending,
        created_at: Utc::now(),
        responded_at: None,
    };

    store
        .timed(
            sqlx::query(
                r#"
                INSERT INTO friend_requests (id, from_username, to_username, status, created_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(request.id)
            .bind(&request.from)
            .bind(&request.to)
            .bind(request.status)
            .bind(request.created_at)
            .execute(store.pool()),
        )
        .await?;

    Ok(request)
}

pub async fn get_request(store: &Store, id: Uuid) -> Result<Option<FriendRequest>, StoreError> {
    let sql = format!("SELECT {} FROM friend_requests WHERE id = ?", REQUEST_COLUMNS);
    store
        .timed(sqlx::query_as::<_, FriendRequest>(&sql).bind(id).fetch_optional(store.pool()))
        .await
}

/// Pending requests addressed to `username`, newest first
pub async fn pending_for(store: &Store, username: &str) -> Result<Vec<FriendRequest>, StoreError> {
    let sql = format!(
        "SELECT {} FROM friend_requests WHERE to_username = ? AND status = 'pending' \
         ORDER BY created_at DESC, rowid DESC",
        REQUEST_COLUMNS
    );
    store
        .timed(sqlx::query_as::<_, FriendRequest>(&sql).bind(username).fetch_all(store.pool()))
        .await
}

/// Whether a pending request exists between `a` and `b` in either direction
pub async fn pending_between(store: &Store, a: &str, b: &str) -> Result<bool, StoreError> {
    let count: i64 = store
        .timed(
            sqlx::query_scalar(
                r#"
                SELECT COUNT(*) FROM friend_requests
                WHERE status = 'pending'
                  AND ((from_username = ? AND to_username = ?)
                    OR (from_username = ? AND to_username = ?))
                "#,
            )
            .bind(a)
            .bind(b)
            .bind(b)
            .bind(a)
            .fetch_one(store.pool()),
        )
        .await?;
    Ok(count > 0)
}

/// Move a pending request to `status`; returns false if it was not pending
pub async fn resolve_request(store: &Store, id: Uuid, status: FriendRequestStatus) -> Result<bool, StoreError> {
    let result = store
        .timed(
            sqlx::query(
                "UPDATE friend_requests SET status = ?, responded_at = ? WHERE id = ? AND status = 'pending'",
            )
            .bind(status)
            .bind(Utc::now())
            .bind(id)
            .execute(store.pool()),
        )
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Insert both directions of a friendship in one statement
pub async fn add_friendship(store: &Store, a: &str, b: &str) -> Result<(), StoreError> {
    let now = Utc::now();
    store
        .timed(
            sqlx::query(
                "INSERT OR IGNORE INTO friendships (username, friend, created_at) VALUES (?, ?, ?), (?, ?, ?)",
            )
            .bind(a)
            .bind(b)
            .bind(now)
            .bind(b)
            .bind(a)
            .bind(now)
            .execute(store.pool()),
        )
        .await?;
    Ok(())
}
