//! Database operations for the social graph
//!
//! Follows, friendships and blocks are edge tables with composite primary
//! keys. Inserts use `INSERT OR IGNORE`, so repeating an action is a no-op
//! and the caller can tell from `rows_affected` whether the edge changed.

use chrono::Utc;

use crate::backend::store::{Store, StoreError};
use crate::shared::social::SocialGraph;

/// Add `follower -> followee` and bump the follower counter if the edge is new
///
/// Returns whether the edge was created.
pub async fn follow(store: &Store, follower: &str, followee: &str) -> Result<bool, StoreError> {
    let inserted = store
        .timed(
            sqlx::query("INSERT OR IGNORE INTO follows (follower, followee, created_at) VALUES (?, ?, ?)")
                .bind(follower)
                .bind(followee)
                .bind(Utc::now())
                .execute(store.pool()),
        )
        .await?
        .rows_affected()
        == 1;

    if inserted {
        adjust_followers(store, followee, 1).await?;
    }
    Ok(inserted)
}

/// Remove `follower -> followee` and decrement the counter if an edge existed
pub async fn unfollow(store: &Store, follower: &str, followee: &str) -> Result<bool, StoreError> {
    let removed = store
        .timed(
            sqlx::query("DELETE FROM follows WHERE follower = ? AND followee = ?")
                .bind(follower)
                .bind(followee)
                .execute(store.pool()),
        )
        .await?
        .rows_affected()
        == 1;

    if removed {
        adjust_followers(store, followee, -1).await?;
    }
    Ok(removed)
}

/// Atomic counter update, clamped at zero
async fn adjust_followers(store: &Store, username: &str, delta: i64) -> Result<(), StoreError> {
    store
        .timed(
            sqlx::query("UPDATE users SET followers = MAX(followers + ?, 0) WHERE username = ?")
                .bind(delta)
                .bind(username)
                .execute(store.pool()),
        )
        .await?;
    Ok(())
}

pub async fn block(store: &Store, blocker: &str, blocked: &str) -> Result<bool, StoreError> {
    let result = store
        .timed(
            sqlx::query("INSERT OR IGNORE INTO blocks (blocker, blocked, created_at) VALUES (?, ?, ?)")
                .bind(blocker)
                .bind(blocked)
                .bind(Utc::now())
                .execute(store.pool()),
        )
        .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn unblock(store: &Store, blocker: &str, blocked: &str) -> Result<bool, StoreError> {
    let result = store
        .timed(
            sqlx::query("DELETE FROM blocks WHERE blocker = ? AND blocked = ?")
                .bind(blocker)
                .bind(blocked)
                .execute(store.pool()),
        )
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Whether `blocker` has blocked `blocked`
pub async fn is_blocked(store: &Store, blocker: &str, blocked: &str) -> Result<bool, StoreError> {
    let found: Option<i64> = store
        .timed(
            sqlx::query_scalar("SELECT 1 FROM blocks WHERE blocker = ? AND blocked = ?")
                .bind(blocker)
                .bind(blocked)
                .fetch_optional(store.pool()),
        )
        .await?;
    Ok(found.is_some())
}

pub async fn are_friends(store: &Store, a: &str, b: &str) -> Result<bool, StoreError> {
    let found: Option<i64> = store
        .timed(
            sqlx::query_scalar("SELECT 1 FROM friendships WHERE username = ? AND friend = ?")
                .bind(a)
                .bind(b)
                .fetch_optional(store.pool()),
        )
        .await?;
    Ok(found.is_some())
}

/// Usernames following `username`
pub async fn followers_of(store: &Store, username: &str) -> Result<Vec<String>, StoreError> {
    store
        .timed(
            sqlx::query_scalar("SELECT follower FROM follows WHERE followee = ? ORDER BY created_at, rowid")
                .bind(username)
                .fetch_all(store.pool()),
        )
        .await
}

pub async fn following_of(store: &Store, username: &str) -> Result<Vec<String>, StoreError> {
    store
        .timed(
            sqlx::query_scalar("SELECT followee FROM follows WHERE follower = ? ORDER BY created_at, rowid")
                .bind(username)
                .fetch_all(store.pool()),
        )
        .await
}

pub async fn friends_of(store: &Store, username: &str) -> Result<Vec<String>, StoreError> {
    store
        .timed(
            sqlx::query_scalar("SELECT friend FROM friendships WHERE username = ? ORDER BY created_at, rowid")
                .bind(username)
                .fetch_all(store.pool()),
        )
        .await
}

pub async fn blocked_by(store: &Store, username: &str) -> Result<Vec<String>, StoreError> {
    store
        .timed(
            sqlx::query_scalar("SELECT blocked FROM blocks WHERE blocker = ? ORDER BY created_at, rowid")
                .bind(username)
                .fetch_all(store.pool()),
        )
        .await
}

/// Following, friends and blocked sets of a user
pub async fn load_graph(store: &Store, username: &str) -> Result<SocialGraph, StoreError> {
    Ok(SocialGraph {
        following: following_of(store, username).await?,
        friends: friends_of(store, username).await?,
        blocked: blocked_by(store, username).await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::{create_user, get_user_by_username};
    use std::time::Duration;

    async fn store_with(users: &[&str]) -> Store {
        let store = Store::in_memory(Duration::from_secs(5)).await.unwrap();
        store.migrate().await.unwrap();
        for name in users {
            create_user(&store, name, "x@example.com", "hash", "").await.unwrap();
        }
        store
    }

    async fn followers(store: &Store, username: &str) -> i64 {
        get_user_by_username(store, username).await.unwrap().unwrap().followers
    }

    #[tokio::test]
    async fn test_follow_is_idempotent() {
        let store = store_with(&["alice", "bob"]).await;
        assert!(follow(&store, "bob", "alice").await.unwrap());
        assert!(!follow(&store, "bob", "alice").await.unwrap());
        assert_eq!(followers(&store, "alice").await, 1);
        assert_eq!(followers_of(&store, "alice").await.unwrap(), vec!["bob".to_string()]);
    }

    #[tokio::test]
    async fn test_unfollow_without_follow_keeps_count() {
        let store = store_with(&["alice", "bob"]).await;
        assert!(!unfollow(&store, "bob", "alice").await.unwrap());
        assert_eq!(followers(&store, "alice").await, 0);
    }

    #[tokio::test]
    async fn test_follow_unfollow_round_trip() {
        let store = store_with(&["alice", "bob", "carol"]).await;
        follow(&store, "carol", "alice").await.unwrap();
        let before = followers(&store, "alice").await;

        follow(&store, "bob", "alice").await.unwrap();
        unfollow(&store, "bob", "alice").await.unwrap();
        assert_eq!(followers(&store, "alice").await, before);
    }

    #[tokio::test]
    async fn test_block_edges() {
        let store = store_with(&["alice", "bob"]).await;
        assert!(block(&store, "alice", "bob").await.unwrap());
        assert!(is_blocked(&store, "alice", "bob").await.unwrap());
        assert!(!is_blocked(&store, "bob", "alice").await.unwrap());

        let graph = load_graph(&store, "alice").await.unwrap();
        assert_eq!(graph.blocked, vec!["bob".to_string()]);

        assert!(unblock(&store, "alice", "bob").await.unwrap());
        assert!(!is_blocked(&store, "alice", "bob").await.unwrap());
    }
}
