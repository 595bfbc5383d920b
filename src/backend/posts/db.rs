//! Database operations for posts, reactions, hidden-by sets and comments
//!
//! Engagement counters are bumped with single `UPDATE ... SET x = x + 1` or
//! upsert statements; there is no read-modify-write anywhere.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::backend::store::{Store, StoreError};
use crate::shared::social::{Comment, CommunityKind, Post};

const POST_COLUMNS: &str = "id, username, content, media_url, media_type, hashtags, likes, \
    shares, is_short, is_nsfw, deleted, sponsored, live, nft_address, mint_earnings, group_id, \
    page_id, created_at";

const NEWEST_FIRST: &str = "ORDER BY created_at DESC, rowid DESC";

/// Upper bound on listing endpoints
pub const LISTING_LIMIT: i64 = 100;

pub async fn insert_post(store: &Store, post: &Post) -> Result<(), StoreError> {
    store
        .timed(
            sqlx::query(
                r#"
                INSERT INTO posts (id, username, content, media_url, media_type, hashtags, likes,
                                   shares, is_short, is_nsfw, deleted, sponsored, live,
                                   nft_address, mint_earnings, group_id, page_id, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(post.id)
            .bind(&post.username)
            .bind(&post.content)
            .bind(&post.media_url)
            .bind(&post.media_type)
            .bind(&post.hashtags)
            .bind(post.likes)
            .bind(post.shares)
            .bind(post.is_short)
            .bind(post.is_nsfw)
            .bind(post.deleted)
            .bind(post.sponsored)
            .bind(post.live)
            .bind(&post.nft_address)
            .bind(post.mint_earnings)
            .bind(post.group_id)
            .bind(post.page_id)
            .bind(post.created_at)
            .execute(store.pool()),
        )
        .await?;
    Ok(())
}

/// Fetch a post, including soft-deleted ones
pub async fn get_post(store: &Store, id: Uuid) -> Result<Option<Post>, StoreError> {
    let sql = format!("SELECT {} FROM posts WHERE id = ?", POST_COLUMNS);
    store
        .timed(sqlx::query_as::<_, Post>(&sql).bind(id).fetch_optional(store.pool()))
        .await
}

/// Feed for `viewer`: newest first, without soft-deleted posts, posts the
/// viewer hid, or posts by authors the viewer blocked
pub async fn feed(store: &Store, viewer: &str, media_type: Option<&str>) -> Result<Vec<Post>, StoreError> {
    let sql = format!(
        r#"
        SELECT {} FROM posts p
        WHERE p.deleted = 0
          AND (? IS NULL OR p.media_type = ?)
          AND NOT EXISTS (SELECT 1 FROM post_hidden h WHERE h.post_id = p.id AND h.username = ?)
          AND NOT EXISTS (SELECT 1 FROM blocks b WHERE b.blocker = ? AND b.blocked = p.username)
        {}
        LIMIT ?
        "#,
        POST_COLUMNS, NEWEST_FIRST
    );
    store
        .timed(
            sqlx::query_as::<_, Post>(&sql)
                .bind(media_type)
                .bind(media_type)
                .bind(viewer)
                .bind(viewer)
                .bind(LISTING_LIMIT)
                .fetch_all(store.pool()),
        )
        .await
}

/// Public listing of non-deleted posts, optionally filtered by media type
pub async fn explore(store: &Store, media_type: Option<&str>) -> Result<Vec<Post>, StoreError> {
    let sql = format!(
        "SELECT {} FROM posts WHERE deleted = 0 AND (? IS NULL OR media_type = ?) {} LIMIT ?",
        POST_COLUMNS, NEWEST_FIRST
    );
    store
        .timed(
            sqlx::query_as::<_, Post>(&sql)
                .bind(media_type)
                .bind(media_type)
                .bind(LISTING_LIMIT)
                .fetch_all(store.pool()),
        )
        .await
}

pub async fn shorts(store: &Store) -> Result<Vec<Post>, StoreError> {
    let sql = format!(
        "SELECT {} FROM posts WHERE deleted = 0 AND is_short = 1 {} LIMIT ?",
        POST_COLUMNS, NEWEST_FIRST
    );
    store
        .timed(sqlx::query_as::<_, Post>(&sql).bind(LISTING_LIMIT).fetch_all(store.pool()))
        .await
}

pub async fn deleted_posts(store: &Store) -> Result<Vec<Post>, StoreError> {
    let sql = format!("SELECT {} FROM posts WHERE deleted = 1 {}", POST_COLUMNS, NEWEST_FIRST);
    store
        .timed(sqlx::query_as::<_, Post>(&sql).fetch_all(store.pool()))
        .await
}

/// Non-deleted posts inside a group or page
pub async fn community_posts(store: &Store, kind: CommunityKind, id: Uuid) -> Result<Vec<Post>, StoreError> {
    let column = match kind {
        CommunityKind::Group => "group_id",
        CommunityKind::Page => "page_id",
    };
    let sql = format!(
        "SELECT {} FROM posts WHERE {} = ? AND deleted = 0 {}",
        POST_COLUMNS, column, NEWEST_FIRST
    );
    store
        .timed(sqlx::query_as::<_, Post>(&sql).bind(id).fetch_all(store.pool()))
        .await
}

/// Engagement counters stored on the post row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Likes,
    Shares,
}

/// Increment a counter on a live post; returns false if no such post
pub async fn increment(store: &Store, id: Uuid, counter: Counter) -> Result<bool, StoreError> {
    let sql = match counter {
        Counter::Likes => "UPDATE posts SET likes = likes + 1 WHERE id = ? AND deleted = 0",
        Counter::Shares => "UPDATE posts SET shares = shares + 1 WHERE id = ? AND deleted = 0",
    };
    let result = store
        .timed(sqlx::query(sql).bind(id).execute(store.pool()))
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Increment (creating if needed) the reaction bucket `reaction`
pub async fn add_reaction(store: &Store, id: Uuid, reaction: &str) -> Result<(), StoreError> {
    store
        .timed(
            sqlx::query(
                r#"
                INSERT INTO post_reactions (post_id, reaction, count) VALUES (?, ?, 1)
                ON CONFLICT (post_id, reaction) DO UPDATE SET count = count + 1
                "#,
            )
            .bind(id)
            .bind(reaction)
            .execute(store.pool()),
        )
        .await?;
    Ok(())
}

pub async fn reactions(store: &Store, id: Uuid) -> Result<BTreeMap<String, i64>, StoreError> {
    let rows: Vec<(String, i64)> = store
        .timed(
            sqlx::query_as("SELECT reaction, count FROM post_reactions WHERE post_id = ?")
                .bind(id)
                .fetch_all(store.pool()),
        )
        .await?;
    Ok(rows.into_iter().collect())
}

pub async fn hide(store: &Store, id: Uuid, username: &str) -> Result<(), StoreError> {
    store
        .timed(
            sqlx::query("INSERT OR IGNORE INTO post_hidden (post_id, username) VALUES (?, ?)")
                .bind(id)
                .bind(username)
                .execute(store.pool()),
        )
        .await?;
    Ok(())
}

pub async fn hidden_by(store: &Store, id: Uuid) -> Result<Vec<String>, StoreError> {
    store
        .timed(
            sqlx::query_scalar("SELECT username FROM post_hidden WHERE post_id = ? ORDER BY rowid")
                .bind(id)
                .fetch_all(store.pool()),
        )
        .await
}

/// Mark a post deleted; returns false if no such post
pub async fn soft_delete(store: &Store, id: Uuid) -> Result<bool, StoreError> {
    let result = store
        .timed(
            sqlx::query("UPDATE posts SET deleted = 1 WHERE id = ?")
                .bind(id)
                .execute(store.pool()),
        )
        .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn insert_comment(store: &Store, comment: &Comment) -> Result<(), StoreError> {
    store
        .timed(
            sqlx::query(
                r#"
                INSERT INTO comments (id, post_id, parent_id, depth, username, content, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(comment.id)
            .bind(comment.post_id)
            .bind(comment.parent_id)
            .bind(comment.depth)
            .bind(&comment.username)
            .bind(&comment.content)
            .bind(comment.created_at)
            .execute(store.pool()),
        )
        .await?;
    Ok(())
}

/// A comment on `post_id`
pub async fn get_comment(store: &Store, post_id: Uuid, comment_id: Uuid) -> Result<Option<Comment>, StoreError> {
    store
        .timed(
            sqlx::query_as::<_, Comment>(
                r#"
                SELECT id, post_id, parent_id, depth, username, content, created_at
                FROM comments WHERE id = ? AND post_id = ?
                "#,
            )
            .bind(comment_id)
            .bind(post_id)
            .fetch_optional(store.pool()),
        )
        .await
}

/// Every comment on a post, oldest first
pub async fn comments_for(store: &Store, post_id: Uuid) -> Result<Vec<Comment>, StoreError> {
    store
        .timed(
            sqlx::query_as::<_, Comment>(
                r#"
                SELECT id, post_id, parent_id, depth, username, content, created_at
                FROM comments WHERE post_id = ?
                ORDER BY created_at, rowid
                "#,
            )
            .bind(post_id)
            .fetch_all(store.pool()),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::users::db::block;
    use crate::shared::social::nft_address;
    use chrono::{Duration as ChronoDuration, Utc};
    use sqlx::types::Json;
    use std::time::Duration;

    async fn store() -> Store {
        let store = Store::in_memory(Duration::from_secs(5)).await.unwrap();
        store.migrate().await.unwrap();
        store
    }

    fn post(author: &str, content: &str, age_secs: i64) -> Post {
        let id = Uuid::new_v4();
        Post {
            id,
            username: author.to_string(),
            content: content.to_string(),
            media_url: None,
            media_type: None,
            hashtags: Json(Vec::new()),
            likes: 0,
            shares: 0,
            is_short: false,
            is_nsfw: false,
            deleted: false,
            sponsored: false,
            live: false,
            nft_address: nft_address(id),
            mint_earnings: 0.0,
            group_id: None,
            page_id: None,
            created_at: Utc::now() - ChronoDuration::seconds(age_secs),
        }
    }

    fn contents(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.content.as_str()).collect()
    }

    #[tokio::test]
    async fn test_feed_is_newest_first() {
        let store = store().await;
        insert_post(&store, &post("alice", "old", 30)).await.unwrap();
        insert_post(&store, &post("alice", "new", 0)).await.unwrap();
        insert_post(&store, &post("bob", "middle", 10)).await.unwrap();

        let posts = feed(&store, "carol", None).await.unwrap();
        assert_eq!(contents(&posts), vec!["new", "middle", "old"]);
    }

    #[tokio::test]
    async fn test_feed_excludes_hidden_blocked_and_deleted() {
        let store = store().await;
        let hidden = post("alice", "hidden", 0);
        let deleted = post("alice", "deleted", 0);
        insert_post(&store, &hidden).await.unwrap();
        insert_post(&store, &deleted).await.unwrap();
        insert_post(&store, &post("mallory", "blocked", 0)).await.unwrap();
        insert_post(&store, &post("alice", "visible", 0)).await.unwrap();

        hide(&store, hidden.id, "carol").await.unwrap();
        soft_delete(&store, deleted.id).await.unwrap();
        block(&store, "carol", "mallory").await.unwrap();

        let posts = feed(&store, "carol", None).await.unwrap();
        assert_eq!(contents(&posts), vec!["visible"]);

        // Hiding and blocking are per viewer
        let posts = feed(&store, "dave", None).await.unwrap();
        assert_eq!(posts.len(), 3);
    }

    #[tokio::test]
    async fn test_media_filter() {
        let store = store().await;
        let mut video = post("alice", "clip", 0);
        video.media_type = Some("video".to_string());
        insert_post(&store, &video).await.unwrap();
        insert_post(&store, &post("alice", "text", 0)).await.unwrap();

        let posts = explore(&store, Some("video")).await.unwrap();
        assert_eq!(contents(&posts), vec!["clip"]);
        assert_eq!(explore(&store, None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_counters_and_reactions() {
        let store = store().await;
        let p = post("alice", "hello", 0);
        insert_post(&store, &p).await.unwrap();

        assert!(increment(&store, p.id, Counter::Likes).await.unwrap());
        assert!(increment(&store, p.id, Counter::Likes).await.unwrap());
        assert!(increment(&store, p.id, Counter::Shares).await.unwrap());
        assert!(!increment(&store, Uuid::new_v4(), Counter::Likes).await.unwrap());

        add_reaction(&store, p.id, "laugh").await.unwrap();
        add_reaction(&store, p.id, "laugh").await.unwrap();
        add_reaction(&store, p.id, "wow").await.unwrap();

        let stored = get_post(&store, p.id).await.unwrap().unwrap();
        assert_eq!((stored.likes, stored.shares), (2, 1));

        let buckets = reactions(&store, p.id).await.unwrap();
        assert_eq!(buckets.get("laugh"), Some(&2));
        assert_eq!(buckets.get("wow"), Some(&1));
    }

    #[tokio::test]
    async fn test_deleted_post_keeps_record() {
        let store = store().await;
        let p = post("alice", "gone", 0);
        insert_post(&store, &p).await.unwrap();

        assert!(soft_delete(&store, p.id).await.unwrap());
        assert!(!increment(&store, p.id, Counter::Likes).await.unwrap());
        assert!(get_post(&store, p.id).await.unwrap().unwrap().deleted);
        assert_eq!(contents(&deleted_posts(&store).await.unwrap()), vec!["gone"]);
    }

    #[tokio::test]
    async fn test_comment_lookup_is_scoped_to_post() {
        let store = store().await;
        let p = post("alice", "hello", 0);
        insert_post(&store, &p).await.unwrap();

        let comment = Comment {
            id: Uuid::new_v4(),
            post_id: p.id,
            parent_id: None,
            depth: 0,
            username: "bob".to_string(),
            content: "hi".to_string(),
            created_at: Utc::now(),
        };
        insert_comment(&store, &comment).await.unwrap();

        assert_eq!(get_comment(&store, p.id, comment.id).await.unwrap(), Some(comment.clone()));
        assert_eq!(get_comment(&store, Uuid::new_v4(), comment.id).await.unwrap(), None);
        assert_eq!(comments_for(&store, p.id).await.unwrap(), vec![comment]);
    }
}
