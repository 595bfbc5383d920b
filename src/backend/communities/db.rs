//! Database operations for groups and pages
//!
//! Both kinds share a record layout; [`CommunityKind`] selects the record
//! table and the membership table (group members or page followers).

use chrono::Utc;
use uuid::Uuid;

use crate::backend::store::{Store, StoreError};
use crate::shared::social::{Community, CommunityKind};

pub async fn list(store: &Store, kind: CommunityKind) -> Result<Vec<Community>, StoreError> {
    let sql = format!(
        "SELECT id, name, description, creator, created_at FROM {} ORDER BY created_at DESC, rowid DESC",
        kind.table()
    );
    store
        .timed(sqlx::query_as::<_, Community>(&sql).fetch_all(store.pool()))
        .await
}

pub async fn get(store: &Store, kind: CommunityKind, id: Uuid) -> Result<Option<Community>, StoreError> {
    let sql = format!(
        "SELECT id, name, description, creator, created_at FROM {} WHERE id = ?",
        kind.table()
    );
    store
        .timed(sqlx::query_as::<_, Community>(&sql).bind(id).fetch_optional(store.pool()))
        .await
}

/// Store a new community; the creator becomes its first member
pub async fn create(store: &Store, kind: CommunityKind, community: &Community) -> Result<(), StoreError> {
    let sql = format!(
        "INSERT INTO {} (id, name, description, creator, created_at) VALUES (?, ?, ?, ?, ?)",
        kind.table()
    );
    store
        .timed(
            sqlx::query(&sql)
                .bind(community.id)
                .bind(&community.name)
                .bind(&community.description)
                .bind(&community.creator)
                .bind(community.created_at)
                .execute(store.pool()),
        )
        .await?;

    join(store, kind, community.id, &community.creator).await?;
    Ok(())
}

/// Add `username` to the membership set; returns false if already present
pub async fn join(store: &Store, kind: CommunityKind, id: Uuid, username: &str) -> Result<bool, StoreError> {
    let (table, column) = kind.membership();
    let sql = format!(
        "INSERT OR IGNORE INTO {} ({}, username, joined_at) VALUES (?, ?, ?)",
        table, column
    );
    let result = store
        .timed(
            sqlx::query(&sql)
                .bind(id)
                .bind(username)
                .bind(Utc::now())
                .execute(store.pool()),
        )
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Remove `username` from the membership set; returns false if absent
pub async fn leave(store: &Store, kind: CommunityKind, id: Uuid, username: &str) -> Result<bool, StoreError> {
    let (table, column) = kind.membership();
    let sql = format!("DELETE FROM {} WHERE {} = ? AND username = ?", table, column);
    let result = store
        .timed(sqlx::query(&sql).bind(id).bind(username).execute(store.pool()))
        .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn members(store: &Store, kind: CommunityKind, id: Uuid) -> Result<Vec<String>, StoreError> {
    let (table, column) = kind.membership();
    let sql = format!(
        "SELECT username FROM {} WHERE {} = ? ORDER BY joined_at, rowid",
        table, column
    );
    store
        .timed(sqlx::query_scalar(&sql).bind(id).fetch_all(store.pool()))
        .await
}

pub async fn is_member(store: &Store, kind: CommunityKind, id: Uuid, username: &str) -> Result<bool, StoreError> {
    let (table, column) = kind.membership();
    let sql = format!("SELECT COUNT(*) FROM {} WHERE {} = ? AND username = ?", table, column);
    let count: i64 = store
        .timed(sqlx::query_scalar(&sql).bind(id).bind(username).fetch_one(store.pool()))
        .await?;
    Ok(count > 0)
}
