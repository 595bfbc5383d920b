/**
 * User Model and Database Operations
 *
 * This module handles user records: creation, lookup, profile updates and
 * the moderation flags. Graph relations (follows, friendships, blocks) live
 * in `backend::users::db`.
 */

use chrono::Utc;
use uuid::Uuid;

use crate::backend::store::{Store, StoreError};
use crate::shared::social::{User, UserSettings};

const USER_COLUMNS: &str = "id, username, email, password_hash, location, profile_photo, \
    banner_photo, followers, nsfw_enabled, profile_visibility, messaging, verified, is_admin, \
    banned, pinned_post_id, total_nft_earnings, created_at";

/// Create a new user with default settings and counters
pub async fn create_user(
    store: &Store,
    username: &str,
    email: &str,
    password_hash: &str,
    location: &str,
) -> Result<User, StoreError> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let settings = UserSettings::default();

    store
        .timed(
            sqlx::query(
                r#"
                INSERT INTO users (id, username, email, password_hash, location, nsfw_enabled,
                                   profile_visibility, messaging, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(id)
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .bind(location)
            .bind(settings.nsfw_enabled)
            .bind(settings.profile_visibility)
            .bind(settings.messaging)
            .bind(now)
            .execute(store.pool()),
        )
        .await?;

    Ok(User {
        id,
        username: username.to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        location: location.to_string(),
        profile_photo: String::new(),
        banner_photo: String::new(),
        followers: 0,
        settings,
        verified: false,
        is_admin: false,
        banned: false,
        pinned_post_id: None,
        total_nft_earnings: 0.0,
        created_at: now,
    })
}

/// Get user by username
pub async fn get_user_by_username(store: &Store, username: &str) -> Result<Option<User>, StoreError> {
    let sql = format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS);
    store
        .timed(
            sqlx::query_as::<_, User>(&sql)
                .bind(username)
                .fetch_optional(store.pool()),
        )
        .await
}

/// Whether a user named `username` exists
pub async fn user_exists(store: &Store, username: &str) -> Result<bool, StoreError> {
    let found: Option<i64> = store
        .timed(
            sqlx::query_scalar("SELECT 1 FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(store.pool()),
        )
        .await?;
    Ok(found.is_some())
}

/// Case-insensitive substring search on usernames
pub async fn search_users(store: &Store, query: &str, limit: i64) -> Result<Vec<User>, StoreError> {
    let pattern = format!("%{}%", escape_like(query));
    let sql = format!(
        "SELECT {} FROM users WHERE username LIKE ? ESCAPE '\\' ORDER BY username LIMIT ?",
        USER_COLUMNS
    );
    store
        .timed(
            sqlx::query_as::<_, User>(&sql)
                .bind(pattern)
                .bind(limit)
                .fetch_all(store.pool()),
        )
        .await
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Overwrite the editable profile fields
pub async fn update_profile(store: &Store, user: &User) -> Result<(), StoreError> {
    store
        .timed(
            sqlx::query(
                r#"
                UPDATE users
                SET location = ?, profile_photo = ?, banner_photo = ?,
                    nsfw_enabled = ?, profile_visibility = ?, messaging = ?
                WHERE username = ?
                "#,
            )
            .bind(&user.location)
            .bind(&user.profile_photo)
            .bind(&user.banner_photo)
            .bind(user.settings.nsfw_enabled)
            .bind(user.settings.profile_visibility)
            .bind(user.settings.messaging)
            .bind(&user.username)
            .execute(store.pool()),
        )
        .await?;
    Ok(())
}

/// Moderation flags settable by admins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFlag {
    Banned,
    Verified,
    Admin,
}

impl UserFlag {
    fn column(&self) -> &'static str {
        match self {
            Self::Banned => "banned",
            Self::Verified => "verified",
            Self::Admin => "is_admin",
        }
    }
}

/// Set a moderation flag; returns false when the user does not exist
pub async fn set_flag(store: &Store, username: &str, flag: UserFlag, value: bool) -> Result<bool, StoreError> {
    let sql = format!("UPDATE users SET {} = ? WHERE username = ?", flag.column());
    let result = store
        .timed(
            sqlx::query(&sql)
                .bind(value)
                .bind(username)
                .execute(store.pool()),
        )
        .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn set_pinned_post(store: &Store, username: &str, post_id: Uuid) -> Result<(), StoreError> {
    store
        .timed(
            sqlx::query("UPDATE users SET pinned_post_id = ? WHERE username = ?")
                .bind(post_id)
                .bind(username)
                .execute(store.pool()),
        )
        .await?;
    Ok(())
}

pub async fn set_total_nft_earnings(store: &Store, username: &str, total: f64) -> Result<(), StoreError> {
    store
        .timed(
            sqlx::query("UPDATE users SET total_nft_earnings = ? WHERE username = ?")
                .bind(total)
                .bind(username)
                .execute(store.pool()),
        )
        .await?;
    Ok(())
}
