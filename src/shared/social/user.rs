//! User Data Structures
//!
//! Accounts, profile settings and the request/response bodies of the
//! registration, login and profile endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::SharedError;

/// Who can see a user's profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ProfileVisibility {
    #[default]
    Public,
    Friends,
    Private,
}

/// Who can send a user direct messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum MessagingPolicy {
    #[default]
    Everyone,
    Friends,
    None,
}

/// Per-user settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserSettings {
    pub nsfw_enabled: bool,
    pub profile_visibility: ProfileVisibility,
    pub messaging: MessagingPolicy,
}

/// A stored user account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// bcrypt hash; never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub location: String,
    pub profile_photo: String,
    pub banner_photo: String,
    pub followers: i64,
    #[sqlx(flatten)]
    pub settings: UserSettings,
    pub verified: bool,
    pub is_admin: bool,
    pub banned: bool,
    pub pinned_post_id: Option<Uuid>,
    pub total_nft_earnings: f64,
    pub created_at: DateTime<Utc>,
}

/// Set-valued relations of a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialGraph {
    pub following: Vec<String>,
    pub friends: Vec<String>,
    pub blocked: Vec<String>,
}

/// User as returned by the API
///
/// Email and the blocked set are only present when the viewer is the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub location: String,
    pub profile_photo: String,
    pub banner_photo: String,
    pub followers: i64,
    pub following: Vec<String>,
    pub friends: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<Vec<String>>,
    pub settings: UserSettings,
    pub verified: bool,
    pub is_admin: bool,
    pub banned: bool,
    pub pinned_post_id: Option<Uuid>,
    pub total_nft_earnings: f64,
    pub created_at: DateTime<Utc>,
}

impl UserView {
    /// View of a user as seen by someone else
    pub fn public(user: User, graph: SocialGraph) -> Self {
        Self::build(user, graph, false)
    }

    /// View of a user as seen by themselves
    pub fn private(user: User, graph: SocialGraph) -> Self {
        Self::build(user, graph, true)
    }

    fn build(user: User, graph: SocialGraph, owner: bool) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: owner.then_some(user.email),
            location: user.location,
            profile_photo: user.profile_photo,
            banner_photo: user.banner_photo,
            followers: user.followers,
            following: graph.following,
            friends: graph.friends,
            blocked: owner.then_some(graph.blocked),
            settings: user.settings,
            verified: user.verified,
            is_admin: user.is_admin,
            banned: user.banned,
            pinned_post_id: user.pinned_post_id,
            total_nft_earnings: user.total_nft_earnings,
            created_at: user.created_at,
        }
    }
}

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Registration request
///
/// Any other field in the body (followers, is_admin, ...) is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub location: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if !is_valid_username(&self.username) {
            return Err(SharedError::validation(
                "username",
                "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
            ));
        }
        if !self.email.contains('@') {
            return Err(SharedError::validation("email", "Invalid email format"));
        }
        if self.password.len() < 8 {
            return Err(SharedError::validation(
                "password",
                "Password must be at least 8 characters",
            ));
        }
        Ok(())
    }
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token plus the authenticated user's own view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

/// Partial settings update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub nsfw_enabled: Option<bool>,
    pub profile_visibility: Option<ProfileVisibility>,
    pub messaging: Option<MessagingPolicy>,
}

impl SettingsUpdate {
    /// Apply the present fields over `current`
    pub fn apply(&self, current: &UserSettings) -> UserSettings {
        UserSettings {
            nsfw_enabled: self.nsfw_enabled.unwrap_or(current.nsfw_enabled),
            profile_visibility: self.profile_visibility.unwrap_or(current.profile_visibility),
            messaging: self.messaging.unwrap_or(current.messaging),
        }
    }
}

/// Partial profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub location: Option<String>,
    pub profile_photo: Option<String>,
    pub banner_photo: Option<String>,
    pub settings: Option<SettingsUpdate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinPostRequest {
    pub post_id: Uuid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}
