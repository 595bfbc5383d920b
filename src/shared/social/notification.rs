//! Notification Data Structure
//!
//! A notification records that an actor did something affecting the
//! recipient. Records are append-only; only `is_read` ever changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What triggered a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum NotificationKind {
    Like,
    Reaction,
    Share,
    Comment,
    Reply,
    FriendRequest,
    FriendAccept,
    FriendReject,
    Follow,
    Message,
    Hangout,
    Post,
    Live,
    Verified,
}

impl NotificationKind {
    /// Human-readable text shown to the recipient
    ///
    /// `detail` carries the reaction type for [`Reaction`](Self::Reaction)
    /// and the hangout name for [`Hangout`](Self::Hangout); other kinds
    /// ignore it.
    pub fn describe(&self, actor: &str, detail: &str) -> String {
        match self {
            Self::Like => format!("{} liked your post", actor),
            Self::Reaction => format!("{} reacted to your post with {}", actor, detail),
            Self::Share => format!("{} shared your post", actor),
            Self::Comment => format!("{} commented on your post", actor),
            Self::Reply => format!("{} replied to your comment", actor),
            Self::FriendRequest => format!("{} sent you a friend request", actor),
            Self::FriendAccept => format!("{} accepted your friend request", actor),
            Self::FriendReject => format!("{} rejected your friend request", actor),
            Self::Follow => format!("{} followed you", actor),
            Self::Message => format!("{} sent you a message", actor),
            Self::Hangout => format!("{} created a new hangout: {}", actor, detail),
            Self::Post => format!("{} created a new post", actor),
            Self::Live => format!("{} is live!", actor),
            Self::Verified => "Your account has been verified!".to_string(),
        }
    }
}

/// A stored notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub recipient: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub actor: String,
    pub message: String,
    pub related_id: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// A fresh, unread notification
    pub fn new(
        recipient: impl Into<String>,
        kind: NotificationKind,
        actor: impl Into<String>,
        message: impl Into<String>,
        related_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient: recipient.into(),
            kind,
            actor: actor.into(),
            message: message.into(),
            related_id: related_id.into(),
            is_read: false,
            created_at: Utc::now(),
        }
    }
}
