//! Friend Request Data Structure
//!
//! Represents friend requests between users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::NotificationKind;

/// Status of a friend request
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum FriendRequestStatus {
    /// Request is pending
    #[default]
    Pending,
    /// Request was accepted
    Accepted,
    /// Request was rejected
    Rejected,
}

impl FriendRequestStatus {
    /// Only pending requests can be answered, and only once
    pub fn can_transition_to(&self, next: FriendRequestStatus) -> bool {
        matches!(
            (self, next),
            (FriendRequestStatus::Pending, FriendRequestStatus::Accepted)
                | (FriendRequestStatus::Pending, FriendRequestStatus::Rejected)
        )
    }
}

/// Represents a friend request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct FriendRequest {
    /// Unique request ID
    pub id: Uuid,
    /// Username of the sender
    #[sqlx(rename = "from_username")]
    pub from: String,
    /// Username of the recipient
    #[sqlx(rename = "to_username")]
    pub to: String,
    /// Current status of the request
    pub status: FriendRequestStatus,
    /// When the request was created
    pub created_at: DateTime<Utc>,
    /// When the request was answered
    pub responded_at: Option<DateTime<Utc>>,
}

/// Request to send a friend request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendFriendRequest {
    /// Username of the recipient
    pub to: String,
}

/// Recipient's answer to a friend request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendRequestDecision {
    Accept,
    Reject,
}

impl FriendRequestDecision {
    pub fn target_status(&self) -> FriendRequestStatus {
        match self {
            Self::Accept => FriendRequestStatus::Accepted,
            Self::Reject => FriendRequestStatus::Rejected,
        }
    }

    /// Notification sent back to the requester
    pub fn notification_kind(&self) -> NotificationKind {
        match self {
            Self::Accept => NotificationKind::FriendAccept,
            Self::Reject => NotificationKind::FriendReject,
        }
    }
}
