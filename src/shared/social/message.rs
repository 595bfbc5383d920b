//! Direct and admin messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::SharedError;

/// A message between two users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DirectMessage {
    pub id: Uuid,
    #[sqlx(rename = "from_username")]
    pub from: String,
    #[sqlx(rename = "to_username")]
    pub to: String,
    pub content: String,
    pub ai_response: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub to: String,
    pub content: String,
    #[serde(default)]
    pub ai_response: bool,
}

impl SendMessageRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.content.trim().is_empty() {
            return Err(SharedError::validation("content", "Message must not be empty"));
        }
        Ok(())
    }
}

/// A message addressed to the site administrators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AdminMessage {
    pub id: Uuid,
    #[sqlx(rename = "from_username")]
    pub from: String,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactAdminRequest {
    pub content: String,
}

impl ContactAdminRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.content.trim().is_empty() {
            return Err(SharedError::validation("content", "Message must not be empty"));
        }
        Ok(())
    }
}
