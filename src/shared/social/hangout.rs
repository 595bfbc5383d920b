//! Hangouts: scheduled meetups among friends

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::SharedError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Hangout {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub creator: String,
    /// Free-form schedule text supplied by the creator
    pub date: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HangoutDetail {
    #[serde(flatten)]
    pub hangout: Hangout,
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHangoutRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
}

impl CreateHangoutRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.name.trim().is_empty() {
            return Err(SharedError::validation("name", "Hangout name must not be empty"));
        }
        Ok(())
    }
}
