//! User-curated lists of heterogeneous items

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::SharedError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserList {
    pub id: Uuid,
    pub owner: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// An entry in a list; `position` follows insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ListItem {
    pub position: i64,
    #[serde(rename = "type")]
    pub item_type: String,
    pub item_id: String,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDetail {
    #[serde(flatten)]
    pub list: UserList,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListRequest {
    pub name: String,
}

impl CreateListRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.name.trim().is_empty() {
            return Err(SharedError::validation("name", "List name must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddListItemRequest {
    #[serde(rename = "type")]
    pub item_type: String,
    pub item_id: String,
}

impl AddListItemRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.item_type.trim().is_empty() {
            return Err(SharedError::validation("type", "Item type must not be empty"));
        }
        if self.item_id.trim().is_empty() {
            return Err(SharedError::validation("item_id", "Item id must not be empty"));
        }
        Ok(())
    }
}
