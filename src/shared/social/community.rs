//! Groups and pages
//!
//! Both share one record shape. Groups have members who may all post; pages
//! have followers and only the creator posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Post;
use crate::shared::SharedError;

const MAX_NAME_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunityKind {
    Group,
    Page,
}

impl CommunityKind {
    /// Table holding the community records
    pub fn table(&self) -> &'static str {
        match self {
            Self::Group => "groups",
            Self::Page => "pages",
        }
    }

    /// Membership table and its foreign-key column
    pub fn membership(&self) -> (&'static str, &'static str) {
        match self {
            Self::Group => ("group_members", "group_id"),
            Self::Page => ("page_followers", "page_id"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Group => "Group",
            Self::Page => "Page",
        }
    }
}

/// A stored group or page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Community {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub creator: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDetail {
    #[serde(flatten)]
    pub group: Community,
    pub members: Vec<String>,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDetail {
    #[serde(flatten)]
    pub page: Community,
    pub followers: Vec<String>,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommunityRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CreateCommunityRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        let len = self.name.trim().chars().count();
        if len == 0 || len > MAX_NAME_CHARS {
            return Err(SharedError::validation(
                "name",
                format!("Name must be 1-{} characters", MAX_NAME_CHARS),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation() {
        let ok = CreateCommunityRequest { name: "Rustaceans".into(), description: String::new() };
        assert!(ok.validate().is_ok());
        let blank = CreateCommunityRequest { name: "  ".into(), description: String::new() };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_tables() {
        assert_eq!(CommunityKind::Group.membership(), ("group_members", "group_id"));
        assert_eq!(CommunityKind::Page.table(), "pages");
    }
}
