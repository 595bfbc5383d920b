//! Post Data Structures
//!
//! Posts, reactions and comment trees. Comments are stored flat with a parent
//! reference; [`build_comment_tree`] assembles the nested shape on read.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use crate::shared::SharedError;

/// Upper bound on post and comment content, in Unicode scalar values
pub const MAX_POST_CHARS: usize = 280;

/// Upper bound on a reaction type name
pub const MAX_REACTION_CHARS: usize = 32;

/// Deepest allowed reply; top-level comments have depth 0
pub const MAX_REPLY_DEPTH: i64 = 8;

/// A stored post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub username: String,
    pub content: String,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
    pub hashtags: Json<Vec<String>>,
    pub likes: i64,
    pub shares: i64,
    pub is_short: bool,
    pub is_nsfw: bool,
    pub deleted: bool,
    pub sponsored: bool,
    pub live: bool,
    pub nft_address: String,
    pub mint_earnings: f64,
    pub group_id: Option<Uuid>,
    pub page_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A stored comment or reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub depth: i64,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A comment with its replies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

/// A post with its reaction buckets, hidden-by set and comment tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub reactions: BTreeMap<String, i64>,
    pub hidden_by: Vec<String>,
    pub comments: Vec<CommentNode>,
}

/// Assemble flat comments into a forest
///
/// Input order is preserved among siblings. A comment whose parent is not in
/// the input is treated as a root.
pub fn build_comment_tree(comments: Vec<Comment>) -> Vec<CommentNode> {
    let ids: HashSet<Uuid> = comments.iter().map(|c| c.id).collect();
    let mut children: HashMap<Uuid, Vec<Comment>> = HashMap::new();
    let mut roots = Vec::new();

    for comment in comments {
        match comment.parent_id {
            Some(parent) if ids.contains(&parent) => {
                children.entry(parent).or_default().push(comment)
            }
            _ => roots.push(comment),
        }
    }

    roots
        .into_iter()
        .map(|root| attach(root, &mut children))
        .collect()
}

fn attach(comment: Comment, children: &mut HashMap<Uuid, Vec<Comment>>) -> CommentNode {
    let replies = children
        .remove(&comment.id)
        .unwrap_or_default()
        .into_iter()
        .map(|reply| attach(reply, children))
        .collect();
    CommentNode { comment, replies }
}

/// Simulated NFT address derived from the post id
pub fn nft_address(id: Uuid) -> String {
    format!("0x{}", id.simple())
}

/// Check that `content` is non-empty and within [`MAX_POST_CHARS`]
pub fn validate_content(field: &str, content: &str) -> Result<(), SharedError> {
    if content.trim().is_empty() {
        return Err(SharedError::validation(field, "Content must not be empty"));
    }
    if content.chars().count() > MAX_POST_CHARS {
        return Err(SharedError::validation(
            field,
            format!("Content exceeds {} characters", MAX_POST_CHARS),
        ));
    }
    Ok(())
}

/// Body of `POST /posts` and its variants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub is_short: bool,
    #[serde(default)]
    pub is_nsfw: bool,
}

impl CreatePostRequest {
    /// A plain text post
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), SharedError> {
        if self.content.chars().count() > MAX_POST_CHARS {
            return Err(SharedError::validation(
                "content",
                format!("Post exceeds {} characters", MAX_POST_CHARS),
            ));
        }
        if self.content.trim().is_empty() && self.media_url.is_none() {
            return Err(SharedError::validation(
                "content",
                "Post must have content or media",
            ));
        }
        Ok(())
    }
}

/// Body of `POST /posts/{id}/react`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactRequest {
    #[serde(rename = "type")]
    pub reaction: String,
}

impl ReactRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        let len = self.reaction.chars().count();
        if len == 0 || len > MAX_REACTION_CHARS {
            return Err(SharedError::validation(
                "type",
                format!("Reaction type must be 1-{} characters", MAX_REACTION_CHARS),
            ));
        }
        Ok(())
    }
}

/// Body of the comment and reply endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

impl CommentRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_content("content", &self.content)
    }
}

/// Query string of the feed endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedQuery {
    pub filter: Option<String>,
}

impl FeedQuery {
    /// Media type to filter on; `all` and empty mean no filter
    pub fn media_filter(&self) -> Option<&str> {
        self.filter
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty() && !f.eq_ignore_ascii_case("all"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn comment(id: u128, parent: Option<u128>, depth: i64) -> Comment {
        Comment {
            id: Uuid::from_u128(id),
            post_id: Uuid::from_u128(999),
            parent_id: parent.map(Uuid::from_u128),
            depth,
            username: "alice".to_string(),
            content: format!("comment {}", id),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_content_bound_counts_chars() {
        let at_limit = "é".repeat(MAX_POST_CHARS);
        assert!(CreatePostRequest::text(at_limit).validate().is_ok());

        let over = "a".repeat(MAX_POST_CHARS + 1);
        assert!(CreatePostRequest::text(over).validate().is_err());
    }

    #[test]
    fn test_media_only_post_is_valid() {
        let request = CreatePostRequest {
            media_url: Some("https://example.com/a.png".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
        assert!(CreatePostRequest::text("   ").validate().is_err());
    }

    #[test]
    fn test_reaction_bounds() {
        let ok = ReactRequest { reaction: "laugh".to_string() };
        assert!(ok.validate().is_ok());
        let empty = ReactRequest { reaction: String::new() };
        assert!(empty.validate().is_err());
        let long = ReactRequest { reaction: "x".repeat(MAX_REACTION_CHARS + 1) };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_feed_filter() {
        let all = FeedQuery { filter: Some("all".to_string()) };
        assert_eq!(all.media_filter(), None);
        let video = FeedQuery { filter: Some("video".to_string()) };
        assert_eq!(video.media_filter(), Some("video"));
        assert_eq!(FeedQuery::default().media_filter(), None);
    }

    #[test]
    fn test_build_comment_tree_nests_replies() {
        let comments = vec![
            comment(1, None, 0),
            comment(2, Some(1), 1),
            comment(3, None, 0),
            comment(4, Some(2), 2),
            comment(5, Some(1), 1),
        ];
        let tree = build_comment_tree(comments);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].comment.id, Uuid::from_u128(1));
        let replies: Vec<Uuid> = tree[0].replies.iter().map(|r| r.comment.id).collect();
        assert_eq!(replies, vec![Uuid::from_u128(2), Uuid::from_u128(5)]);
        assert_eq!(tree[0].replies[0].replies[0].comment.id, Uuid::from_u128(4));
        assert!(tree[1].replies.is_empty());
    }

    #[test]
    fn test_orphan_reply_becomes_root() {
        let tree = build_comment_tree(vec![comment(7, Some(42), 1)]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].comment.id, Uuid::from_u128(7));
    }

    #[test]
    fn test_nft_address_format() {
        let address = nft_address(Uuid::from_u128(1));
        assert!(address.starts_with("0x"));
        assert_eq!(address.len(), 34);
    }
}
