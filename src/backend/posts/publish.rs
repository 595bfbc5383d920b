/**
 * Post Publishing
 *
 * Every route that creates a post goes through [`publish_post`]: the plain
 * and live timeline endpoints, group and page posting, and admin sponsored
 * posts. The author always comes from the authenticated identity, never from
 * the request body.
 *
 * Timeline posts fan out to the author's followers (`post` or `live`).
 * Sponsored posts and posts inside a group or page do not fan out.
 */

use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use super::db;
use crate::backend::error::BackendError;
use crate::backend::notifications::Notifier;
use crate::backend::store::Store;
use crate::backend::users::db::followers_of;
use crate::shared::social::{nft_address, CreatePostRequest, NotificationKind, Post};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    Regular,
    Live,
    Sponsored,
}

/// Where a post is published
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Timeline,
    Group(Uuid),
    Page(Uuid),
}

/// Build a fresh post record owned by `author`
pub fn new_post(author: &str, request: CreatePostRequest, kind: PostKind, origin: Origin) -> Post {
    let id = Uuid::new_v4();
    let (group_id, page_id) = match origin {
        Origin::Timeline => (None, None),
        Origin::Group(id) => (Some(id), None),
        Origin::Page(id) => (None, Some(id)),
    };

    Post {
        id,
        username: author.to_string(),
        content: request.content,
        media_url: request.media_url,
        media_type: request.media_type,
        hashtags: Json(request.hashtags),
        likes: 0,
        shares: 0,
        is_short: request.is_short,
        is_nsfw: request.is_nsfw,
        deleted: false,
        sponsored: kind == PostKind::Sponsored,
        live: kind == PostKind::Live,
        nft_address: nft_address(id),
        mint_earnings: 0.0,
        group_id,
        page_id,
        created_at: Utc::now(),
    }
}

/// Validate, store and announce a post
pub async fn publish_post(
    store: &Store,
    notifier: &Notifier,
    author: &str,
    request: CreatePostRequest,
    kind: PostKind,
    origin: Origin,
) -> Result<Post, BackendError> {
    request.validate()?;

    let post = new_post(author, request, kind, origin);
    db::insert_post(store, &post).await?;
    tracing::info!("{} published post {} ({:?}, {:?})", author, post.id, kind, origin);

    let announcement = match (kind, origin) {
        (PostKind::Regular, Origin::Timeline) => Some(NotificationKind::Post),
        (PostKind::Live, Origin::Timeline) => Some(NotificationKind::Live),
        _ => None,
    };

    if let Some(notification) = announcement {
        let followers = followers_of(store, author).await?;
        let message = notification.describe(author, "");
        notifier
            .fan_out(&followers, notification, author, &message, &post.id.to_string())
            .await;
    }

    Ok(post)
}
