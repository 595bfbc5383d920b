//! Social Module
//!
//! This module contains the data structures of the social network:
//!
//! - `User` - Account, profile, settings and moderation flags
//! - `Post` / `Comment` - Posts, engagement counters and comment trees
//! - `Notification` - Per-recipient activity records
//! - `FriendRequest` - Pending/accepted/rejected friendship offers
//! - `Community` - Groups and pages
//! - `DirectMessage` / `AdminMessage` - Messaging
//! - `UserList`, `Hangout`, `Monetization` - Auxiliary resources
//! - `MediaKind` - Upload classification
//!
//! # Usage
//!
//! ```rust
//! use amity::shared::social::{CreatePostRequest, MAX_POST_CHARS};
//!
//! let request = CreatePostRequest::text("x".repeat(MAX_POST_CHARS + 1));
//! assert!(request.validate().is_err());
//! ```

pub mod user;
pub mod post;
pub mod notification;
pub mod friend_request;
pub mod community;
pub mod message;
pub mod list;
pub mod hangout;
pub mod monetization;
pub mod media;

pub use user::{
    is_valid_username, AuthResponse, LoginRequest, MessagingPolicy, PinPostRequest,
    ProfileVisibility, RegisterRequest, SearchQuery, SettingsUpdate, SocialGraph,
    UpdateProfileRequest, User, UserSettings, UserView,
};
pub use post::{
    build_comment_tree, nft_address, validate_content, Comment, CommentNode, CommentRequest,
    CreatePostRequest, FeedQuery, Post, PostDetail, ReactRequest, MAX_POST_CHARS,
    MAX_REACTION_CHARS, MAX_REPLY_DEPTH,
};
pub use notification::{Notification, NotificationKind};
pub use friend_request::{
    FriendRequest, FriendRequestDecision, FriendRequestStatus, SendFriendRequest,
};
pub use community::{
    Community, CommunityKind, CreateCommunityRequest, GroupDetail, PageDetail,
};
pub use message::{AdminMessage, ContactAdminRequest, DirectMessage, SendMessageRequest};
pub use list::{AddListItemRequest, CreateListRequest, ListDetail, ListItem, UserList};
pub use hangout::{CreateHangoutRequest, Hangout, HangoutDetail};
pub use monetization::{Monetization, UpdateMonetizationRequest};
pub use media::{sanitize_filename, upload_key, MediaKind, UploadResponse, MAX_UPLOAD_BYTES};
