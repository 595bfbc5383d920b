//! Posts, engagement and comments
//!
//! - **`db`** - Post, reaction, hidden-by and comment storage
//! - **`publish`** - Shared creation path for every kind of post
//! - **`handlers`** - HTTP endpoints

pub mod db;
pub mod handlers;
pub mod publish;

pub use publish::{publish_post, Origin, PostKind};
