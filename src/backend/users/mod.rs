//! Users and the social graph
//!
//! - **`db`** - Follow, friendship and block edges
//! - **`handlers`** - Profile, follow/block, pin and search endpoints

pub mod db;
pub mod handlers;
