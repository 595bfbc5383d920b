//! Ordered, user-curated lists

pub mod db;
pub mod handlers;
