//! Administration: moderation, sponsored content and the admin inbox

pub mod db;
pub mod handlers;
