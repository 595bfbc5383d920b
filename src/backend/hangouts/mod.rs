//! Hangouts among friends

pub mod db;
pub mod handlers;
