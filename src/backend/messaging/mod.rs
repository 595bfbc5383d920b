//! Direct messaging between users

pub mod db;
pub mod handlers;
