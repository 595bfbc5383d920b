//! Friend requests
//!
//! Accepting a request writes both directions of the friendship; the
//! friendship edges themselves are read through `users::db`.

pub mod db;
pub mod handlers;
