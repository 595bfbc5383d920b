//! Groups and pages

pub mod db;
pub mod handlers;
