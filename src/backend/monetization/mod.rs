//! Simulated creator earnings

pub mod db;
pub mod handlers;
