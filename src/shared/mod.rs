//! Shared Module
//!
//! This module contains the data model and validation rules used by the
//! HTTP handlers. Every type here is plain serializable data; nothing in this
//! module touches the database or the network.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Social data model
pub mod social;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
