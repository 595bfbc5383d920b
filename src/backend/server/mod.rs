//! Server Module
//!
//! This module contains the code that initializes and configures the Axum
//! HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Store and blob store loading
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: Connects the store and runs migrations
//! 2. **Collaborators**: Selects the blob store
//! 3. **Admins**: Promotes configured usernames
//! 4. **Router Creation**: Configures all routes and middleware

/// Application state management
pub mod state;

/// Service loading from configuration
pub mod config;

/// Server initialization
pub mod init;

pub use init::{create_app, create_app_with_store};
pub use state::AppState;
