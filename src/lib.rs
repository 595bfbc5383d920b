//! Amity - Social Networking Backend
//!
//! Amity is a REST backend for a social-networking application: user
//! accounts, posts, comments and reactions, groups, pages, friend requests,
//! direct messages, notifications, hangouts, lists, and simulated
//! monetization/NFT bookkeeping.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared by handlers and clients
//!   - Social data model (users, posts, notifications, ...)
//!   - Validation rules and error types
//!   - Application configuration
//!
//! - **`backend`** - The Axum HTTP server
//!   - Storage client over SQLite (`sqlx`)
//!   - JWT authentication middleware
//!   - One handler cluster per resource
//!   - Notification fan-out
//!   - Blob upload collaborator
//!
//! # Usage
//!
//! ```rust,no_run
//! use amity::backend::server::init::create_app;
//! use amity::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Types shared between the server and its clients
pub mod shared;

/// Server-side code
pub mod backend;
