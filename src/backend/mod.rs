//! Backend Module
//!
//! All server-side code: the Axum HTTP server, storage, authentication and
//! one handler cluster per resource.
//!
//! # Architecture
//!
//! - **`server`** - Application state, service loading, app creation
//! - **`routes`** - Route tables and router assembly
//! - **`store`** - SQLite pool with per-operation timeouts
//! - **`auth`** - Registration, login, JWT sessions, user records
//! - **`middleware`** - Bearer-token authentication and identity extractors
//! - **`error`** - `BackendError` and its HTTP rendering
//! - **`notifications`** - Best-effort notification fan-out
//! - **`upload`** - Blob store collaborator and `POST /upload`
//! - **`users`**, **`posts`**, **`communities`**, **`friends`**,
//!   **`messaging`**, **`lists`**, **`hangouts`**, **`monetization`**,
//!   **`admin`** - Resource handlers and their queries
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── store/          - Storage client
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── error/          - Error types
//! ├── notifications/  - Notification fan-out
//! ├── upload/         - File uploads
//! └── <resource>/     - db.rs + handlers.rs per resource
//! ```
//!
//! # State Management
//!
//! `AppState` carries the configuration, the `Store`, the `Notifier`, the
//! session keys and the blob store. Handlers pull out only the parts they
//! need through `FromRef`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Storage client
pub mod store;

/// Backend error types
pub mod error;

/// Authentication and user records
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Notification records and fan-out
pub mod notifications;

/// File uploads and the blob store
pub mod upload;

/// Profiles and the follow/block graph
pub mod users;

/// Posts, engagement and comments
pub mod posts;

/// Groups and pages
pub mod communities;

/// Friend requests
pub mod friends;

/// Direct messages
pub mod messaging;

/// User lists
pub mod lists;

/// Hangouts
pub mod hangouts;

/// Simulated earnings
pub mod monetization;

/// Moderation and the admin inbox
pub mod admin;

pub use error::BackendError;
pub use server::{create_app, create_app_with_store, AppState};
pub use store::{Store, StoreError};
