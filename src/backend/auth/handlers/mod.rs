//! Authentication Handlers Module
//!
//! # Handlers
//!
//! - **`register`** - POST /register - User registration
//! - **`login`** - POST /login - User authentication
//! - **`get_me`** - GET /me - Current user's own view
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email, password → user created → JWT returned
//! 2. **Login**: username, password → credentials verified → JWT returned
//! 3. **Get Me**: JWT → identity resolved by middleware → user returned

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

pub use login::login;
pub use me::get_me;
pub use register::register;
