//! Notifications
//!
//! - **`fanout`** - `Notifier`, used by every handler that affects another user
//! - **`db`** - Notification table access
//! - **`handlers`** - Listing and read-marking endpoints

pub mod db;
pub mod fanout;
pub mod handlers;

pub use fanout::Notifier;
