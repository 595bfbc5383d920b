//! File uploads
//!
//! - **`blob`** - The `BlobStore` collaborator and its HTTP/local backends
//! - **`handlers`** - `POST /upload`

pub mod blob;
pub mod handlers;

pub use blob::{BlobError, BlobStore, HttpBlobStore, LocalBlobStore};
