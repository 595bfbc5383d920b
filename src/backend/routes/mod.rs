//! Route Configuration Module
//!
//! - **`api_routes`** - Public and protected route tables
//! - **`router`** - Router assembly, middleware and fallback
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - Route tables
//! ```

/// Main router creation
pub mod router;

/// Public and protected route tables
pub mod api_routes;

pub use router::create_router;
