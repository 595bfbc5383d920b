/**
 * Router Configuration
 *
 * Assembles the public and protected route tables into one router.
 *
 * # Layers
 *
 * - The protected table gets the bearer-token middleware as a `route_layer`,
 *   so unmatched paths still fall through to the 404 handler instead of 401.
 * - `TraceLayer` wraps everything with a per-request span.
 * - Locally stored uploads are served under `/uploads`.
 */

use std::path::Path;

use axum::{http::StatusCode, middleware::from_fn_with_state, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::middleware::auth_middleware;
use crate::backend::routes::api_routes::{protected_routes, public_routes};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// `upload_dir` is the root of the local blob store; files it writes under
/// `uploads/` are served back at `/uploads/...`.
pub fn create_router(app_state: AppState, upload_dir: &str) -> Router<()> {
    let protected = protected_routes()
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    let uploads = Path::new(upload_dir).join("uploads");

    public_routes()
        .merge(protected)
        .nest_service("/uploads", ServeDir::new(uploads))
        .fallback(|| async { BackendError::handler(StatusCode::NOT_FOUND, "Route not found") })
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
