/**
 * Server Initialization
 *
 * # Initialization Process
 *
 * 1. Connect to the database and run migrations
 * 2. Select the blob store
 * 3. Promote configured admins
 * 4. Build the application state and router
 */

use axum::Router;

use crate::backend::auth::users::{set_flag, UserFlag};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_blob_store, load_store};
use crate::backend::server::state::AppState;
use crate::backend::store::{Store, StoreError};
use crate::shared::AppConfig;

/// Create and configure the Axum application
pub async fn create_app(config: AppConfig) -> Result<Router<()>, StoreError> {
    tracing::info!("Initializing Amity backend server");

    let store = load_store(&config).await?;
    create_app_with_store(config, store).await
}

/// Build the application over an existing store
///
/// Used by tests to run against an in-memory database.
pub async fn create_app_with_store(config: AppConfig, store: Store) -> Result<Router<()>, StoreError> {
    promote_admins(&store, &config.admins).await?;

    let blobs = load_blob_store(&config);
    let upload_dir = config.upload_dir.clone();
    let state = AppState::new(config, store, blobs);

    let app = create_router(state, &upload_dir);
    tracing::info!("Router configured");
    Ok(app)
}

async fn promote_admins(store: &Store, admins: &[String]) -> Result<(), StoreError> {
    for username in admins {
        if set_flag(store, username, UserFlag::Admin, true).await? {
            tracing::info!("Promoted {} to admin", username);
        } else {
            tracing::warn!("Configured admin {} does not exist yet", username);
        }
    }
    Ok(())
}
