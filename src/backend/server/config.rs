/**
 * Server Configuration
 *
 * This module turns an `AppConfig` into the services the server runs on:
 * the storage client (with migrations applied) and the blob store.
 *
 * # Error Handling
 *
 * A storage client that cannot connect or migrate is fatal; the server does
 * not start without its database.
 */

use std::sync::Arc;

use crate::backend::store::{Store, StoreError};
use crate::backend::upload::{BlobStore, HttpBlobStore, LocalBlobStore};
use crate::shared::AppConfig;

/// Connect to the database and run migrations
pub async fn load_store(config: &AppConfig) -> Result<Store, StoreError> {
    tracing::info!("Connecting to database...");

    let store = Store::connect(
        &config.database_url,
        config.database_max_connections,
        config.store_timeout(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to create database connection pool: {:?}", e);
        e
    })?;

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    store.migrate().await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {:?}", e);
        e
    })?;
    tracing::info!("Database migrations completed successfully");

    Ok(store)
}

/// Pick the blob store: HTTP object store when an endpoint is configured,
/// the local upload directory otherwise
pub fn load_blob_store(config: &AppConfig) -> Arc<dyn BlobStore> {
    match &config.blob_endpoint {
        Some(endpoint) => {
            tracing::info!("Uploads go to bucket {} at {}", config.blob_bucket, endpoint);
            Arc::new(HttpBlobStore::new(
                endpoint.clone(),
                config.blob_bucket.clone(),
                config.blob_public_url.clone(),
            ))
        }
        None => {
            tracing::warn!(
                "BLOB_ENDPOINT not set. Uploads are stored locally in {}",
                config.upload_dir
            );
            Arc::new(LocalBlobStore::new(&config.upload_dir))
        }
    }
}
