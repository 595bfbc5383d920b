/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is built once at startup and cloned into every request. It
 * holds:
 * - The validated configuration
 * - The storage client
 * - The notification fan-out
 * - Session signing keys
 * - The blob store collaborator
 *
 * Every field is cheap to clone (`Arc` or pool handle); no field holds
 * mutable in-process state.
 *
 * # Example
 *
 * ```rust,no_run
 * use amity::backend::store::Store;
 * use axum::extract::State;
 *
 * async fn handler(State(store): State<Store>) {
 *     let _ = store.pool();
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::notifications::Notifier;
use crate::backend::store::Store;
use crate::backend::upload::BlobStore;
use crate::shared::AppConfig;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Store,
    pub notifier: Notifier,
    pub sessions: SessionKeys,
    pub blobs: Arc<dyn BlobStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Store, blobs: Arc<dyn BlobStore>) -> Self {
        let sessions = SessionKeys::from_config(&config);
        Self {
            notifier: Notifier::new(store.clone()),
            config: Arc::new(config),
            store,
            sessions,
            blobs,
        }
    }
}

impl FromRef<AppState> for Store {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Notifier {
    fn from_ref(state: &AppState) -> Self {
        state.notifier.clone()
    }
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn BlobStore> {
    fn from_ref(state: &AppState) -> Self {
        state.blobs.clone()
    }
}
