/**
 * Storage Client
 *
 * `Store` owns the SQLite connection pool and the per-operation timeout.
 * It is built once at startup and handed to every handler through
 * `AppState`; there is no global database handle.
 *
 * Every query goes through [`Store::timed`], which bounds it with the
 * configured timeout. An expired operation fails with
 * [`StoreError::Timeout`] and is never retried.
 */

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

/// Storage failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage operation timed out after {0:?}")]
    Timeout(Duration),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migrate(#[from] MigrateError),
}

impl StoreError {
    /// Whether the failure was a UNIQUE or PRIMARY KEY violation
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(e)) => e.is_unique_violation(),
            _ => false,
        }
    }
}

/// Pooled storage handle
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
    op_timeout: Duration,
}

impl Store {
    /// Connect to the database at `url`, creating the file if missing
    pub async fn connect(
        url: &str,
        max_connections: u32,
        op_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(op_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(op_timeout)
            .connect_with(options)
            .await?;

        Ok(Self { pool, op_timeout })
    }

    /// Private in-memory database
    ///
    /// An in-memory SQLite database lives only as long as its connection, so
    /// the pool is pinned to a single connection that never expires.
    pub async fn in_memory(op_timeout: Duration) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool, op_timeout })
    }

    /// Apply pending migrations from `migrations/`
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run one storage operation under the configured timeout
    pub async fn timed<T, F>(&self, operation: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.op_timeout, operation).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(StoreError::Timeout(self.op_timeout)),
        }
    }
}
