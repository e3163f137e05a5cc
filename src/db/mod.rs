pub mod memory;
pub mod models;
pub mod postgres;

use std::{str::FromStr, time::Duration};

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::{error, info};

use crate::config::{Config, StoreBackend};
use memory::MemoryStore;
use models::{NewReading, Reading};
use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
    /// The store could not be configured at startup.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Handle to the reading store, built once at startup and cloned into the
/// router state.
#[derive(Clone)]
pub enum Store {
    Postgres(PgStore),
    Memory(MemoryStore),
    /// Postgres was selected but no usable connection string was given.
    /// Every operation fails with the stored reason.
    Unavailable(String),
}

impl Store {
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    /// Build the store selected by `config`.
    ///
    /// Never fails: the postgres pool connects lazily, and a database that is
    /// down, missing its schema or misconfigured at boot is logged while the
    /// store routes answer 500 until it becomes usable.
    pub async fn open(config: &Config) -> Self {
        match config.store_backend {
            StoreBackend::Memory => {
                info!("Using in-memory reading store");
                Self::memory()
            }
            StoreBackend::Postgres => match create_pool(config) {
                Ok(pool) => {
                    let store = PgStore::new(pool);
                    if let Err(e) = store.ensure_schema().await {
                        error!(error = %e, "Database unavailable at startup; will retry on first request");
                    }
                    Self::Postgres(store)
                }
                Err(e) => {
                    let reason = format!("{e:#}");
                    error!(error = %reason, "Database not configured; store routes will fail");
                    Self::Unavailable(reason)
                }
            },
        }
    }

    pub async fn insert(&self, new: NewReading) -> Result<Reading, StoreError> {
        match self {
            Self::Postgres(store) => store.insert(new).await,
            Self::Memory(store) => Ok(store.insert(new).await),
            Self::Unavailable(reason) => Err(StoreError::Unavailable(reason.clone())),
        }
    }

    /// Every reading, most recent `recorded_at` first.
    pub async fn list(&self) -> Result<Vec<Reading>, StoreError> {
        match self {
            Self::Postgres(store) => store.list().await,
            Self::Memory(store) => Ok(store.list().await),
            Self::Unavailable(reason) => Err(StoreError::Unavailable(reason.clone())),
        }
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        match self {
            Self::Postgres(store) => store.count().await,
            Self::Memory(store) => Ok(store.count().await),
            Self::Unavailable(reason) => Err(StoreError::Unavailable(reason.clone())),
        }
    }
}

pub fn create_pool(config: &Config) -> Result<PgPool> {
    let url = config
        .database_url
        .as_deref()
        .context("missing required env var: DATABASE_URL")?;
    let options = PgConnectOptions::from_str(url)
        .context("DATABASE_URL is not a valid PostgreSQL connection string")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .connect_lazy_with(options);
    Ok(pool)
}
