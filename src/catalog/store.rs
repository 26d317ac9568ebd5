// ABOUTME: Catalog store lifecycle: background open, bundled-copy bootstrap, validation
// ABOUTME: Callers wait a bounded time for readiness and degrade to "unavailable" on timeout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use foodlab_core::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::repository::CatalogRepository;
use super::schema;
use crate::config::CatalogConfig;

/// Lifecycle state of the catalog store
#[derive(Debug, Clone)]
pub enum CatalogState {
    /// Background open still running
    Opening,
    /// Open, migrated, and validated
    Ready(SqlitePool),
    /// Failed to open or validate
    Unavailable(String),
}

/// Handle to the local food catalog
///
/// The store opens on a background task. All reads go through a pool capped at
/// one connection, so catalog access is serialized even under concurrent callers.
#[derive(Clone)]
pub struct CatalogStore {
    state: Arc<watch::Sender<CatalogState>>,
    open_timeout: Duration,
}

impl CatalogStore {
    /// Start opening the catalog in the background
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn open(config: &CatalogConfig) -> Self {
        let (tx, _rx) = watch::channel(CatalogState::Opening);
        let state = Arc::new(tx);
        let store = Self {
            state: Arc::clone(&state),
            open_timeout: config.open_timeout,
        };

        let config = config.clone();
        tokio::spawn(async move {
            let next = match open_pool(&config).await {
                Ok(pool) => match schema::validation_failure(&pool).await {
                    Ok(None) => {
                        info!(path = %config.path.display(), "catalog store ready");
                        CatalogState::Ready(pool)
                    }
                    Ok(Some(reason)) => {
                        warn!(path = %config.path.display(), %reason, "catalog failed validation");
                        CatalogState::Unavailable(reason)
                    }
                    Err(e) => {
                        warn!(error = %e, "catalog validation query failed");
                        CatalogState::Unavailable(e.to_string())
                    }
                },
                Err(e) => {
                    warn!(path = %config.path.display(), error = %e, "catalog failed to open");
                    CatalogState::Unavailable(e.to_string())
                }
            };
            state.send_replace(next);
        });

        store
    }

    /// Store over an already prepared pool (validated immediately by the caller)
    #[must_use]
    pub fn from_pool(pool: SqlitePool, open_timeout: Duration) -> Self {
        let (tx, _rx) = watch::channel(CatalogState::Ready(pool));
        Self {
            state: Arc::new(tx),
            open_timeout,
        }
    }

    /// Store that is permanently unavailable
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(CatalogState::Unavailable(reason.into()));
        Self {
            state: Arc::new(tx),
            open_timeout: Duration::ZERO,
        }
    }

    /// Current state without waiting
    #[must_use]
    pub fn state(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// Wait (bounded) for the store and return a repository, or `None` if unavailable
    pub async fn repository(&self) -> Option<CatalogRepository> {
        let mut rx = self.state.subscribe();
        let waited = tokio::time::timeout(
            self.open_timeout,
            rx.wait_for(|s| !matches!(s, CatalogState::Opening)),
        )
        .await;

        match waited {
            Ok(Ok(state)) => match &*state {
                CatalogState::Ready(pool) => Some(CatalogRepository::new(pool.clone())),
                CatalogState::Unavailable(reason) => {
                    debug!(%reason, "catalog unavailable");
                    None
                }
                CatalogState::Opening => None,
            },
            Ok(Err(_)) => {
                warn!("catalog opener went away before publishing a state");
                None
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.open_timeout.as_secs(),
                    "catalog not ready in time, treating as unavailable"
                );
                None
            }
        }
    }
}

/// Open (creating if needed) a single-connection pool for `path` and ensure the schema
///
/// # Errors
///
/// Returns a database error if the file cannot be opened or migrated
pub async fn connect(path: &Path) -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    schema::ensure_schema(&pool).await?;
    Ok(pool)
}

/// In-memory catalog with the schema applied
///
/// # Errors
///
/// Returns a database error if the schema cannot be created
pub async fn connect_in_memory() -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    schema::ensure_schema(&pool).await?;
    Ok(pool)
}

async fn open_pool(config: &CatalogConfig) -> AppResult<SqlitePool> {
    if let Some(parent) = config.path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    if !tokio::fs::try_exists(&config.path).await? {
        if let Some(bundled) = &config.bundled_path {
            if !tokio::fs::try_exists(bundled).await? {
                return Err(AppError::store_unavailable(format!(
                    "bundled catalog {} does not exist",
                    bundled.display()
                )));
            }
            info!(
                from = %bundled.display(),
                to = %config.path.display(),
                "copying bundled catalog into place"
            );
            tokio::fs::copy(bundled, &config.path).await?;
        }
    }

    connect(&config.path).await
}
