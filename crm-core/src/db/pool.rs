//! Database connection pool management
//!
//! Uses sqlx PgPool behind an explicit handle owned by the composition root.
//! The pool is created lazily on first use and can be shut down and recreated.

use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::DatabaseConfig;
use crate::error::{DbError, Result};

/// Handle to the shared connection pool.
///
/// Cheap to clone; all clones share one underlying pool.
#[derive(Clone)]
pub struct PoolManager {
    inner: Arc<PoolManagerInner>,
}

struct PoolManagerInner {
    config: DatabaseConfig,
    pool: Mutex<Option<PgPool>>,
}

impl PoolManager {
    /// Create an uninitialized manager. No connection is made until first use.
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            inner: Arc::new(PoolManagerInner {
                config,
                pool: Mutex::new(None),
            }),
        }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.inner.config
    }

    /// Create the pool if it does not exist yet, returning the live pool.
    ///
    /// Idempotent: a second call returns the existing pool without reconnecting.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for impossible limits and `Connectivity` if the
    /// store cannot be reached.
    pub async fn initialize(&self) -> Result<PgPool> {
        let mut slot = self.inner.pool.lock().await;
        if let Some(pool) = slot.as_ref() {
            return Ok(pool.clone());
        }

        let config = &self.inner.config;
        config.validate()?;

        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.url)
            .await
            .map_err(|e| DbError::connectivity(format!("failed to connect to database: {}", e)))?;

        tracing::info!(
            min = config.min_connections,
            max = config.max_connections,
            "database pool initialized"
        );

        *slot = Some(pool.clone());
        Ok(pool)
    }

    /// Check out one connection, initializing the pool on first use.
    ///
    /// The returned handle goes back to the pool when dropped, on every path.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>> {
        let pool = self.initialize().await?;
        pool.acquire().await.map_err(DbError::from)
    }

    /// Close every connection and return to the uninitialized state.
    ///
    /// Waits for checked-out connections to come back first.
    pub async fn shutdown(&self) {
        let pool = self.inner.pool.lock().await.take();
        if let Some(pool) = pool {
            pool.close().await;
            tracing::info!("database pool closed");
        }
    }

    pub async fn is_initialized(&self) -> bool {
        self.inner.pool.lock().await.is_some()
    }
}

impl std::fmt::Debug for PoolManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolManager")
            .field("max_connections", &self.inner.config.max_connections)
            .finish_non_exhaustive()
    }
}
