//! SQLite-backed record store
//!
//! Both repositories share one `Database`: a connection pool plus the clock
//! that stamps every created row.

mod signal_repository;
mod trade_repository;

pub use signal_repository::SqliteSignalRepository;
pub use trade_repository::SqliteTradeRepository;

use herald_clock::SystemClock;
use herald_ports::{Clock, HeraldError, HeraldResult};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::infrastructure::config::DatabaseConfig;

const SCHEMA: &str = include_str!("../../../sql/schema.sql");

/// Shared handle to the durable store
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl Database {
    /// Open (or create) the database described by `config` and ensure the schema exists
    pub async fn connect(config: &DatabaseConfig) -> HeraldResult<Self> {
        Self::connect_with_clock(config, Arc::new(SystemClock::new())).await
    }

    pub async fn connect_with_clock(
        config: &DatabaseConfig,
        clock: Arc<dyn Clock>,
    ) -> HeraldResult<Self> {
        // `synchronous = FULL` makes every committed write durable before it returns
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(HeraldError::storage)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Full)
            .busy_timeout(Duration::from_secs(config.busy_timeout_secs))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(HeraldError::storage)?;

        info!(url = %config.url, "Connected to database");
        Self::with_pool(pool, clock).await
    }

    /// Private in-memory database, mainly for tests
    ///
    /// Pinned to a single connection that is never recycled, since every
    /// new SQLite memory connection starts out empty.
    pub async fn in_memory(clock: Arc<dyn Clock>) -> HeraldResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(HeraldError::storage)?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(HeraldError::storage)?;

        Self::with_pool(pool, clock).await
    }

    async fn with_pool(pool: SqlitePool, clock: Arc<dyn Clock>) -> HeraldResult<Self> {
        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(HeraldError::storage)?;
        debug!(clock = clock.name(), "Schema ready");

        Ok(Self { pool, clock })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Close every pooled connection, waiting for in-flight queries
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database closed");
    }

    pub fn signals(&self) -> SqliteSignalRepository {
        SqliteSignalRepository::new(self.clone())
    }

    pub fn trades(&self) -> SqliteTradeRepository {
        SqliteTradeRepository::new(self.clone())
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("connections", &self.pool.size())
            .field("clock", &self.clock.name())
            .finish()
    }
}

pub(crate) fn storage_error(err: sqlx::Error) -> HeraldError {
    HeraldError::storage(err)
}
