//! Herald signal service
//!
//! Ingests trading signals over HTTP, records them durably in SQLite, links
//! trades to the signal that motivated them and pushes every new signal to
//! connected WebSocket subscribers.
//!
//! # Architecture
//!
//! - **Application**: use cases (IngestSignal, RecordTrade, UpdateTradeStatus, queries)
//! - **Infrastructure**: SQLite repositories, the broadcast hub, configuration
//! - **Presentation**: REST API and the `/ws` signal stream
//!
//! A signal is always persisted before it is broadcast, so any id a
//! subscriber sees can be read back from the store.
//!
//! # Example
//!
//! ```ignore
//! use herald_server::{Herald, HeraldConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let herald = Herald::connect(HeraldConfig::default()).await?;
//!     herald.run().await?;
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use infrastructure::{
    BroadcastHub, ConfigError, Database, DatabaseConfig, HeraldConfig, SqliteSignalRepository,
    SqliteTradeRepository, Subscription,
};
pub use presentation::{ApiError, AppState, WsFrame, create_router};

// Re-export the shared kernel for integration tests
pub use herald_core::{Signal, SignalEvent, Trade, TradeStatus};
pub use herald_ports::{HeraldError, HeraldResult, SignalRepository, TradeRepository};

use axum::Router;
use herald_clock::SystemClock;
use herald_ports::Clock;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// The service instance: configuration, record store and broadcast hub
///
/// Built once at start-up and handed to the router; there is no global state.
pub struct Herald {
    pub config: HeraldConfig,
    pub database: Database,
    pub hub: Arc<BroadcastHub>,
}

impl Herald {
    /// Open the configured database with the system clock
    pub async fn connect(config: HeraldConfig) -> HeraldResult<Self> {
        Self::connect_with_clock(config, Arc::new(SystemClock::new())).await
    }

    pub async fn connect_with_clock(
        config: HeraldConfig,
        clock: Arc<dyn Clock>,
    ) -> HeraldResult<Self> {
        let database = Database::connect_with_clock(&config.database, clock).await?;
        Ok(Self::with_database(config, database))
    }

    /// Build around an already opened database
    pub fn with_database(config: HeraldConfig, database: Database) -> Self {
        let hub = Arc::new(BroadcastHub::new(config.broadcast.subscriber_buffer));
        Herald {
            config,
            database,
            hub,
        }
    }

    /// Shared handler state
    pub fn state(&self) -> Arc<AppState> {
        Arc::new(AppState::from_database(&self.database, Arc::clone(&self.hub)))
    }

    /// Create the HTTP router (REST + WebSocket)
    pub fn router(&self) -> Router {
        create_router(self.state())
    }

    /// Bind the configured address and serve until Ctrl-C
    pub async fn run(self) -> std::io::Result<()> {
        let addr = self.config.server.addr();
        let listener = TcpListener::bind(&addr).await?;
        info!("Herald listening on {}", addr);

        self.serve(listener, async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown requested");
        })
        .await
    }

    /// Serve on `listener` until `shutdown` resolves, then tear everything down
    ///
    /// The hub is closed as soon as shutdown starts so that open WebSocket
    /// connections end and the server can drain.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router();
        let hub = Arc::clone(&self.hub);

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                hub.close();
            })
            .await?;

        self.shutdown().await;
        Ok(())
    }

    /// Close the hub and the connection pool
    pub async fn shutdown(&self) {
        self.hub.close();
        self.database.close().await;
        info!("Herald stopped");
    }
}
