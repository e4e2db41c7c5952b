use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::infrastructure::{BroadcastHub, Database, SqliteSignalRepository, SqliteTradeRepository};
use crate::presentation::websocket;

/// Application state shared across handlers - uses concrete infrastructure types
pub struct AppState {
    pub signals: Arc<SqliteSignalRepository>,
    pub trades: Arc<SqliteTradeRepository>,
    pub hub: Arc<BroadcastHub>,
}

impl AppState {
    pub fn new(
        signals: Arc<SqliteSignalRepository>,
        trades: Arc<SqliteTradeRepository>,
        hub: Arc<BroadcastHub>,
    ) -> Self {
        AppState {
            signals,
            trades,
            hub,
        }
    }

    /// Wire both repositories to the same database
    pub fn from_database(db: &Database, hub: Arc<BroadcastHub>) -> Self {
        Self::new(Arc::new(db.signals()), Arc::new(db.trades()), hub)
    }
}

/// Create the HTTP router: REST endpoints plus the `/ws` signal stream
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        // Ingestion
        .route("/api/signal", post(handlers::ingest_signal))
        // Signal log
        .route("/api/signals", get(handlers::list_signals))
        .route("/api/signals/{id}", get(handlers::get_signal))
        // Trades
        .route(
            "/api/trades",
            get(handlers::list_trades).post(handlers::create_trade),
        )
        .route("/api/trades/{id}", patch(handlers::update_trade_status))
        // Real-time stream
        .route("/ws", get(websocket::ws_handler))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
