pub mod broadcast_hub;
pub mod config;
pub mod sqlite;

pub use broadcast_hub::{BroadcastHub, Subscription};
pub use config::{BroadcastConfig, ConfigError, DatabaseConfig, HeraldConfig, ServerConfig};
pub use sqlite::{Database, SqliteSignalRepository, SqliteTradeRepository};
