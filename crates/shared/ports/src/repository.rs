use async_trait::async_trait;
use herald_core::{NewSignal, NewTrade, Signal, SignalId, Trade, TradeId, TradeStatus};

use crate::HeraldResult;

/// Append-only storage for signals
///
/// Every successful create is durable before it returns, and ids are
/// assigned atomically with respect to concurrent callers.
#[async_trait]
pub trait SignalRepository: Send + Sync {
    /// Persist a signal, assigning its id and creation timestamp
    async fn create_signal(&self, signal: NewSignal) -> HeraldResult<Signal>;

    /// Point lookup by id
    async fn get_signal(&self, id: SignalId) -> HeraldResult<Option<Signal>>;

    /// All signals, oldest first
    async fn list_signals(&self) -> HeraldResult<Vec<Signal>>;
}

/// Storage for trades
#[async_trait]
pub trait TradeRepository: Send + Sync {
    /// Persist a trade, assigning its id and creation timestamp.
    ///
    /// Fails with `SignalNotFound` unless the referenced signal exists at the
    /// moment of the insert.
    async fn create_trade(&self, trade: NewTrade) -> HeraldResult<Trade>;

    /// Point lookup by id
    async fn get_trade(&self, id: TradeId) -> HeraldResult<Option<Trade>>;

    /// All trades in creation order (oldest first)
    async fn list_trades(&self) -> HeraldResult<Vec<Trade>>;

    /// Move a trade to `status` as a single atomic step.
    ///
    /// Only an open trade, or one already at `status`, is changed. Anything
    /// else fails with `InvalidTransition`; unknown ids with `TradeNotFound`.
    async fn update_trade_status(&self, id: TradeId, status: TradeStatus) -> HeraldResult<Trade>;
}
