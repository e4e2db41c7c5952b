use herald_core::{Trade, TradeId, TradeStatus};
use herald_ports::{HeraldResult, TradeRepository};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct UpdateTradeStatusCommand {
    pub trade_id: TradeId,
    pub status: String,
}

/// Move a trade along its lifecycle
///
/// Terminal trades cannot change; repeating the current status is accepted.
/// The store applies the check and the write together, so racing updates
/// cannot both finish the same trade.
pub struct UpdateTradeStatusUseCase<T: TradeRepository> {
    trades: Arc<T>,
}

impl<T: TradeRepository> UpdateTradeStatusUseCase<T> {
    pub fn new(trades: Arc<T>) -> Self {
        Self { trades }
    }

    pub async fn execute(&self, command: UpdateTradeStatusCommand) -> HeraldResult<Trade> {
        let next = TradeStatus::try_from(command.status.as_str())?;

        let trade = self.trades.update_trade_status(command.trade_id, next).await?;
        info!(trade_id = trade.id, status = %trade.status, "Trade status set");
        Ok(trade)
    }
}
