use herald_core::{NewTrade, SignalId, Trade, TradeFields};
use herald_ports::{HeraldError, HeraldResult, SignalRepository, TradeRepository};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct RecordTradeCommand {
    pub signal_id: SignalId,
    pub fields: TradeFields,
}

/// Record a trade against the signal that motivated it
///
/// Fields are validated before any storage is touched. The signal lookup
/// gives a clean `SignalNotFound`; the store re-checks existence atomically
/// with the insert.
pub struct RecordTradeUseCase<S, T>
where
    S: SignalRepository,
    T: TradeRepository,
{
    signals: Arc<S>,
    trades: Arc<T>,
}

impl<S, T> RecordTradeUseCase<S, T>
where
    S: SignalRepository,
    T: TradeRepository,
{
    pub fn new(signals: Arc<S>, trades: Arc<T>) -> Self {
        Self { signals, trades }
    }

    pub async fn execute(&self, command: RecordTradeCommand) -> HeraldResult<Trade> {
        let new_trade = NewTrade::from_fields(command.signal_id, command.fields)?;

        if self.signals.get_signal(command.signal_id).await?.is_none() {
            return Err(HeraldError::SignalNotFound(command.signal_id));
        }

        let trade = self.trades.create_trade(new_trade).await?;
        info!(%trade, "Trade recorded");
        Ok(trade)
    }
}
