use herald_core::{Signal, SignalId, Trade};
use herald_ports::{HeraldError, HeraldResult, SignalRepository, TradeRepository};
use std::sync::Arc;

/// All trades, oldest first
pub struct ListTradesUseCase<T: TradeRepository> {
    trades: Arc<T>,
}

impl<T: TradeRepository> ListTradesUseCase<T> {
    pub fn new(trades: Arc<T>) -> Self {
        Self { trades }
    }

    pub async fn execute(&self) -> HeraldResult<Vec<Trade>> {
        self.trades.list_trades().await
    }
}

/// Read access to the signal log
pub struct QuerySignalsUseCase<S: SignalRepository> {
    signals: Arc<S>,
}

impl<S: SignalRepository> QuerySignalsUseCase<S> {
    pub fn new(signals: Arc<S>) -> Self {
        Self { signals }
    }

    pub async fn list(&self) -> HeraldResult<Vec<Signal>> {
        self.signals.list_signals().await
    }

    pub async fn get(&self, id: SignalId) -> HeraldResult<Signal> {
        self.signals
            .get_signal(id)
            .await?
            .ok_or(HeraldError::SignalNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::{
        InMemorySignalRepository, InMemoryTradeRepository,
    };
    use herald_core::{NewSignal, NewTrade, Side, SignalPayload, TradeStatus};

    #[tokio::test]
    async fn test_list_trades_empty_then_one() {
        let trades = Arc::new(InMemoryTradeRepository::with_signals(vec![1]));
        let use_case = ListTradesUseCase::new(trades.clone());
        assert!(use_case.execute().await.unwrap().is_empty());

        let trade = trades
            .create_trade(
                NewTrade::new(1, "BTCUSD", Side::Sell, 108590.0, 108690.0, 108390.0, TradeStatus::Open)
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(use_case.execute().await.unwrap(), vec![trade]);
    }

    #[tokio::test]
    async fn test_get_signal() {
        let signals = Arc::new(InMemorySignalRepository::default());
        let payload = SignalPayload::from_json(r#"{"symbol":"BTCUSD"}"#).unwrap();
        let signal = signals
            .create_signal(NewSignal::from_payload(payload).unwrap())
            .await
            .unwrap();

        let use_case = QuerySignalsUseCase::new(signals);
        assert_eq!(use_case.get(signal.id).await.unwrap(), signal);
        assert_eq!(use_case.list().await.unwrap(), vec![signal.clone()]);
        assert_eq!(
            use_case.get(signal.id + 1).await.unwrap_err(),
            HeraldError::SignalNotFound(signal.id + 1)
        );
    }
}
