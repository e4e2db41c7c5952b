//! In-memory ports for use case tests

use async_trait::async_trait;
use chrono::Utc;
use herald_core::{
    NewSignal, NewTrade, Signal, SignalEvent, SignalId, Trade, TradeId, TradeStatus,
};
use herald_ports::{
    HeraldError, HeraldResult, SignalPublisher, SignalRepository, TradeRepository,
};
use parking_lot::Mutex;

#[derive(Default)]
pub struct InMemorySignalRepository {
    signals: Mutex<Vec<Signal>>,
}

#[async_trait]
impl SignalRepository for InMemorySignalRepository {
    async fn create_signal(&self, signal: NewSignal) -> HeraldResult<Signal> {
        let mut signals = self.signals.lock();
        let signal = signal.into_signal(signals.len() as SignalId + 1, Utc::now());
        signals.push(signal.clone());
        Ok(signal)
    }

    async fn get_signal(&self, id: SignalId) -> HeraldResult<Option<Signal>> {
        Ok(self.signals.lock().iter().find(|s| s.id == id).cloned())
    }

    async fn list_signals(&self) -> HeraldResult<Vec<Signal>> {
        Ok(self.signals.lock().clone())
    }
}

pub struct FailingSignalRepository;

#[async_trait]
impl SignalRepository for FailingSignalRepository {
    async fn create_signal(&self, _signal: NewSignal) -> HeraldResult<Signal> {
        Err(HeraldError::Storage("disk I/O error".to_string()))
    }

    async fn get_signal(&self, _id: SignalId) -> HeraldResult<Option<Signal>> {
        Err(HeraldError::Storage("disk I/O error".to_string()))
    }

    async fn list_signals(&self) -> HeraldResult<Vec<Signal>> {
        Err(HeraldError::Storage("disk I/O error".to_string()))
    }
}

/// Trade store that, like the real one, refuses trades for unknown signals
pub struct InMemoryTradeRepository {
    known_signals: Vec<SignalId>,
    trades: Mutex<Vec<Trade>>,
}

impl InMemoryTradeRepository {
    pub fn with_signals(known_signals: Vec<SignalId>) -> Self {
        Self {
            known_signals,
            trades: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.trades.lock().len()
    }
}

#[async_trait]
impl TradeRepository for InMemoryTradeRepository {
    async fn create_trade(&self, trade: NewTrade) -> HeraldResult<Trade> {
        if !self.known_signals.contains(&trade.signal_id()) {
            return Err(HeraldError::SignalNotFound(trade.signal_id()));
        }
        let mut trades = self.trades.lock();
        let trade = trade.into_trade(trades.len() as TradeId + 1, Utc::now());
        trades.push(trade.clone());
        Ok(trade)
    }

    async fn get_trade(&self, id: TradeId) -> HeraldResult<Option<Trade>> {
        Ok(self.trades.lock().iter().find(|t| t.id == id).cloned())
    }

    async fn list_trades(&self) -> HeraldResult<Vec<Trade>> {
        Ok(self.trades.lock().clone())
    }

    async fn update_trade_status(&self, id: TradeId, status: TradeStatus) -> HeraldResult<Trade> {
        let mut trades = self.trades.lock();
        let trade = trades
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(HeraldError::TradeNotFound(id))?;
        trade.status = trade.status.transition_to(status)?;
        Ok(trade.clone())
    }
}

/// Publisher that keeps every event it is handed
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<SignalEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<SignalEvent> {
        self.events.lock().clone()
    }
}

impl SignalPublisher for RecordingPublisher {
    fn publish(&self, event: SignalEvent) -> usize {
        self.events.lock().push(event);
        1
    }

    fn subscriber_count(&self) -> usize {
        1
    }
}
