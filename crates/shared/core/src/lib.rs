//! Herald Core Domain
//!
//! Pure domain types for the Herald signal service.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod error;
pub mod events;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    NewSignal, NewTrade, Side, Signal, SignalPayload, Trade, TradeFields, TradeStatus,
};
pub use error::ValidationError;
pub use events::{SignalEvent, TRADE_SIGNAL_EVENT};
pub use values::{Price, SignalId, Symbol, Timestamp, TradeId};
