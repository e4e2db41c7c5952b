use herald_core::{SignalId, TradeId, ValidationError};
use thiserror::Error;

/// Errors surfaced by the record store and the services built on it
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeraldError {
    /// Malformed or incomplete input; nothing was persisted
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Signal {0} not found")]
    SignalNotFound(SignalId),

    #[error("Trade {0} not found")]
    TradeNotFound(TradeId),

    /// Durability layer unavailable or write failed; never retried
    #[error("Storage error: {0}")]
    Storage(String),
}

impl HeraldError {
    pub fn storage(err: impl std::fmt::Display) -> Self {
        HeraldError::Storage(err.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            HeraldError::SignalNotFound(_) | HeraldError::TradeNotFound(_)
        )
    }
}

pub type HeraldResult<T> = std::result::Result<T, HeraldError>;
