use serde::{Deserialize, Serialize};

use super::SignalPayload;
use crate::error::ValidationError;
use crate::values::{SignalId, Symbol, Timestamp};

/// An immutable, persisted trading signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: SignalId,
    pub symbol: Symbol,
    /// The full original document
    pub payload: SignalPayload,
    /// Assigned by the store when the signal was persisted
    pub created_at: Timestamp,
}

/// A validated signal that has not been persisted yet
///
/// Can only be built through `new` or `from_payload`, so a `NewSignal`
/// always carries a non-empty symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSignal {
    symbol: Symbol,
    payload: SignalPayload,
}

impl NewSignal {
    pub fn new(symbol: impl Into<Symbol>, payload: SignalPayload) -> Result<Self, ValidationError> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        Ok(Self { symbol, payload })
    }

    /// Build from an ingested document, taking the symbol from its `symbol` field
    pub fn from_payload(payload: SignalPayload) -> Result<Self, ValidationError> {
        let symbol = payload.symbol()?;
        Ok(Self { symbol, payload })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn payload(&self) -> &SignalPayload {
        &self.payload
    }

    /// Attach the identity assigned by the store
    pub fn into_signal(self, id: SignalId, created_at: Timestamp) -> Signal {
        Signal {
            id,
            symbol: self.symbol,
            payload: self.payload,
            created_at,
        }
    }
}
