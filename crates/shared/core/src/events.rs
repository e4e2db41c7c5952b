use serde::{Deserialize, Serialize};

use crate::entities::{Signal, SignalPayload};
use crate::values::{SignalId, Symbol};

/// Event name under which new signals are pushed to subscribers
pub const TRADE_SIGNAL_EVENT: &str = "trade_signal";

/// Real-time notification for a persisted signal
///
/// Only ever built from a `Signal` returned by the store, so the id it
/// carries is always visible to readers of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub signal_id: SignalId,
    pub signal_symbol: Symbol,
    /// The original document, verbatim
    pub signal: SignalPayload,
}

impl SignalEvent {
    pub fn name(&self) -> &'static str {
        TRADE_SIGNAL_EVENT
    }
}

impl From<&Signal> for SignalEvent {
    fn from(signal: &Signal) -> Self {
        SignalEvent {
            signal_id: signal.id,
            signal_symbol: signal.symbol.clone(),
            signal: signal.payload.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::NewSignal;
    use serde_json::{Value, json};

    #[test]
    fn test_event_wire_format() {
        let raw = r#"{"symbol":"ETHUSD","Full_Signal":"Buy signal for ETHUSD at current price"}"#;
        let signal = NewSignal::from_payload(SignalPayload::from_json(raw).unwrap())
            .unwrap()
            .into_signal(12, chrono::Utc::now());

        let event = SignalEvent::from(&signal);
        assert_eq!(event.name(), "trade_signal");

        let json: Value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            json!({
                "signal_id": 12,
                "signal_symbol": "ETHUSD",
                "signal": {
                    "symbol": "ETHUSD",
                    "Full_Signal": "Buy signal for ETHUSD at current price"
                }
            })
        );
    }
}
