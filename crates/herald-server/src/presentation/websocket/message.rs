use herald_core::SignalEvent;
use serde::Serialize;
use uuid::Uuid;

/// Server-to-client frame on `/ws`
///
/// Serialized as `{"event": <name>, "data": <payload>}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum WsFrame<'a> {
    /// Sent once, after the connection has joined the hub
    Subscribed { subscriber_id: Uuid },
    /// A newly ingested signal
    TradeSignal(&'a SignalEvent),
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::{SignalPayload, TRADE_SIGNAL_EVENT};
    use serde_json::{Value, json};

    #[test]
    fn test_trade_signal_frame() {
        let event = SignalEvent {
            signal_id: 3,
            signal_symbol: "BTCUSD".to_string(),
            signal: SignalPayload::from_json(r#"{"symbol":"BTCUSD","Full_Signal":"Sell"}"#)
                .unwrap(),
        };

        let json: Value = serde_json::to_value(WsFrame::TradeSignal(&event)).unwrap();
        assert_eq!(json["event"], TRADE_SIGNAL_EVENT);
        assert_eq!(
            json["data"],
            json!({
                "signal_id": 3,
                "signal_symbol": "BTCUSD",
                "signal": {"symbol": "BTCUSD", "Full_Signal": "Sell"}
            })
        );
    }

    #[test]
    fn test_subscribed_frame() {
        let id = Uuid::new_v4();
        let json: Value = serde_json::to_value(WsFrame::Subscribed { subscriber_id: id }).unwrap();

        assert_eq!(json["event"], "subscribed");
        assert_eq!(json["data"]["subscriber_id"], id.to_string());
    }
}
