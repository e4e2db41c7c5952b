use chrono::SecondsFormat;
use herald_core::{Signal, SignalPayload, Timestamp, Trade, TradeFields};
use serde::{Deserialize, Serialize};

/// Body of every acknowledgement and error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Trade row as exposed by `/api/trades`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TradeResponse {
    #[serde(rename = "ID")]
    pub id: i64,
    pub symbol: String,
    pub side: String,
    pub status: String,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub target: f64,
    pub timestamp: String,
}

impl From<Trade> for TradeResponse {
    fn from(trade: Trade) -> Self {
        TradeResponse {
            id: trade.id,
            side: trade.side.as_str().to_string(),
            status: trade.status.as_str().to_string(),
            entry_price: trade.entry_price,
            stop_loss: trade.stop_loss,
            target: trade.target,
            timestamp: format_timestamp(&trade.created_at),
            symbol: trade.symbol,
        }
    }
}

/// Signal row as exposed by `/api/signals`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignalResponse {
    #[serde(rename = "ID")]
    pub id: i64,
    pub symbol: String,
    /// The ingested document, verbatim
    pub payload: SignalPayload,
    pub timestamp: String,
}

impl From<Signal> for SignalResponse {
    fn from(signal: Signal) -> Self {
        SignalResponse {
            id: signal.id,
            symbol: signal.symbol,
            payload: signal.payload,
            timestamp: format_timestamp(&signal.created_at),
        }
    }
}

/// Request to record a trade
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTradeRequest {
    pub signal_id: i64,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub entry_price: Option<f64>,
    #[serde(default)]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub target: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl CreateTradeRequest {
    pub fn fields(self) -> TradeFields {
        TradeFields {
            symbol: self.symbol,
            side: self.side,
            entry_price: self.entry_price,
            stop_loss: self.stop_loss,
            target: self.target,
            status: self.status,
        }
    }
}

/// Request to change a trade's status
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTradeStatusRequest {
    pub status: String,
}

fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use herald_core::{NewTrade, Side, TradeStatus};
    use serde_json::json;

    #[test]
    fn test_trade_response_field_names() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        let trade = NewTrade::new(
            1,
            "BTCUSD",
            Side::Sell,
            108590.0,
            108690.0,
            108390.0,
            TradeStatus::Open,
        )
        .unwrap()
        .into_trade(4, at);

        let json = serde_json::to_value(TradeResponse::from(trade)).unwrap();
        assert_eq!(
            json,
            json!({
                "ID": 4,
                "Symbol": "BTCUSD",
                "Side": "sell",
                "Status": "open",
                "EntryPrice": 108590.0,
                "StopLoss": 108690.0,
                "Target": 108390.0,
                "Timestamp": "2024-06-01T09:30:00.000Z"
            })
        );
    }

    #[test]
    fn test_signal_response_keeps_payload_verbatim() {
        let raw = r#"{"symbol":"ETHUSD","b":1.50}"#;
        let signal = herald_core::NewSignal::from_payload(SignalPayload::from_json(raw).unwrap())
            .unwrap()
            .into_signal(2, Utc::now());

        let body = serde_json::to_string(&SignalResponse::from(signal)).unwrap();
        assert!(body.contains(r#""Payload":{"symbol":"ETHUSD","b":1.50}"#));
    }
}
