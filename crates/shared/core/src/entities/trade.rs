use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Side, TradeStatus};
use crate::error::ValidationError;
use crate::values::{Price, SignalId, Symbol, Timestamp, TradeId};

/// An execution (actual or planned) motivated by a signal
///
/// `signal_id` is a reference, not ownership: trades are never removed
/// together with their signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub signal_id: SignalId,
    pub symbol: Symbol,
    pub side: Side,
    pub entry_price: Price,
    pub stop_loss: Price,
    pub target: Price,
    /// The only mutable field
    pub status: TradeStatus,
    pub created_at: Timestamp,
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {}({}) status={} entry={} stop={} target={} signal=#{}",
            self.id,
            self.symbol,
            self.side,
            self.status,
            self.entry_price,
            self.stop_loss,
            self.target,
            self.signal_id
        )
    }
}

/// Unvalidated trade fields as received from a caller
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TradeFields {
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
    /// Defaults to `open` when absent
    #[serde(default)]
    pub status: Option<String>,
}

/// A validated trade that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrade {
    signal_id: SignalId,
    symbol: Symbol,
    side: Side,
    entry_price: Price,
    stop_loss: Price,
    target: Price,
    status: TradeStatus,
}

impl NewTrade {
    pub fn new(
        signal_id: SignalId,
        symbol: impl Into<Symbol>,
        side: Side,
        entry_price: Price,
        stop_loss: Price,
        target: Price,
        status: TradeStatus,
    ) -> Result<Self, ValidationError> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        Ok(Self {
            signal_id,
            symbol,
            side,
            entry_price: positive("entry_price", entry_price)?,
            stop_loss: positive("stop_loss", stop_loss)?,
            target: positive("target", target)?,
            status,
        })
    }

    /// Validate caller-supplied fields for a trade linked to `signal_id`
    pub fn from_fields(signal_id: SignalId, fields: TradeFields) -> Result<Self, ValidationError> {
        let symbol = fields.symbol.ok_or(ValidationError::MissingField("symbol"))?;
        let side = fields.side.ok_or(ValidationError::MissingField("side"))?;
        let side = Side::try_from(side.as_str())?;
        let status = match fields.status {
            Some(status) => TradeStatus::try_from(status.as_str())?,
            None => TradeStatus::Open,
        };

        Self::new(
            signal_id,
            symbol,
            side,
            fields
                .entry_price
                .ok_or(ValidationError::MissingField("entry_price"))?,
            fields
                .stop_loss
                .ok_or(ValidationError::MissingField("stop_loss"))?,
            fields.target.ok_or(ValidationError::MissingField("target"))?,
            status,
        )
    }

    pub fn signal_id(&self) -> SignalId {
        self.signal_id
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn entry_price(&self) -> Price {
        self.entry_price
    }

    pub fn stop_loss(&self) -> Price {
        self.stop_loss
    }

    pub fn target(&self) -> Price {
        self.target
    }

    pub fn status(&self) -> TradeStatus {
        self.status
    }

    /// Attach the identity assigned by the store
    pub fn into_trade(self, id: TradeId, created_at: Timestamp) -> Trade {
        Trade {
            id,
            signal_id: self.signal_id,
            symbol: self.symbol,
            side: self.side,
            entry_price: self.entry_price,
            stop_loss: self.stop_loss,
            target: self.target,
            status: self.status,
            created_at,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<Price, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::InvalidNumber { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn btc_fields() -> TradeFields {
        TradeFields {
            symbol: Some("BTCUSD".to_string()),
            side: Some("sell".to_string()),
            entry_price: Some(108590.0),
            stop_loss: Some(108690.0),
            target: Some(108390.0),
            status: Some("open".to_string()),
        }
    }

    #[test]
    fn test_from_fields() {
        let trade = NewTrade::from_fields(1, btc_fields()).unwrap();

        assert_eq!(trade.signal_id(), 1);
        assert_eq!(trade.symbol(), "BTCUSD");
        assert_eq!(trade.side(), Side::Sell);
        assert_eq!(trade.entry_price(), 108590.0);
        assert_eq!(trade.stop_loss(), 108690.0);
        assert_eq!(trade.target(), 108390.0);
        assert_eq!(trade.status(), TradeStatus::Open);
    }

    #[test]
    fn test_status_defaults_to_open() {
        let fields = TradeFields {
            status: None,
            ..btc_fields()
        };
        let trade = NewTrade::from_fields(1, fields).unwrap();
        assert_eq!(trade.status(), TradeStatus::Open);
    }

    #[test]
    fn test_missing_numeric_field_is_rejected() {
        let fields = TradeFields {
            stop_loss: None,
            ..btc_fields()
        };
        assert_eq!(
            NewTrade::from_fields(1, fields).unwrap_err(),
            ValidationError::MissingField("stop_loss")
        );
    }

    #[test]
    fn test_non_positive_price_is_rejected() {
        let fields = TradeFields {
            entry_price: Some(-1.0),
            ..btc_fields()
        };
        assert!(matches!(
            NewTrade::from_fields(1, fields).unwrap_err(),
            ValidationError::InvalidNumber {
                field: "entry_price",
                ..
            }
        ));

        let fields = TradeFields {
            target: Some(f64::NAN),
            ..btc_fields()
        };
        assert!(NewTrade::from_fields(1, fields).is_err());
    }

    #[test]
    fn test_unknown_enumerations_are_rejected() {
        let fields = TradeFields {
            side: Some("short".to_string()),
            ..btc_fields()
        };
        assert!(matches!(
            NewTrade::from_fields(1, fields).unwrap_err(),
            ValidationError::InvalidSide(_)
        ));

        let fields = TradeFields {
            status: Some("pending".to_string()),
            ..btc_fields()
        };
        assert!(matches!(
            NewTrade::from_fields(1, fields).unwrap_err(),
            ValidationError::InvalidStatus(_)
        ));
    }

    #[test]
    fn test_display_is_readable() {
        let trade = NewTrade::from_fields(3, btc_fields())
            .unwrap()
            .into_trade(9, chrono::Utc::now());
        let text = trade.to_string();
        assert!(text.starts_with("#9 BTCUSD(sell) status=open"));
        assert!(text.ends_with("signal=#3"));
    }
}
