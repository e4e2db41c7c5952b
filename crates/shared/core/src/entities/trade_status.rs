use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Trade lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeStatus {
    /// Position is live
    #[default]
    Open,
    /// Closed manually by the consumer
    Closed,
    /// Closed because the stop loss was reached
    StopLossHit,
    /// Closed because the target was reached
    TargetHit,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Open => "open",
            TradeStatus::Closed => "closed",
            TradeStatus::StopLossHit => "stop_loss_hit",
            TradeStatus::TargetHit => "target_hit",
        }
    }

    /// Returns true if the trade is still live
    pub fn is_open(&self) -> bool {
        matches!(self, TradeStatus::Open)
    }

    /// Returns true if the trade can no longer change
    pub fn is_terminal(&self) -> bool {
        !self.is_open()
    }

    /// Validate a status change. Setting the current status again is a no-op.
    pub fn transition_to(self, next: TradeStatus) -> Result<TradeStatus, ValidationError> {
        if self == next || self.is_open() {
            Ok(next)
        } else {
            Err(ValidationError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TradeStatus {
    type Error = ValidationError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "open" => Ok(TradeStatus::Open),
            "closed" => Ok(TradeStatus::Closed),
            "stop_loss_hit" => Ok(TradeStatus::StopLossHit),
            "target_hit" => Ok(TradeStatus::TargetHit),
            _ => Err(ValidationError::InvalidStatus(value.to_string())),
        }
    }
}
