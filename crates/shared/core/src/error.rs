use thiserror::Error;

use crate::entities::TradeStatus;

/// Malformed or incomplete input, rejected before anything is persisted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Payload must not be empty")]
    EmptyPayload,

    #[error("Payload is not valid JSON: {0}")]
    MalformedPayload(String),

    #[error("Payload must be a JSON object")]
    PayloadNotObject,

    #[error("Payload must contain a non-empty 'symbol' string")]
    MissingSymbol,

    #[error("Symbol must not be empty")]
    EmptySymbol,

    #[error("Mandatory field '{0}' was not sent")]
    MissingField(&'static str),

    #[error("Field '{field}' must be a finite positive number, got {value}")]
    InvalidNumber { field: &'static str, value: f64 },

    #[error("Invalid side '{0}': must be buy or sell")]
    InvalidSide(String),

    #[error("Invalid trade status '{0}': must be open, closed, stop_loss_hit or target_hit")]
    InvalidStatus(String),

    #[error("Trade status cannot change from {from} to {to}")]
    InvalidTransition { from: TradeStatus, to: TradeStatus },
}
