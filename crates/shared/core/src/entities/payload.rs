use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::value::RawValue;

use crate::error::ValidationError;
use crate::values::Symbol;

/// The original signal document, kept verbatim for replay and audit
///
/// Wraps the raw JSON text instead of a parsed `Value` so that key order,
/// number formatting and spacing survive storage and broadcast unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalPayload(Box<RawValue>);

impl SignalPayload {
    /// Wrap a raw JSON document. Surrounding whitespace is trimmed.
    pub fn from_json(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::EmptyPayload);
        }

        RawValue::from_string(raw)
            .map(SignalPayload)
            .map_err(|e| ValidationError::MalformedPayload(e.to_string()))
    }

    /// Serialize an already-parsed document
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        serde_json::value::to_raw_value(value)
            .map(SignalPayload)
            .map_err(|e| ValidationError::MalformedPayload(e.to_string()))
    }

    /// The document exactly as received
    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    /// Parse the document into a `Value`
    pub fn to_value(&self) -> Result<Value, ValidationError> {
        serde_json::from_str(self.as_str())
            .map_err(|e| ValidationError::MalformedPayload(e.to_string()))
    }

    /// Extract the `symbol` field.
    ///
    /// The document must be a JSON object whose `symbol` is a string with at
    /// least one non-whitespace character. No other field is inspected.
    pub fn symbol(&self) -> Result<Symbol, ValidationError> {
        let value = self.to_value()?;
        let object = value.as_object().ok_or(ValidationError::PayloadNotObject)?;

        match object.get("symbol") {
            Some(Value::String(symbol)) if !symbol.trim().is_empty() => Ok(symbol.clone()),
            _ => Err(ValidationError::MissingSymbol),
        }
    }
}

impl PartialEq for SignalPayload {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}
