use chrono::{DateTime, Utc};

/// Price value as stored by the record store (REAL column)
pub type Price = f64;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Symbol identifier for a traded instrument
pub type Symbol = String;

/// Store-assigned signal identifier, monotonically increasing and never reused
pub type SignalId = i64;

/// Store-assigned trade identifier
pub type TradeId = i64;
