mod payload;
mod side;
mod signal;
mod trade;
mod trade_status;

pub use payload::SignalPayload;
pub use side::Side;
pub use signal::{NewSignal, Signal};
pub use trade::{NewTrade, Trade, TradeFields};
pub use trade_status::TradeStatus;
