mod ingest_signal;
mod query_records;
mod record_trade;
mod update_trade_status;

#[cfg(test)]
mod test_support;

pub use ingest_signal::IngestSignalUseCase;
pub use query_records::{ListTradesUseCase, QuerySignalsUseCase};
pub use record_trade::{RecordTradeCommand, RecordTradeUseCase};
pub use update_trade_status::{UpdateTradeStatusCommand, UpdateTradeStatusUseCase};
