pub mod use_cases;

pub use use_cases::{
    IngestSignalUseCase, ListTradesUseCase, QuerySignalsUseCase, RecordTradeCommand,
    RecordTradeUseCase, UpdateTradeStatusCommand, UpdateTradeStatusUseCase,
};
