//! Herald Ports
//!
//! Port definitions (traits) for the Herald signal service.
//! These define the boundaries between domain logic and infrastructure.

mod clock;
mod error;
mod publisher;
mod repository;

pub use clock::Clock;
pub use error::{HeraldError, HeraldResult};
pub use publisher::SignalPublisher;
pub use repository::{SignalRepository, TradeRepository};
