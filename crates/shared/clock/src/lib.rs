//! Herald Clock Infrastructure
//!
//! Time sources for the record store:
//!
//! - [`SystemClock`]: wall-clock time, used in production
//! - [`FixedClock`]: frozen time that only moves when told to, used in tests

mod fixed;
mod system;

pub use fixed::FixedClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use herald_ports::Clock;
