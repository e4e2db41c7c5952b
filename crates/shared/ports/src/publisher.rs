use herald_core::SignalEvent;

/// Fan-out of persisted signals to live subscribers
///
/// Delivery is best-effort and at-most-once per subscriber; a failing
/// subscriber never affects the others or the caller.
pub trait SignalPublisher: Send + Sync {
    /// Push `event` to every current subscriber, returning how many accepted it
    fn publish(&self, event: SignalEvent) -> usize;

    /// Get the number of active subscribers
    fn subscriber_count(&self) -> usize;
}
