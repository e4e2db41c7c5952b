use herald_core::Timestamp;

/// Source of creation timestamps for stored records
///
/// Records never carry caller-supplied times; the store asks its clock.
/// Tests swap in a frozen clock to make those timestamps predictable.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    /// Label used in logs
    fn name(&self) -> &str {
        "Clock"
    }
}
