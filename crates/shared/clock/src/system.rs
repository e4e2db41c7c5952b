use chrono::Utc;
use herald_core::Timestamp;
use herald_ports::Clock;

/// Wall-clock UTC time, used to stamp records in production
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub const fn new() -> Self {
        SystemClock
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_tracks_wall_time() {
        let before = Utc::now();
        let stamped = SystemClock::new().now();
        let after = Utc::now();

        assert!(before <= stamped && stamped <= after);
    }

    #[test]
    fn test_usable_as_trait_object() {
        let clock: Box<dyn Clock> = Box::new(SystemClock);
        assert_eq!(clock.name(), "SystemClock");
    }
}
