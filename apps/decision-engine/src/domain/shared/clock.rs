//! Injected time source.
//!
//! Components that stamp cycles or audit events take an `Arc<dyn Clock>`;
//! there is no process-wide clock.

use chrono::Duration;
use parking_lot::RwLock;

use super::{DomainError, Timestamp};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to, and never backward.
#[derive(Debug)]
pub struct FrozenClock {
    current: RwLock<Timestamp>,
}

impl FrozenClock {
    /// Create a clock frozen at `start`.
    #[must_use]
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: RwLock::new(start),
        }
    }

    /// Advance by `delta`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidStateTransition`] if `delta` is negative
    /// or the result overflows.
    pub fn advance(&self, delta: Duration) -> Result<Timestamp, DomainError> {
        let current = self.now();
        let next = current
            .checked_add(delta)
            .ok_or_else(|| DomainError::invalid_value("delta", "timestamp overflow"))?;
        self.set(next)
    }

    /// Jump to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidStateTransition`] if `target` is before
    /// the current instant.
    pub fn set(&self, target: Timestamp) -> Result<Timestamp, DomainError> {
        let mut guard = self.current.write();
        if target < *guard {
            return Err(DomainError::InvalidStateTransition {
                entity: "FrozenClock".to_string(),
                from: guard.to_rfc3339(),
                to: target.to_rfc3339(),
                reason: "time cannot move backward".to_string(),
            });
        }
        *guard = target;
        Ok(target)
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> Timestamp {
        *self.current.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epoch(secs: i64) -> Timestamp {
        Timestamp::from_unix_seconds(secs).unwrap()
    }

    #[test]
    fn frozen_clock_holds_still() {
        let clock = FrozenClock::new(epoch(100));
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now(), epoch(100));
    }

    #[test]
    fn frozen_clock_advance() {
        let clock = FrozenClock::new(epoch(100));
        let next = clock.advance(Duration::seconds(60)).unwrap();
        assert_eq!(next, epoch(160));
        assert_eq!(clock.now(), epoch(160));
    }

    #[test]
    fn frozen_clock_refuses_negative_advance() {
        let clock = FrozenClock::new(epoch(100));
        let err = clock.advance(Duration::seconds(-1)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidStateTransition { .. }));
        assert_eq!(clock.now(), epoch(100));
    }

    #[test]
    fn frozen_clock_set_refuses_past() {
        let clock = FrozenClock::new(epoch(100));
        assert!(clock.set(epoch(99)).is_err());
        assert!(clock.set(epoch(100)).is_ok());
    }

    #[test]
    fn system_clock_is_monotone_enough() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
