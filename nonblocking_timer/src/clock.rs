//! Monotonic clock sources that a [`Timer`](crate::Timer) reads from.
use core::{cell::Cell, time::Duration};

#[cfg(test)]
use mockall::automock;

/// A monotonic time source.
///
/// Readings are durations since an arbitrary, fixed epoch chosen by the implementation. They must
/// never decrease and must not follow wall-clock adjustments (time zone changes, NTP corrections,
/// manual resets).
#[cfg_attr(test, automock)]
pub trait Clock {
    /// The current reading of the clock.
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// A clock that only moves when told to.
///
/// Useful for simulating time on a host, or for driving a timer from a tick counter maintained
/// elsewhere in the run loop. Share it with a timer by reference, since `&ManualClock` is also a
/// [`Clock`].
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    /// Create a clock that reads zero.
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(Duration::ZERO)
    }

    /// Create a clock that reads `now`.
    #[must_use]
    pub const fn starting_at(now: Duration) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Set the current reading.
    ///
    /// Setting a reading earlier than the current one breaks the monotonic contract of [`Clock`].
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    /// Move the clock forward by `by`, saturating at [`Duration::MAX`].
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// A clock backed by [`std::time::Instant`], measuring time since the clock was created.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Create a clock whose epoch is the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_moves_only_when_told() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(clock.now(), Duration::ZERO);

        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now(), Duration::from_millis(250));

        clock.set(Duration::from_secs(3));
        assert_eq!(clock.now(), Duration::from_secs(3));
    }

    #[test]
    fn manual_clock_advance_saturates() {
        let clock = ManualClock::starting_at(Duration::MAX - Duration::from_secs(1));
        clock.advance(Duration::from_secs(5));
        assert_eq!(clock.now(), Duration::MAX);
    }

    #[test]
    fn reference_reads_through() {
        let clock = ManualClock::starting_at(Duration::from_secs(7));
        let by_ref: &dyn Clock = &clock;
        assert_eq!((&by_ref).now(), Duration::from_secs(7));
        clock.advance(Duration::from_secs(1));
        assert_eq!(by_ref.now(), Duration::from_secs(8));
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_clock_never_goes_backwards() {
        let clock = StdClock::new();
        let mut last = clock.now();
        for _ in 0..1000 {
            let now = clock.now();
            assert!(now >= last);
            last = now;
        }
    }
}
