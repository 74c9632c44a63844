//! The polled interval timer.
//!
//! A [`Timer`] never sleeps. The owning loop calls [`Timer::poll`] as often as it likes, and the
//! timer answers whether its interval has elapsed since the last time it fired. The loop's cadence
//! bounds how late a trigger can be observed; triggers are never queued or repeated.
use core::time::Duration;

use log::{debug, trace, warn};
use snafu::{ensure, OptionExt as _};

use crate::{
    clock::Clock,
    error::{InvalidArgumentSnafu, InvalidStateSnafu, Result, StateViolation},
};

/// Run status of a [`Timer`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Polling is not permitted. This is the initial state.
    #[default]
    Stopped,
    /// Polling evaluates elapsed time against the interval.
    Running,
}

/// A non-blocking timer that fires at most once per poll after each interval elapses.
///
/// The timer starts out [`Status::Stopped`], optionally without an interval. Arm it with
/// [`Timer::start`] and then call [`Timer::poll`] from the run loop:
///
/// ```
/// use core::time::Duration;
/// use nonblocking_timer::{ManualClock, Timer};
///
/// let clock = ManualClock::new();
/// let mut timer = Timer::with_interval(&clock, Duration::from_millis(100))?;
/// timer.start()?;
///
/// clock.advance(Duration::from_millis(60));
/// assert!(!timer.poll()?);
/// clock.advance(Duration::from_millis(40));
/// assert!(timer.poll()?);
/// # Ok::<(), nonblocking_timer::Error>(())
/// ```
///
/// Polling is strict: calling [`Timer::poll`] on a stopped timer is an error rather than a
/// silent `false`.
///
/// The timer has no internal synchronization. All mutating operations take `&mut self`, so sharing
/// one between threads requires an external lock.
#[derive(Debug)]
pub struct Timer<C> {
    clock: C,
    /// Always strictly positive when present.
    interval: Option<Duration>,
    status: Status,
    /// Clock reading at the last `start` or trigger. Never decreases.
    last_trigger: Duration,
}

impl<C: Clock> Timer<C> {
    /// Create a stopped timer with no interval.
    ///
    /// An interval must be set with [`Timer::set_interval`] before the timer can be started.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            interval: None,
            status: Status::Stopped,
            last_trigger: Duration::ZERO,
        }
    }

    /// Create a stopped timer that fires every `interval`.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `interval` is zero.
    pub fn with_interval(clock: C, interval: Duration) -> Result<Self> {
        let mut timer = Self::new(clock);
        timer.set_interval(interval)?;
        Ok(timer)
    }

    /// Replace the interval.
    ///
    /// Neither the status nor the current window is reset: the next poll compares the time since
    /// the last trigger against the new interval.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `interval` is zero.
    pub fn set_interval(&mut self, interval: Duration) -> Result<()> {
        ensure!(!interval.is_zero(), InvalidArgumentSnafu);
        debug!("timer interval set to {interval:?}");
        self.interval = Some(interval);
        Ok(())
    }

    /// Replace the interval with a real number of seconds.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `seconds` is not strictly
    ///   positive, is not finite, is too large for a [`Duration`], or is smaller than one
    ///   nanosecond.
    pub fn set_interval_secs_f64(&mut self, seconds: f64) -> Result<()> {
        let interval = Duration::try_from_secs_f64(seconds)
            .ok()
            .context(InvalidArgumentSnafu)?;
        self.set_interval(interval)
    }

    /// The current interval, or `None` if it has never been set.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// The current run status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns true if the timer is [`Status::Running`].
    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// Clock reading at the last call to [`Timer::start`] or the last trigger, whichever is later.
    pub fn last_trigger_time(&self) -> Duration {
        self.last_trigger
    }

    /// Arm the timer, measuring the first interval from the current clock reading.
    ///
    /// Starting a timer that is already running restarts its window from now.
    ///
    /// # Errors
    /// - [`Error::InvalidState`](crate::Error::InvalidState) if no interval has been set.
    pub fn start(&mut self) -> Result<()> {
        let interval = self.interval.context(InvalidStateSnafu {
            reason: StateViolation::IntervalUnset,
        })?;
        self.last_trigger = self.read_clock();
        self.status = Status::Running;
        debug!(
            "timer started at {:?} with interval {interval:?}",
            self.last_trigger
        );
        Ok(())
    }

    /// Disarm the timer. The last trigger time is kept.
    pub fn stop(&mut self) {
        self.status = Status::Stopped;
        debug!("timer stopped");
    }

    /// Check whether the interval has elapsed since the last trigger.
    ///
    /// Returns `true` at most once per elapsed interval. When it does, the next window is measured
    /// from the current clock reading, so time beyond one interval is discarded rather than
    /// producing extra triggers. Never blocks.
    ///
    /// # Errors
    /// - [`Error::InvalidState`](crate::Error::InvalidState) if the timer is stopped, or if no
    ///   interval has been set.
    pub fn poll(&mut self) -> Result<bool> {
        ensure!(
            self.status == Status::Running,
            InvalidStateSnafu {
                reason: StateViolation::NotRunning
            }
        );
        let interval = self.interval.context(InvalidStateSnafu {
            reason: StateViolation::IntervalUnset,
        })?;

        let now = self.read_clock();
        let elapsed = now - self.last_trigger;
        if elapsed < interval {
            return Ok(false);
        }

        trace!("timer triggered at {now:?} after {elapsed:?}");
        self.last_trigger = now;
        Ok(true)
    }

    /// Read the clock, clamped so that it never falls behind the last trigger time.
    fn read_clock(&self) -> Duration {
        let now = self.clock.now();
        if now < self.last_trigger {
            warn!(
                "clock went backwards: read {now:?}, last trigger at {:?}",
                self.last_trigger
            );
            self.last_trigger
        } else {
            now
        }
    }
}
