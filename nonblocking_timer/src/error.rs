//! Errors reported by [`Timer`](crate::Timer) operations.
use snafu::Snafu;

/// The precondition that an operation found violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateViolation {
    /// No valid interval has been set on the timer.
    IntervalUnset,
    /// The timer must be running, but it is stopped.
    NotRunning,
}

impl core::fmt::Display for StateViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StateViolation::IntervalUnset => {
                write!(f, "interval must be set and greater than zero")
            }
            StateViolation::NotRunning => write!(f, "timer must be running"),
        }
    }
}

/// Errors that can occur while configuring or polling a timer.
///
/// Both kinds indicate a programming fault in the owning loop (a misconfigured interval or
/// polling before arming), not a transient condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The supplied interval was not strictly positive, or could not be represented as a duration.
    #[snafu(display("Interval must be greater than zero"))]
    InvalidArgument,
    /// The operation is not permitted in the timer's current state.
    #[snafu(display("Invalid timer state: {reason}"))]
    InvalidState {
        /// Which precondition was violated.
        reason: StateViolation,
    },
}

/// Result type for timer operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::string::ToString as _;

    use super::*;

    #[test]
    fn display_names_the_violation() {
        let e = Error::InvalidState {
            reason: StateViolation::NotRunning,
        };
        assert_eq!(e.to_string(), "Invalid timer state: timer must be running");
        assert_eq!(
            Error::InvalidArgument.to_string(),
            "Interval must be greater than zero"
        );
    }
}
