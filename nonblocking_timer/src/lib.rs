//! A polling interval timer for cooperative run loops that must never block.
//!
//! Instead of sleeping, the run loop asks a [`Timer`] on every iteration whether its interval has
//! elapsed. Time comes from an injected monotonic [`Clock`].
#![no_std]
#![deny(missing_docs)]

#[cfg(any(feature = "std", all(test, not(target_os = "none"))))]
extern crate std;

pub mod clock;
pub mod error;
pub mod timer;

#[cfg(feature = "std")]
pub use clock::StdClock;
pub use clock::{Clock, ManualClock};
pub use error::{Error, Result, StateViolation};
pub use timer::{Status, Timer};
