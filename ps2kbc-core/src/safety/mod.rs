//! Supervisory restart paths
//!
//! The controller has no graceful recovery from a failed keyboard self-test,
//! an exhausted wait or the user's reset combination. Each of these ends in
//! a [`RestartReason`]; after that no further protocol activity happens and
//! the watchdog restarts the chip.

pub mod restart;
pub mod trigger;

pub use restart::RestartReason;
pub use trigger::{HostResetTrigger, RESET_COMBO};
