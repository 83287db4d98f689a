//! Watchdog abstraction
//!
//! The watchdog is the only fatal-error recovery the controller has: when
//! the foreground stops feeding it, the chip restarts.

/// Fixed-period liveness timer
pub trait Watchdog {
    /// Acknowledge the watchdog for another period
    fn feed(&mut self);
}
