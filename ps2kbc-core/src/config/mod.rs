//! Configuration types
//!
//! Timing and board options for the controller. Defaults reproduce the
//! timings the controller has always used on the bus.

pub mod types;

pub use types::*;
