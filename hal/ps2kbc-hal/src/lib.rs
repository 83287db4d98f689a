//! PS2KBC Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the keyboard controller needs.
//! Chip-specific HALs implement them so the protocol engine in
//! `ps2kbc-core` can run unchanged on real hardware and in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ps2kbc-firmware / host tests           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ps2kbc-core (protocol engine)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ps2kbc-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  ps2kbc-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::BusLine`] - Open-collector PS/2 clock and data lines
//! - [`gpio::OutputPin`] - Push-pull outputs (status LED, host reset)
//! - [`edge::EdgeInterrupt`] - Falling-edge interrupt gate on the clock line
//! - [`uart::UartTx`] - Debug text output
//! - [`watchdog::Watchdog`] - Liveness timer

#![no_std]
#![deny(unsafe_code)]

pub mod edge;
pub mod gpio;
pub mod uart;
pub mod watchdog;

// Re-export key traits at crate root for convenience
pub use edge::EdgeInterrupt;
pub use gpio::{BusLine, OutputPin};
pub use uart::{UartConfig, UartTx};
pub use watchdog::Watchdog;
