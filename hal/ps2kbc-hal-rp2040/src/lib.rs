//! RP2040-specific HAL for the PS/2 keyboard controller
//!
//! Implements the `ps2kbc-hal` traits on top of embassy-rp:
//!
//! - Open-collector bus lines emulated with `Flex` pins
//! - A data line shared between the edge task and the foreground
//! - Edge gate for the clock-line falling-edge task
//! - Blocking debug UART
//! - Hardware watchdog

#![no_std]
#![deny(unsafe_code)]

pub mod edge;
pub mod gpio;
pub mod uart;
pub mod watchdog;

pub use edge::{EdgeGate, GateHandle};
pub use gpio::{LineCell, OpenDrain, PushPull, SharedLine};
pub use uart::DebugUart;
pub use watchdog::Rp2040Watchdog;

// Re-export shared traits from ps2kbc-hal for convenience
pub use ps2kbc_hal::{BusLine, EdgeInterrupt, OutputPin, UartConfig, UartTx, Watchdog};
