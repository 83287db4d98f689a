//! PS/2 Keyboard Wire Protocol
//!
//! This crate defines the device side of the PS/2 bus as seen by the
//! controller: the 11-bit frame, the command bytes the host sends and the
//! response bytes the keyboard answers with, and the Scan Code Set 2 codes
//! the key interpreter cares about.
//!
//! # Frame Overview
//!
//! Every byte travels as one frame, one bit per falling clock edge, with
//! the clock always generated by the device:
//! ```text
//! ┌───────┬──────────────────────┬────────┬──────┐
//! │ START │ DATA (LSB first)     │ PARITY │ STOP │
//! │ 0     │ 8 bits               │ odd    │ 1    │
//! └───────┴──────────────────────┴────────┴──────┘
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;
pub mod scancode;

pub use frame::{
    odd_parity, BitFrame, BitReceiver, BitSender, FrameError, TxBit, FRAME_BITS, TX_DRIVEN_BITS,
};
pub use messages::{HostCommand, Response};
