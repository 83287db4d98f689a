//! Board-agnostic core logic for the PS/2 keyboard controller
//!
//! This crate contains the protocol engine, none of which depends on a
//! particular chip:
//!
//! - Shared link state between the clock interrupt and the foreground
//!   (single-slot mailbox, direction, error counters)
//! - Line-level transceiver driven by falling clock edges
//! - Protocol controller (send with retry, responses, reset handshake)
//! - Key interpreter (modifiers, lock LEDs, scancode tables)
//! - Host reset trigger
//! - Foreground keyboard loop and configuration types

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod keyboard;
pub mod keys;
pub mod link;
pub mod safety;
pub mod sink;
pub mod state;

#[cfg(test)]
mod sim;
