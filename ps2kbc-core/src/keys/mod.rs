//! Scancode interpretation
//!
//! Turns the Scan Code Set 2 byte stream into ASCII characters and lock-LED
//! updates, tracking held modifiers along the way.

pub mod interpreter;
pub mod keymap;

pub use interpreter::{KeyAction, KeyInterpreter};
