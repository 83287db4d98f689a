//! Foreground protocol state
//!
//! The protocol mode and the modifier/LED registers are owned by the
//! foreground. The edge handler never reads them.

pub mod mode;
pub mod registers;

pub use mode::ProtocolMode;
pub use registers::{Led, LedRegister, Modifier, ModifierRegister};
