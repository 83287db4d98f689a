//! Host reset key combination

use crate::state::{Modifier, ModifierRegister};

/// Left Ctrl + Left Alt + Right Alt
pub const RESET_COMBO: [Modifier; 3] = [Modifier::LeftCtrl, Modifier::LeftAlt, Modifier::RightAlt];

/// Watches the modifier register for the host reset combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostResetTrigger;

impl HostResetTrigger {
    pub const fn new() -> Self {
        Self
    }

    /// Check whether every key of the combination is held
    pub fn is_held(&self, modifiers: &ModifierRegister) -> bool {
        modifiers.contains_all(&RESET_COMBO)
    }
}
