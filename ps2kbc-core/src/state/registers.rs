//! Modifier and LED bit registers

use ps2kbc_protocol::messages::LED_MASK;

/// Bits of the modifier register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Modifier {
    /// The previous byte was the `F0` release prefix
    KeyUp = 0,
    LeftShift = 1,
    LeftCtrl = 2,
    LeftAlt = 3,
    RightShift = 4,
    RightCtrl = 5,
    RightAlt = 6,
}

impl Modifier {
    const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// Currently held modifiers plus the pending key-up flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModifierRegister(u8);

impl ModifierRegister {
    /// Empty register
    pub const fn new() -> Self {
        Self(0)
    }

    pub fn set(&mut self, modifier: Modifier) {
        self.0 |= modifier.mask();
    }

    pub fn clear(&mut self, modifier: Modifier) {
        self.0 &= !modifier.mask();
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0 & modifier.mask() != 0
    }

    /// Check that every listed modifier is held
    pub fn contains_all(&self, modifiers: &[Modifier]) -> bool {
        modifiers.iter().all(|m| self.contains(*m))
    }

    /// Either Ctrl key is held
    pub fn ctrl(&self) -> bool {
        self.contains(Modifier::LeftCtrl) || self.contains(Modifier::RightCtrl)
    }

    /// Either Shift key is held
    pub fn shift(&self) -> bool {
        self.contains(Modifier::LeftShift) || self.contains(Modifier::RightShift)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}

/// Keyboard LEDs, numbered as in the Set LEDs argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Led {
    ScrollLock = 0,
    NumLock = 1,
    CapsLock = 2,
}

/// Mirror of the keyboard's lock LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedRegister(u8);

impl LedRegister {
    /// All LEDs off
    pub const fn new() -> Self {
        Self(0)
    }

    /// Flip one LED and return the new state
    pub fn toggle(&mut self, led: Led) -> bool {
        self.0 ^= 1 << led as u8;
        self.is_on(led)
    }

    pub fn is_on(&self, led: Led) -> bool {
        self.0 & (1 << led as u8) != 0
    }

    /// Argument for the Set LEDs command
    pub fn mask(&self) -> u8 {
        self.0 & LED_MASK
    }
}
