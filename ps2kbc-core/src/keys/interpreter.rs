//! Key interpreter state machine
//!
//! Consumes one scancode byte at a time. Modifier and lock state live in
//! the interpreter; the protocol mode is passed in because the controller
//! also switches it while waiting for command responses.

use ps2kbc_protocol::scancode::{
    ALT, BACKSPACE, CAPS_LOCK, CTRL, ENTER, ESCAPE, EXTENDED, LEFT_SHIFT, NUM_LOCK, PAUSE_PREFIX,
    PAUSE_TAIL, RELEASE, RIGHT_SHIFT, SCROLL_LOCK, TAB,
};

use super::keymap;
use crate::state::{Led, LedRegister, Modifier, ModifierRegister, ProtocolMode};

/// What the foreground should do after a byte has been interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// State updated, nothing to emit
    None,
    /// Emit an ASCII character
    Char(u8),
    /// A lock key was pressed; send this mask with Set LEDs
    UpdateLeds(u8),
    /// A recognised sequence the controller does not translate (Pause/Break)
    Unsupported,
}

/// Modifier, lock and Pause-sequence tracking
#[derive(Debug, Clone, Default)]
pub struct KeyInterpreter {
    modifiers: ModifierRegister,
    leds: LedRegister,
    pause_matched: usize,
}

impl KeyInterpreter {
    pub const fn new() -> Self {
        Self {
            modifiers: ModifierRegister::new(),
            leds: LedRegister::new(),
            pause_matched: 0,
        }
    }

    pub fn modifiers(&self) -> &ModifierRegister {
        &self.modifiers
    }

    pub fn leds(&self) -> &LedRegister {
        &self.leds
    }

    /// Interpret one byte drained from the mailbox
    ///
    /// Bytes arriving in [`ProtocolMode::Command`] belong to the controller
    /// and are ignored.
    pub fn process(&mut self, mode: &mut ProtocolMode, code: u8) -> KeyAction {
        match *mode {
            ProtocolMode::Key => self.key(mode, code),
            ProtocolMode::ExtendedKey => {
                self.extended(mode, code);
                KeyAction::None
            }
            ProtocolMode::Pause => self.pause(mode, code),
            ProtocolMode::Command => KeyAction::None,
        }
    }

    fn extended(&mut self, mode: &mut ProtocolMode, code: u8) {
        if self.modifiers.contains(Modifier::KeyUp) {
            match code {
                CTRL => self.modifiers.clear(Modifier::RightCtrl),
                ALT => self.modifiers.clear(Modifier::RightAlt),
                _ => {}
            }
            self.modifiers.clear(Modifier::KeyUp);
            *mode = ProtocolMode::Key;
            return;
        }

        match code {
            // Stay extended so the released key gets right-hand semantics
            RELEASE => {
                self.modifiers.set(Modifier::KeyUp);
                return;
            }
            CTRL => self.modifiers.set(Modifier::RightCtrl),
            ALT => self.modifiers.set(Modifier::RightAlt),
            _ => {}
        }
        *mode = ProtocolMode::Key;
    }

    fn key(&mut self, mode: &mut ProtocolMode, code: u8) -> KeyAction {
        if self.modifiers.contains(Modifier::KeyUp) {
            match code {
                LEFT_SHIFT => self.modifiers.clear(Modifier::LeftShift),
                RIGHT_SHIFT => self.modifiers.clear(Modifier::RightShift),
                CTRL => self.modifiers.clear(Modifier::LeftCtrl),
                ALT => self.modifiers.clear(Modifier::LeftAlt),
                _ => {}
            }
            self.modifiers.clear(Modifier::KeyUp);
            *mode = ProtocolMode::Key;
            return KeyAction::None;
        }

        match code {
            RELEASE => self.modifiers.set(Modifier::KeyUp),
            EXTENDED => *mode = ProtocolMode::ExtendedKey,
            PAUSE_PREFIX => {
                self.pause_matched = 0;
                *mode = ProtocolMode::Pause;
            }
            LEFT_SHIFT => self.modifiers.set(Modifier::LeftShift),
            RIGHT_SHIFT => self.modifiers.set(Modifier::RightShift),
            CTRL => self.modifiers.set(Modifier::LeftCtrl),
            ALT => self.modifiers.set(Modifier::LeftAlt),
            BACKSPACE => return KeyAction::Char(0x7F),
            ENTER => return KeyAction::Char(b'\r'),
            TAB => return KeyAction::Char(b'\t'),
            ESCAPE => return KeyAction::Char(0x1B),
            CAPS_LOCK => return self.toggle_lock(Led::CapsLock),
            NUM_LOCK => return self.toggle_lock(Led::NumLock),
            SCROLL_LOCK => return self.toggle_lock(Led::ScrollLock),
            _ => {
                return match self.resolve(code) {
                    0 => KeyAction::None,
                    ch => KeyAction::Char(ch),
                }
            }
        }
        KeyAction::None
    }

    /// Swallow the fixed Pause/Break tail, falling back to normal key
    /// handling if the keyboard sends something else
    fn pause(&mut self, mode: &mut ProtocolMode, code: u8) -> KeyAction {
        if PAUSE_TAIL.get(self.pause_matched) != Some(&code) {
            self.pause_matched = 0;
            *mode = ProtocolMode::Key;
            return self.key(mode, code);
        }

        self.pause_matched += 1;
        if self.pause_matched < PAUSE_TAIL.len() {
            return KeyAction::None;
        }

        self.pause_matched = 0;
        *mode = ProtocolMode::Key;
        KeyAction::Unsupported
    }

    fn toggle_lock(&mut self, led: Led) -> KeyAction {
        self.leds.toggle(led);
        KeyAction::UpdateLeds(self.leds.mask())
    }

    /// Table lookup with Ctrl, then Shift, then Caps Lock precedence
    fn resolve(&self, code: u8) -> u8 {
        if self.modifiers.ctrl() {
            let ch = keymap::shifted(code);
            return if ch.is_ascii_uppercase() { ch ^ 0x40 } else { 0 };
        }
        if self.modifiers.shift() {
            return keymap::shifted(code);
        }
        let ch = keymap::unshifted(code);
        if self.leds.is_on(Led::CapsLock) && ch.is_ascii_lowercase() {
            return ch ^ 0x20;
        }
        ch
    }
}
