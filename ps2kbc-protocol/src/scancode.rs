//! Scan Code Set 2 codes with special meaning to the controller
//!
//! Most keys send one make byte and `F0 <code>` on release. Keys added
//! after the original XT layout are prefixed with `E0`. Pause/Break sends a
//! fixed eight-byte make sequence starting with `E1` and never a release.

/// Prefix for keys in the extended block
pub const EXTENDED: u8 = 0xE0;

/// Prefix for the Pause/Break make sequence
pub const PAUSE_PREFIX: u8 = 0xE1;

/// Prefix marking the next code as a key release
pub const RELEASE: u8 = 0xF0;

/// Bytes following [`PAUSE_PREFIX`] in the Pause/Break sequence
pub const PAUSE_TAIL: [u8; 7] = [0x14, 0x77, 0xE1, 0xF0, 0x14, 0xF0, 0x77];

// Modifiers. Ctrl and Alt share their code with the right-hand key, which
// is sent behind the `E0` prefix.
pub const LEFT_SHIFT: u8 = 0x12;
pub const RIGHT_SHIFT: u8 = 0x59;
pub const CTRL: u8 = 0x14;
pub const ALT: u8 = 0x11;

// Keys with a fixed ASCII value
pub const BACKSPACE: u8 = 0x66;
pub const ENTER: u8 = 0x5A;
pub const TAB: u8 = 0x0D;
pub const ESCAPE: u8 = 0x76;

// Lock keys
pub const CAPS_LOCK: u8 = 0x58;
pub const NUM_LOCK: u8 = 0x77;
pub const SCROLL_LOCK: u8 = 0x7E;
