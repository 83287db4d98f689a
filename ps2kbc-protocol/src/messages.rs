//! Host commands and keyboard responses
//!
//! Commands travel host → keyboard, each byte acknowledged by the keyboard
//! with [`ACK`]. Responses are the non-scancode bytes a keyboard sends back.

// Command bytes: host → keyboard
pub const CMD_SET_LEDS: u8 = 0xED;
pub const CMD_ECHO: u8 = 0xEE;
pub const CMD_SCAN_CODE_SET: u8 = 0xF0;
pub const CMD_RESEND: u8 = 0xFE;
pub const CMD_RESET: u8 = 0xFF;

// Response bytes: keyboard → host
pub const ACK: u8 = 0xFA;
pub const SELF_TEST_PASSED: u8 = 0xAA;
pub const ECHO: u8 = 0xEE;
pub const RESEND: u8 = 0xFE;
pub const SELF_TEST_FAILED: u8 = 0xFC;
pub const SELF_TEST_FAILED_ALT: u8 = 0xFD;
pub const KEY_ERROR: u8 = 0x00;
pub const KEY_ERROR_ALT: u8 = 0xFF;

/// Scan Code Set 2, the set the controller decodes
pub const SCAN_CODE_SET_2: u8 = 0x02;

/// Only the low three bits of the LED argument are meaningful
pub const LED_MASK: u8 = 0x07;

/// Commands the controller sends to the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand {
    /// Set the keyboard LEDs (bit 0 scroll, bit 1 num, bit 2 caps)
    SetLeds(u8),
    /// Ask the keyboard to echo 0xEE back
    Echo,
    /// Select a scan code set (1-3)
    SelectScanCodeSet(u8),
    /// Ask the keyboard to repeat its last byte
    Resend,
    /// Reset and run the basic assurance test
    Reset,
}

impl HostCommand {
    /// Command byte
    pub fn opcode(self) -> u8 {
        match self {
            HostCommand::SetLeds(_) => CMD_SET_LEDS,
            HostCommand::Echo => CMD_ECHO,
            HostCommand::SelectScanCodeSet(_) => CMD_SCAN_CODE_SET,
            HostCommand::Resend => CMD_RESEND,
            HostCommand::Reset => CMD_RESET,
        }
    }

    /// Argument byte sent after the command, if any
    pub fn argument(self) -> Option<u8> {
        match self {
            HostCommand::SetLeds(mask) => Some(mask & LED_MASK),
            HostCommand::SelectScanCodeSet(set) => Some(set),
            _ => None,
        }
    }
}

/// Bytes the keyboard sends that are not scancodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Command byte accepted
    Ack,
    /// Basic assurance test passed
    SelfTestPassed,
    /// Basic assurance test failed
    SelfTestFailed,
    /// Reply to [`HostCommand::Echo`]
    Echo,
    /// Keyboard wants the last byte again
    Resend,
    /// Key detection error or buffer overrun
    KeyError,
}

impl Response {
    /// Parse a response byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            ACK => Some(Response::Ack),
            SELF_TEST_PASSED => Some(Response::SelfTestPassed),
            SELF_TEST_FAILED | SELF_TEST_FAILED_ALT => Some(Response::SelfTestFailed),
            ECHO => Some(Response::Echo),
            RESEND => Some(Response::Resend),
            KEY_ERROR | KEY_ERROR_ALT => Some(Response::KeyError),
            _ => None,
        }
    }

    /// Canonical wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            Response::Ack => ACK,
            Response::SelfTestPassed => SELF_TEST_PASSED,
            Response::SelfTestFailed => SELF_TEST_FAILED,
            Response::Echo => ECHO,
            Response::Resend => RESEND,
            Response::KeyError => KEY_ERROR,
        }
    }
}
