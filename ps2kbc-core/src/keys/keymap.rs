//! Scan Code Set 2 to ASCII tables
//!
//! Indexed by make code, 0x00-0x8F. Zero means the key has no character.
//! Keypad keys produce their digits regardless of Num Lock.

/// Number of entries in each table
pub const TABLE_LEN: usize = 0x90;

static UNSHIFTED: [u8; TABLE_LEN] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, b'`', 0, // 00-0F
    0, 0, 0, 0, 0, b'q', b'1', 0, 0, 0, b'z', b's', b'a', b'w', b'2', 0, // 10-1F
    0, b'c', b'x', b'd', b'e', b'4', b'3', 0, 0, b' ', b'v', b'f', b't', b'r', b'5', 0, // 20-2F
    0, b'n', b'b', b'h', b'g', b'y', b'6', 0, 0, 0, b'm', b'j', b'u', b'7', b'8', 0, // 30-3F
    0, b',', b'k', b'i', b'o', b'0', b'9', 0, 0, b'.', b'/', b'l', b';', b'p', b'-', 0, // 40-4F
    0, 0, b'\'', 0, b'[', b'=', 0, 0, 0, 0, 0, b']', 0, b'\\', 0, 0, // 50-5F
    0, 0, 0, 0, 0, 0, 0, 0, 0, b'1', 0, b'4', b'7', 0, 0, 0, // 60-6F
    b'0', b'.', b'2', b'5', b'6', b'8', 0, 0, 0, b'+', b'3', b'-', b'*', b'9', 0, 0, // 70-7F
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 80-8F
];

/// Also used for Caps Lock after case folding and for Ctrl codes
static SHIFTED: [u8; TABLE_LEN] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, b'~', 0, // 00-0F
    0, 0, 0, 0, 0, b'Q', b'!', 0, 0, 0, b'Z', b'S', b'A', b'W', b'@', 0, // 10-1F
    0, b'C', b'X', b'D', b'E', b'$', b'#', 0, 0, b' ', b'V', b'F', b'T', b'R', b'%', 0, // 20-2F
    0, b'N', b'B', b'H', b'G', b'Y', b'^', 0, 0, 0, b'M', b'J', b'U', b'&', b'*', 0, // 30-3F
    0, b'<', b'K', b'I', b'O', b')', b'(', 0, 0, b'>', b'?', b'L', b':', b'P', b'_', 0, // 40-4F
    0, 0, b'"', 0, b'{', b'+', 0, 0, 0, 0, 0, b'}', 0, b'|', 0, 0, // 50-5F
    0, 0, 0, 0, 0, 0, 0, 0, 0, b'1', 0, b'4', b'7', 0, 0, 0, // 60-6F
    b'0', b'.', b'2', b'5', b'6', b'8', 0, 0, 0, b'+', b'3', b'-', b'*', b'9', 0, 0, // 70-7F
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 80-8F
];

/// Character for `code` with no modifier held
pub fn unshifted(code: u8) -> u8 {
    UNSHIFTED.get(code as usize).copied().unwrap_or(0)
}

/// Character for `code` with Shift held
pub fn shifted(code: u8) -> u8 {
    SHIFTED.get(code as usize).copied().unwrap_or(0)
}
