//! Bit-level frame encoding and decoding for the PS/2 bus.
//!
//! Frame format, one bit per falling clock edge:
//! - bit 0: start bit, always 0
//! - bits 1-8: data byte, LSB first
//! - bit 9: odd parity over the data byte
//! - bit 10: stop bit, always 1

/// Number of clock edges in a device-to-host frame
pub const FRAME_BITS: u8 = 11;

/// Number of data bits carried by a frame
pub const DATA_BITS: u8 = 8;

/// Number of edges the host drives when sending (data, parity, stop)
pub const TX_DRIVEN_BITS: u8 = DATA_BITS + 2;

const START_BIT: u8 = 0;
const PARITY_BIT: u8 = 9;
const STOP_BIT: u8 = 10;
const FRAME_MASK: u16 = (1 << FRAME_BITS) - 1;

/// Errors detected when a received frame completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Start bit was 1 or stop bit was 0
    Framing,
    /// Parity bit does not match the data byte
    Parity,
}

/// Odd parity bit for a data byte
///
/// XOR-folds the eight bits down to one; the parity bit is set when the
/// byte holds an even number of ones so that data plus parity is odd.
pub const fn odd_parity(byte: u8) -> bool {
    let mut fold = byte;
    fold ^= fold >> 4;
    fold ^= fold >> 2;
    fold ^= fold >> 1;
    fold & 1 == 0
}

/// A complete 11-bit frame, bit 0 first on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitFrame(u16);

impl BitFrame {
    /// Build a correctly framed byte
    pub const fn encode(byte: u8) -> Self {
        let mut raw = (byte as u16) << 1;
        if odd_parity(byte) {
            raw |= 1 << PARITY_BIT;
        }
        raw |= 1 << STOP_BIT;
        Self(raw)
    }

    /// Wrap raw sampled bits (bit 0 = first edge)
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw & FRAME_MASK)
    }

    /// Raw bits, bit 0 first on the wire
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Level of the bit sampled on edge `index`
    pub const fn bit(self, index: u8) -> bool {
        index < FRAME_BITS && (self.0 >> index) & 1 == 1
    }

    /// The eight data bits
    pub const fn data(self) -> u8 {
        (self.0 >> 1) as u8
    }

    /// Sampled parity bit
    pub const fn parity_bit(self) -> bool {
        self.bit(PARITY_BIT)
    }

    /// Start bit is low and stop bit is high
    pub const fn is_framed(self) -> bool {
        !self.bit(START_BIT) && self.bit(STOP_BIT)
    }

    /// Validate framing then parity, returning the data byte
    pub fn decode(self) -> Result<u8, FrameError> {
        if !self.is_framed() {
            return Err(FrameError::Framing);
        }
        if odd_parity(self.data()) != self.parity_bit() {
            return Err(FrameError::Parity);
        }
        Ok(self.data())
    }
}

/// Accumulates device-to-host bits one clock edge at a time
#[derive(Debug, Clone, Default)]
pub struct BitReceiver {
    index: u8,
    raw: u16,
}

impl BitReceiver {
    /// Create an idle receiver
    pub const fn new() -> Self {
        Self { index: 0, raw: 0 }
    }

    /// Number of bits sampled so far in the current frame
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Check whether no frame is in progress
    pub fn is_idle(&self) -> bool {
        self.index == 0
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.index = 0;
        self.raw = 0;
    }

    /// Feed the data line level sampled on one falling edge
    ///
    /// Returns `None` while the frame is incomplete. On the eleventh bit the
    /// frame is decoded and the receiver resets, whatever the outcome.
    pub fn feed(&mut self, level: bool) -> Option<Result<u8, FrameError>> {
        if level {
            self.raw |= 1 << self.index;
        }
        self.index += 1;

        if self.index < FRAME_BITS {
            return None;
        }

        let frame = BitFrame::from_raw(self.raw);
        self.reset();
        Some(frame.decode())
    }
}

/// What the host does with the data line on one transmit edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxBit {
    /// Release (`true`) or pull low (`false`) the data line
    Drive(bool),
    /// All bits are out; this edge is the device's line acknowledge
    Done,
}

/// Shifts a host-to-device byte out one clock edge at a time
///
/// The start bit is not clocked: the request-to-send handshake leaves the
/// data line low, and the device reads that as the start bit.
#[derive(Debug, Clone)]
pub struct BitSender {
    frame: BitFrame,
    index: u8,
}

impl BitSender {
    /// Prepare to send `byte`
    pub const fn new(byte: u8) -> Self {
        Self {
            frame: BitFrame::encode(byte),
            index: 0,
        }
    }

    /// Byte being sent
    pub fn byte(&self) -> u8 {
        self.frame.data()
    }

    /// Number of edges consumed so far
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Level to put on the data line for the current edge
    pub fn next_bit(&mut self) -> TxBit {
        if self.index >= TX_DRIVEN_BITS {
            self.index = 0;
            return TxBit::Done;
        }
        let level = self.frame.bit(self.index + 1);
        self.index += 1;
        TxBit::Drive(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn receive(frame: BitFrame) -> Option<Result<u8, FrameError>> {
        let mut rx = BitReceiver::new();
        let mut result = None;
        for i in 0..FRAME_BITS {
            result = rx.feed(frame.bit(i));
        }
        assert!(rx.is_idle());
        result
    }

    #[test]
    fn test_parity_matches_popcount_for_every_byte() {
        for byte in 0..=255u8 {
            assert_eq!(odd_parity(byte), byte.count_ones() % 2 == 0, "byte {:#04x}", byte);
        }
    }

    #[test]
    fn test_every_byte_decodes_cleanly() {
        for byte in 0..=255u8 {
            assert_eq!(receive(BitFrame::encode(byte)), Some(Ok(byte)));
        }
    }

    #[test]
    fn test_encode_layout() {
        // 0x1C = 0b0001_1100, three ones -> parity 0
        let frame = BitFrame::encode(0x1C);
        assert!(!frame.bit(0));
        assert_eq!(frame.data(), 0x1C);
        assert!(!frame.parity_bit());
        assert!(frame.bit(10));

        // 0x00 has no ones -> parity 1
        assert!(BitFrame::encode(0x00).parity_bit());
    }

    #[test]
    fn test_bad_start_bit_is_framing_error() {
        let frame = BitFrame::from_raw(BitFrame::encode(0x1C).raw() | 1);
        assert_eq!(receive(frame), Some(Err(FrameError::Framing)));
    }

    #[test]
    fn test_bad_stop_bit_is_framing_error() {
        let frame = BitFrame::from_raw(BitFrame::encode(0x1C).raw() & !(1 << 10));
        assert_eq!(receive(frame), Some(Err(FrameError::Framing)));
    }

    #[test]
    fn test_framing_checked_before_parity() {
        let raw = BitFrame::encode(0x1C).raw() ^ (1 << 9);
        let frame = BitFrame::from_raw(raw & !(1 << 10));
        assert_eq!(frame.decode(), Err(FrameError::Framing));
    }

    #[test]
    fn test_receiver_incomplete_frame() {
        let mut rx = BitReceiver::new();
        for _ in 0..FRAME_BITS - 1 {
            assert_eq!(rx.feed(false), None);
        }
        assert_eq!(rx.index(), FRAME_BITS - 1);
    }

    #[test]
    fn test_sender_drives_data_parity_stop_then_done() {
        let mut tx = BitSender::new(0xED);
        let frame = BitFrame::encode(0xED);

        for i in 0..TX_DRIVEN_BITS {
            assert_eq!(tx.next_bit(), TxBit::Drive(frame.bit(i + 1)));
        }
        // Stop bit released high
        assert!(frame.bit(10));
        assert_eq!(tx.next_bit(), TxBit::Done);
        assert_eq!(tx.index(), 0);
    }

    proptest! {
        #[test]
        fn prop_flipped_data_bit_is_parity_error(byte in any::<u8>(), bit in 1u8..=8) {
            let frame = BitFrame::from_raw(BitFrame::encode(byte).raw() ^ (1 << bit));
            prop_assert_eq!(receive(frame), Some(Err(FrameError::Parity)));
        }

        #[test]
        fn prop_flipped_parity_bit_is_parity_error(byte in any::<u8>()) {
            let frame = BitFrame::from_raw(BitFrame::encode(byte).raw() ^ (1 << 9));
            prop_assert_eq!(receive(frame), Some(Err(FrameError::Parity)));
        }

        #[test]
        fn prop_sender_bits_reassemble(byte in any::<u8>()) {
            let mut tx = BitSender::new(byte);
            // Start bit comes from the request-to-send handshake
            let mut rx = BitReceiver::new();
            prop_assert_eq!(rx.feed(false), None);
            let mut result = None;
            while let TxBit::Drive(level) = tx.next_bit() {
                result = rx.feed(level);
            }
            prop_assert_eq!(result, Some(Ok(byte)));
        }
    }
}
