//! Line-level transceiver
//!
//! Pure bit bookkeeping for one falling clock edge at a time. The caller
//! samples the data line before the call and applies the returned
//! [`EdgeAction`] to the pins afterwards, so the logic here never touches
//! hardware.

use ps2kbc_protocol::{BitReceiver, BitSender, FrameError, TxBit};

use super::mailbox::MailboxFull;
use super::shared::{Direction, Link};

/// Outcome of one falling clock edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeAction {
    /// Mid-frame, nothing to do
    Idle,
    /// Put this level on the data line (`true` releases it)
    Drive(bool),
    /// The device clocked its line acknowledge; back to receiving
    TransmitComplete,
    /// A byte landed in the mailbox
    Received(u8),
    /// A valid byte arrived while the mailbox was full and was discarded
    Dropped(u8),
    /// Bad start or stop bit; the rest of the packet must be skipped
    FramingError,
    /// Parity mismatch; a resend has been requested
    ParityError,
}

/// Bit-level state owned by the interrupt context
#[derive(Debug, Default)]
pub struct Transceiver {
    receiver: BitReceiver,
    sender: Option<BitSender>,
}

impl Transceiver {
    pub const fn new() -> Self {
        Self {
            receiver: BitReceiver::new(),
            sender: None,
        }
    }

    /// Handle one falling edge, `level` being the sampled data line
    pub fn on_edge(&mut self, link: &Link, level: bool) -> EdgeAction {
        match link.direction() {
            Direction::Transmit => self.transmit_edge(link),
            Direction::Receive => {
                self.sender = None;
                self.receive_edge(link, level)
            }
        }
    }

    fn transmit_edge(&mut self, link: &Link) -> EdgeAction {
        if link.take_transmit_start() || self.sender.is_none() {
            self.receiver.reset();
            self.sender = Some(BitSender::new(link.tx_byte()));
        }

        let bit = match self.sender.as_mut() {
            Some(sender) => sender.next_bit(),
            None => TxBit::Done,
        };

        match bit {
            TxBit::Drive(level) => EdgeAction::Drive(level),
            TxBit::Done => {
                self.sender = None;
                link.finish_transmit();
                EdgeAction::TransmitComplete
            }
        }
    }

    fn receive_edge(&mut self, link: &Link, level: bool) -> EdgeAction {
        match self.receiver.feed(level) {
            None => EdgeAction::Idle,
            Some(Ok(byte)) => match link.mailbox().try_put(byte) {
                Ok(()) => EdgeAction::Received(byte),
                Err(MailboxFull(byte)) => {
                    link.count_dropped_byte();
                    EdgeAction::Dropped(byte)
                }
            },
            Some(Err(FrameError::Framing)) => {
                link.count_framing_error();
                EdgeAction::FramingError
            }
            Some(Err(FrameError::Parity)) => {
                link.count_parity_error();
                link.request_resend();
                EdgeAction::ParityError
            }
        }
    }
}
