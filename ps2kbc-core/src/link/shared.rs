//! Link state shared by both contexts

use portable_atomic::{AtomicBool, AtomicU16, AtomicU8, Ordering};

use super::mailbox::Mailbox;

/// Which way the next clock edges move data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Device to host (idle state)
    Receive,
    /// Host to device
    Transmit,
}

/// Commands the foreground may issue to the edge handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkCommand {
    /// Clock `byte` out on the following edges
    Transmit(u8),
    /// Abandon any transmission and go back to receiving
    Receive,
}

/// Snapshot of the link error counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Frames with a bad start or stop bit
    pub framing_errors: u16,
    /// Frames whose parity bit did not match
    pub parity_errors: u16,
    /// Valid frames that arrived while the mailbox was still full
    pub dropped_bytes: u16,
}

/// Everything the edge handler and the foreground share
///
/// Built from atomics only, so it can sit in a `static` on the target and
/// on the stack in host tests.
#[derive(Debug, Default)]
pub struct Link {
    mailbox: Mailbox,
    transmitting: AtomicBool,
    tx_start: AtomicBool,
    tx_byte: AtomicU8,
    resend_requested: AtomicBool,
    framing_errors: AtomicU16,
    parity_errors: AtomicU16,
    dropped_bytes: AtomicU16,
}

impl Link {
    pub const fn new() -> Self {
        Self {
            mailbox: Mailbox::new(),
            transmitting: AtomicBool::new(false),
            tx_start: AtomicBool::new(false),
            tx_byte: AtomicU8::new(0),
            resend_requested: AtomicBool::new(false),
            framing_errors: AtomicU16::new(0),
            parity_errors: AtomicU16::new(0),
            dropped_bytes: AtomicU16::new(0),
        }
    }

    pub fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    pub fn direction(&self) -> Direction {
        if self.transmitting.load(Ordering::Acquire) {
            Direction::Transmit
        } else {
            Direction::Receive
        }
    }

    /// Issue a command from the foreground
    pub fn submit(&self, command: LinkCommand) {
        match command {
            LinkCommand::Transmit(byte) => {
                self.tx_byte.store(byte, Ordering::Relaxed);
                self.tx_start.store(true, Ordering::Relaxed);
                self.transmitting.store(true, Ordering::Release);
            }
            LinkCommand::Receive => {
                self.transmitting.store(false, Ordering::Release);
                self.tx_start.store(false, Ordering::Relaxed);
            }
        }
    }

    /// Consume the "new transmission" marker left by [`LinkCommand::Transmit`]
    pub(crate) fn take_transmit_start(&self) -> bool {
        self.tx_start.swap(false, Ordering::AcqRel)
    }

    /// Byte of the current transmission
    pub fn tx_byte(&self) -> u8 {
        self.tx_byte.load(Ordering::Relaxed)
    }

    /// Called by the edge handler once the last bit is out
    pub fn finish_transmit(&self) {
        self.transmitting.store(false, Ordering::Release);
    }

    /// Ask the foreground to send a resend command
    pub fn request_resend(&self) {
        self.resend_requested.store(true, Ordering::Release);
    }

    /// Consume a pending resend request
    pub fn take_resend_request(&self) -> bool {
        self.resend_requested.swap(false, Ordering::AcqRel)
    }

    pub(crate) fn count_framing_error(&self) {
        self.framing_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn count_parity_error(&self) {
        self.parity_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn count_dropped_byte(&self) {
        self.dropped_bytes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn stats(&self) -> LinkStats {
        LinkStats {
            framing_errors: self.framing_errors.load(Ordering::Relaxed),
            parity_errors: self.parity_errors.load(Ordering::Relaxed),
            dropped_bytes: self.dropped_bytes.load(Ordering::Relaxed),
        }
    }
}
