//! Single-slot handoff buffer
//!
//! The producer never overwrites a full slot: `try_put` hands the byte back
//! instead, and the caller decides what to do with it.

use portable_atomic::{AtomicBool, AtomicU8, Ordering};

/// The slot still holds an undrained byte; carries the rejected byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MailboxFull(pub u8);

/// One pending byte from the interrupt context to the foreground
#[derive(Debug, Default)]
pub struct Mailbox {
    byte: AtomicU8,
    full: AtomicBool,
}

impl Mailbox {
    /// Create an empty mailbox
    pub const fn new() -> Self {
        Self {
            byte: AtomicU8::new(0),
            full: AtomicBool::new(false),
        }
    }

    /// Store a byte if the slot is empty
    pub fn try_put(&self, byte: u8) -> Result<(), MailboxFull> {
        if self.full.load(Ordering::Acquire) {
            return Err(MailboxFull(byte));
        }
        self.byte.store(byte, Ordering::Relaxed);
        self.full.store(true, Ordering::Release);
        Ok(())
    }

    /// Drain the slot
    pub fn take(&self) -> Option<u8> {
        if !self.full.load(Ordering::Acquire) {
            return None;
        }
        let byte = self.byte.load(Ordering::Relaxed);
        self.full.store(false, Ordering::Release);
        Some(byte)
    }

    /// Discard any pending byte
    pub fn clear(&self) {
        self.full.store(false, Ordering::Release);
    }

    pub fn is_full(&self) -> bool {
        self.full.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_take() {
        let mailbox = Mailbox::new();
        assert!(!mailbox.is_full());
        assert_eq!(mailbox.try_put(0x1C), Ok(()));
        assert!(mailbox.is_full());
        assert_eq!(mailbox.take(), Some(0x1C));
        assert!(!mailbox.is_full());
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn test_full_slot_is_not_overwritten() {
        let mailbox = Mailbox::new();
        mailbox.try_put(0x1C).unwrap();
        assert_eq!(mailbox.try_put(0x32), Err(MailboxFull(0x32)));
        assert_eq!(mailbox.take(), Some(0x1C));
    }

    #[test]
    fn test_clear() {
        let mailbox = Mailbox::new();
        mailbox.try_put(0xFA).unwrap();
        mailbox.clear();
        assert_eq!(mailbox.take(), None);
        assert_eq!(mailbox.try_put(0xAA), Ok(()));
    }
}
