//! Restart requests

use crate::controller::{LinkError, WaitKind};

/// Why the controller stopped and is waiting for the watchdog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RestartReason {
    /// The keyboard answered reset with something other than 0xAA
    SelfTestFailed(u8),
    /// The user held the host reset combination
    HostResetRequested,
    /// A bounded wait ran out
    Timeout(WaitKind),
}

impl From<LinkError> for RestartReason {
    fn from(err: LinkError) -> Self {
        match err {
            LinkError::Timeout(kind) => RestartReason::Timeout(kind),
        }
    }
}
