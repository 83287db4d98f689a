//! Protocol mode

/// How the next byte drained from the mailbox is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolMode {
    /// Plain scancodes
    #[default]
    Key,
    /// The previous byte was the `E0` prefix
    ExtendedKey,
    /// Inside the Pause/Break make sequence
    Pause,
    /// The controller is waiting for a command response
    Command,
}

impl ProtocolMode {
    /// Check whether the key interpreter owns bytes in this mode
    pub fn accepts_keys(&self) -> bool {
        matches!(
            self,
            ProtocolMode::Key | ProtocolMode::ExtendedKey | ProtocolMode::Pause
        )
    }
}
