//! Shared state between the clock-edge handler and the foreground
//!
//! The edge handler runs to completion at interrupt priority; the foreground
//! polls. Everything they share lives in a [`Link`]: a single-slot mailbox
//! for received bytes, the transfer direction with the byte to transmit,
//! a one-shot resend request and the error counters.
//!
//! ```text
//!   clock edge ──► EdgeHandler ──► Transceiver ──► Link ◄── ProtocolController
//!                      │                            │
//!                   data line                   mailbox / stats
//! ```

pub mod handler;
pub mod mailbox;
pub mod shared;
pub mod transceiver;

pub use handler::EdgeHandler;
pub use mailbox::{Mailbox, MailboxFull};
pub use shared::{Direction, Link, LinkCommand, LinkStats};
pub use transceiver::{EdgeAction, Transceiver};
