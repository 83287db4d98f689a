//! Protocol controller
//!
//! Foreground half of the link: request-to-send handshake, send with
//! retry, command responses and the keyboard reset sequence. Every wait is
//! a bounded 1µs poll on the shared [`Link`]. A missing acknowledgment only
//! costs a send attempt; running out of the transmit or response budget
//! yields [`LinkError::Timeout`], which the caller escalates to a restart.
//!
//! Parity errors are answered with a resend while a wait is in progress, so
//! a corrupted acknowledgment or response is repeated by the keyboard
//! instead of being waited out.

use embedded_hal::delay::DelayNs;
use ps2kbc_hal::{BusLine, EdgeInterrupt, OutputPin};
use ps2kbc_protocol::messages::{
    ACK, CMD_RESEND, CMD_RESET, CMD_SCAN_CODE_SET, CMD_SET_LEDS, LED_MASK, SCAN_CODE_SET_2,
    SELF_TEST_PASSED,
};

use crate::config::{KeyboardConfig, TimingConfig};
use crate::link::{Direction, Link, LinkCommand};
use crate::safety::RestartReason;
use crate::state::ProtocolMode;

/// The bounded wait that ran out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitKind {
    /// The keyboard never clocked our byte out
    Transmit,
    /// No command response arrived
    Response,
}

/// Link-level failures surfaced to the foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    Timeout(WaitKind),
}

/// Result of a [`ProtocolController::send`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendStatus {
    /// The keyboard answered 0xFA
    Acknowledged { attempts: u8 },
    /// Every attempt went unacknowledged; the byte is given up on
    Unacknowledged {
        attempts: u8,
        last_response: Option<u8>,
    },
}

impl SendStatus {
    pub fn is_acknowledged(&self) -> bool {
        matches!(self, SendStatus::Acknowledged { .. })
    }
}

/// Command/response sequencing on top of the transceiver
pub struct ProtocolController<'a, C, D, E, R, T> {
    clock: C,
    data: D,
    edge: E,
    host_reset: R,
    delay: T,
    link: &'a Link,
    timing: TimingConfig,
    host_reset_active_low: bool,
    mode: ProtocolMode,
}

impl<'a, C, D, E, R, T> ProtocolController<'a, C, D, E, R, T>
where
    C: BusLine,
    D: BusLine,
    E: EdgeInterrupt,
    R: OutputPin,
    T: DelayNs,
{
    /// Take ownership of the bus lines, leaving the host reset request
    /// deasserted
    pub fn new(
        clock: C,
        data: D,
        edge: E,
        host_reset: R,
        delay: T,
        link: &'a Link,
        config: &KeyboardConfig,
    ) -> Self {
        let mut controller = Self {
            clock,
            data,
            edge,
            host_reset,
            delay,
            link,
            timing: config.timing,
            host_reset_active_low: config.host_reset_active_low,
            mode: ProtocolMode::Key,
        };
        controller.set_host_reset(false);
        controller
    }

    pub fn link(&self) -> &'a Link {
        self.link
    }

    pub fn mode(&self) -> ProtocolMode {
        self.mode
    }

    pub fn mode_mut(&mut self) -> &mut ProtocolMode {
        &mut self.mode
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn delay(&mut self) -> &mut T {
        &mut self.delay
    }

    /// Send one byte, retrying until the keyboard acknowledges it
    ///
    /// A wrong or missing acknowledgment counts as a failed attempt. After
    /// the last attempt the byte is given up on silently; only a byte that
    /// was never clocked out is an error.
    pub fn send(&mut self, byte: u8) -> Result<SendStatus, LinkError> {
        let max_attempts = self.timing.send_attempts.max(1);
        let mut attempts = 0;
        let mut last_response = None;

        let status = loop {
            attempts += 1;
            self.transmit(byte)?;
            self.link.mailbox().clear();

            let response = self.await_byte(self.timing.ack_timeout_us)?;
            if response == Some(ACK) {
                break SendStatus::Acknowledged { attempts };
            }
            if response.is_some() {
                last_response = response;
            }

            if attempts >= max_attempts {
                break SendStatus::Unacknowledged {
                    attempts,
                    last_response,
                };
            }
        };

        self.delay.delay_us(self.timing.post_send_us);
        Ok(status)
    }

    /// Wait for the keyboard's answer to a command
    pub fn get_response(&mut self) -> Result<u8, LinkError> {
        self.mode = ProtocolMode::Command;
        let response = self.await_byte(self.timing.response_timeout_us);
        self.mode = ProtocolMode::Key;
        response?.ok_or(LinkError::Timeout(WaitKind::Response))
    }

    /// Reset the keyboard and select Scan Code Set 2
    ///
    /// `checkpoint` runs after each step so the caller can feed its
    /// watchdog; the steps together take longer than one watchdog period.
    /// A failed self-test is unrecoverable and reported as a restart request.
    pub fn reset_device(&mut self, mut checkpoint: impl FnMut()) -> Result<(), RestartReason> {
        self.send(CMD_RESET)?;
        checkpoint();
        let response = self.get_response()?;
        if response != SELF_TEST_PASSED {
            return Err(RestartReason::SelfTestFailed(response));
        }
        checkpoint();
        self.send(CMD_SCAN_CODE_SET)?;
        checkpoint();
        self.send(SCAN_CODE_SET_2)?;
        Ok(())
    }

    /// Ask the host to reset us
    ///
    /// Holds the keyboard inhibited and asserts the reset request line.
    /// Nothing may touch the bus after this returns.
    pub fn reset_host(&mut self) -> RestartReason {
        self.edge.disable();
        self.clock.pull_low();
        self.set_host_reset(true);
        RestartReason::HostResetRequested
    }

    /// Update the keyboard's lock LEDs
    pub fn set_leds(&mut self, mask: u8) -> Result<SendStatus, LinkError> {
        self.send(CMD_SET_LEDS)?;
        self.send(mask & LED_MASK)
    }

    /// Ask the keyboard to repeat its last byte
    ///
    /// The keyboard answers with the repeated byte rather than 0xFA, so no
    /// acknowledgment is awaited; the byte arrives through the mailbox like
    /// any other.
    pub fn request_resend(&mut self) -> Result<(), LinkError> {
        self.transmit(CMD_RESEND)
    }

    /// Hold the clock low so the keyboard buffers its next byte
    pub fn inhibit(&mut self) {
        self.edge.disable();
        self.clock.pull_low();
    }

    /// Let the keyboard transmit again
    pub fn release_inhibit(&mut self) {
        self.clock.release();
        self.edge.rearm();
    }

    /// Request-to-send, then wait for the transceiver to clock `byte` out
    fn transmit(&mut self, byte: u8) -> Result<(), LinkError> {
        self.edge.disable();
        self.clock.pull_low();
        self.delay.delay_us(self.timing.request_to_send_us);
        self.data.pull_low();
        self.link.submit(LinkCommand::Transmit(byte));
        self.clock.release();
        self.edge.rearm();

        let timeout = self.timing.transmit_timeout_us;
        let done = self.poll(timeout, |link| {
            (link.direction() == Direction::Receive).then_some(())
        });

        self.clock.release();
        self.data.release();

        if done.is_none() {
            self.link.submit(LinkCommand::Receive);
            return Err(LinkError::Timeout(WaitKind::Transmit));
        }
        Ok(())
    }

    /// Wait up to `timeout_us` for the next byte from the keyboard
    ///
    /// A parity error seen meanwhile is answered with a resend and the wait
    /// carries on; the repeated byte arrives through the mailbox.
    fn await_byte(&mut self, timeout_us: u32) -> Result<Option<u8>, LinkError> {
        let mut waited = 0;
        loop {
            if self.link.take_resend_request() {
                self.transmit(CMD_RESEND)?;
            }
            if let Some(byte) = self.link.mailbox().take() {
                return Ok(Some(byte));
            }
            if waited >= timeout_us {
                return Ok(None);
            }
            self.delay.delay_us(1);
            waited += 1;
        }
    }

    /// Poll `check` every microsecond for up to `timeout_us`
    fn poll<V>(&mut self, timeout_us: u32, mut check: impl FnMut(&Link) -> Option<V>) -> Option<V> {
        let mut waited = 0;
        loop {
            if let Some(value) = check(self.link) {
                return Some(value);
            }
            if waited >= timeout_us {
                return None;
            }
            self.delay.delay_us(1);
            waited += 1;
        }
    }

    fn set_host_reset(&mut self, asserted: bool) {
        if asserted == self.host_reset_active_low {
            self.host_reset.set_low();
        } else {
            self.host_reset.set_high();
        }
    }
}
