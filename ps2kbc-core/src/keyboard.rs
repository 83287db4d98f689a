//! Foreground keyboard loop
//!
//! Ties the protocol controller, key interpreter, host reset trigger,
//! character sink and watchdog together. The firmware calls
//! [`Keyboard::start`] once and then [`Keyboard::poll`] forever; each poll
//! is one pass of the foreground loop.

use embedded_hal::delay::DelayNs;
use ps2kbc_hal::{BusLine, EdgeInterrupt, OutputPin, UartTx, Watchdog};

use crate::controller::{LinkError, ProtocolController};
use crate::keys::{KeyAction, KeyInterpreter};
use crate::link::{Link, LinkStats};
use crate::safety::{HostResetTrigger, RestartReason};
use crate::sink::CharSink;

/// Outcome of one foreground iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Poll {
    /// Nothing was pending
    Idle,
    /// A scancode byte was interpreted
    Dispatched(KeyAction),
    /// The controller has stopped; only the watchdog can recover
    Restart(RestartReason),
}

/// The whole foreground side of the controller
pub struct Keyboard<'a, C, D, E, R, T, U, L, W> {
    controller: ProtocolController<'a, C, D, E, R, T>,
    interpreter: KeyInterpreter,
    trigger: HostResetTrigger,
    sink: CharSink<U, L>,
    watchdog: W,
    halted: Option<RestartReason>,
}

impl<'a, C, D, E, R, T, U, L, W> Keyboard<'a, C, D, E, R, T, U, L, W>
where
    C: BusLine,
    D: BusLine,
    E: EdgeInterrupt,
    R: OutputPin,
    T: DelayNs,
    U: UartTx,
    L: OutputPin,
    W: Watchdog,
{
    pub fn new(
        controller: ProtocolController<'a, C, D, E, R, T>,
        sink: CharSink<U, L>,
        watchdog: W,
    ) -> Self {
        Self {
            controller,
            interpreter: KeyInterpreter::new(),
            trigger: HostResetTrigger::new(),
            sink,
            watchdog,
            halted: None,
        }
    }

    /// Print the banner and reset the keyboard
    ///
    /// The watchdog is fed between reset steps; the self-test wait alone
    /// takes most of a watchdog period.
    pub fn start(&mut self) -> Result<(), RestartReason> {
        self.sink.banner();
        self.watchdog.feed();
        let watchdog = &mut self.watchdog;
        let result = self.controller.reset_device(|| watchdog.feed());
        result.map_err(|reason| self.halt(reason))
    }

    /// Run one foreground iteration
    pub fn poll(&mut self) -> Poll {
        if let Some(reason) = self.halted {
            return Poll::Restart(reason);
        }

        self.watchdog.feed();

        if self.trigger.is_held(self.interpreter.modifiers()) {
            let reason = self.controller.reset_host();
            return Poll::Restart(self.halt(reason));
        }

        if self.controller.link().take_resend_request() {
            if let Err(err) = self.controller.request_resend() {
                return Poll::Restart(self.halt(err.into()));
            }
        }

        let pending = self.controller.link().mailbox().is_full();
        if !pending || !self.controller.mode().accepts_keys() {
            return Poll::Idle;
        }

        match self.dispatch() {
            Ok(action) => Poll::Dispatched(action),
            Err(err) => Poll::Restart(self.halt(err.into())),
        }
    }

    /// Interpret the pending byte with the keyboard inhibited
    fn dispatch(&mut self) -> Result<KeyAction, LinkError> {
        self.controller.inhibit();
        let result = self.interpret();
        self.controller.release_inhibit();
        result
    }

    fn interpret(&mut self) -> Result<KeyAction, LinkError> {
        let Some(code) = self.controller.link().mailbox().take() else {
            return Ok(KeyAction::None);
        };

        let action = self.interpreter.process(self.controller.mode_mut(), code);
        match action {
            KeyAction::Char(ch) => {
                let pulse_us = self.controller.timing().status_pulse_us;
                self.sink.emit(ch, self.controller.delay(), pulse_us);
            }
            KeyAction::UpdateLeds(mask) => {
                self.controller.set_leds(mask)?;
            }
            KeyAction::None | KeyAction::Unsupported => {}
        }
        Ok(action)
    }

    fn halt(&mut self, reason: RestartReason) -> RestartReason {
        self.halted = Some(reason);
        reason
    }

    pub fn halted(&self) -> Option<RestartReason> {
        self.halted
    }

    pub fn interpreter(&self) -> &KeyInterpreter {
        &self.interpreter
    }

    pub fn link(&self) -> &'a Link {
        self.controller.link()
    }

    pub fn stats(&self) -> LinkStats {
        self.controller.link().stats()
    }
}
