//! Falling-edge handler
//!
//! Glues the [`Transceiver`] to real pins. Call
//! [`EdgeHandler::on_falling_edge`] from the clock-line interrupt; it
//! samples the data line, advances the transceiver and applies the result.

use embedded_hal::delay::DelayNs;
use ps2kbc_hal::{BusLine, EdgeInterrupt};

use super::shared::Link;
use super::transceiver::{EdgeAction, Transceiver};

/// Interrupt-context half of the link
pub struct EdgeHandler<'a, D, E, T> {
    data: D,
    edge: E,
    delay: T,
    link: &'a Link,
    transceiver: Transceiver,
    framing_recovery_ms: u32,
}

impl<'a, D, E, T> EdgeHandler<'a, D, E, T>
where
    D: BusLine,
    E: EdgeInterrupt,
    T: DelayNs,
{
    pub fn new(data: D, edge: E, delay: T, link: &'a Link, framing_recovery_ms: u32) -> Self {
        Self {
            data,
            edge,
            delay,
            link,
            transceiver: Transceiver::new(),
            framing_recovery_ms,
        }
    }

    /// Service one falling clock edge
    pub fn on_falling_edge(&mut self) -> EdgeAction {
        let level = self.data.is_high();
        let action = self.transceiver.on_edge(self.link, level);

        match action {
            EdgeAction::Drive(high) => self.data.drive(high),
            EdgeAction::TransmitComplete => self.data.release(),
            EdgeAction::FramingError => self.skip_bad_frame(),
            _ => {}
        }

        action
    }

    /// Mask edges until the remainder of a misframed packet has gone by
    fn skip_bad_frame(&mut self) {
        self.edge.disable();
        self.delay.delay_ms(self.framing_recovery_ms);
        self.edge.clear_pending();
        self.edge.enable();
    }
}
