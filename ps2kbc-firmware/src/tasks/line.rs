//! Clock-edge task
//!
//! Awaits every falling edge on the clock sense pin and runs the edge
//! handler for it. Keep this path short: the keyboard holds the clock low
//! for only 30-50 us per bit.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Delay;
use ps2kbc_core::link::{EdgeAction, EdgeHandler};
use ps2kbc_hal_rp2040::{EdgeGate, SharedLine};

use crate::channels::LINK;

#[embassy_executor::task]
pub async fn line_task(
    mut clock: Input<'static>,
    data: SharedLine,
    gate: &'static EdgeGate,
    framing_recovery_ms: u32,
) {
    info!("Line task started");

    let mut handler = EdgeHandler::new(data, gate.handle(), Delay, &LINK, framing_recovery_ms);

    loop {
        clock.wait_for_falling_edge().await;

        if !gate.admit() {
            continue;
        }

        if let EdgeAction::FramingError = handler.on_falling_edge() {
            trace!("Framing error, line resynchronised");
        }
    }
}
