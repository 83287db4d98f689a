//! Foreground task
//!
//! Resets the keyboard, then polls the keyboard loop forever. Once a
//! restart is requested the task parks without feeding the watchdog.

use defmt::*;
use embassy_time::Delay;
use ps2kbc_core::keyboard::{Keyboard, Poll};
use ps2kbc_core::keys::KeyAction;
use ps2kbc_hal_rp2040::{DebugUart, GateHandle, OpenDrain, PushPull, Rp2040Watchdog, SharedLine};

/// Keyboard loop with the RP2040 peripherals plugged in
pub type FirmwareKeyboard = Keyboard<
    'static,
    OpenDrain<'static>,
    SharedLine,
    GateHandle,
    PushPull<'static>,
    Delay,
    DebugUart<'static>,
    PushPull<'static>,
    Rp2040Watchdog,
>;

#[embassy_executor::task]
pub async fn foreground_task(mut keyboard: FirmwareKeyboard) {
    info!("Foreground task started");

    match keyboard.start() {
        Ok(()) => info!("Keyboard reset, scan code set 2 selected"),
        Err(reason) => error!("Keyboard reset failed: {}", reason),
    }

    let mut stats = keyboard.stats();

    loop {
        match keyboard.poll() {
            Poll::Idle => {}
            Poll::Dispatched(KeyAction::Char(ch)) => debug!("Char {:x}", ch),
            Poll::Dispatched(KeyAction::UpdateLeds(mask)) => debug!("LEDs {:03b}", mask),
            Poll::Dispatched(KeyAction::Unsupported) => debug!("Pause/Break ignored"),
            Poll::Dispatched(KeyAction::None) => {}
            Poll::Restart(reason) => {
                error!("Restart requested: {}, waiting for watchdog", reason);
                core::future::pending::<()>().await;
            }
        }

        let current = keyboard.stats();
        if current != stats {
            warn!(
                "Link errors: framing={} parity={} dropped={}",
                current.framing_errors, current.parity_errors, current.dropped_bytes
            );
            stats = current;
        }
    }
}
