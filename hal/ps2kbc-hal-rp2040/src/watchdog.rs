//! Hardware watchdog

use embassy_rp::watchdog;
use embassy_time::Duration;
use ps2kbc_hal::Watchdog;

/// RP2040 watchdog, started with a fixed period
pub struct Rp2040Watchdog {
    inner: watchdog::Watchdog,
}

impl Rp2040Watchdog {
    /// Start the watchdog; it must be fed within `period_ms` from now on
    pub fn start(mut inner: watchdog::Watchdog, period_ms: u32) -> Self {
        inner.pause_on_debug(true);
        inner.start(Duration::from_millis(period_ms as u64));
        Self { inner }
    }
}

impl Watchdog for Rp2040Watchdog {
    fn feed(&mut self) {
        self.inner.feed();
    }
}
