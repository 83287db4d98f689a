//! Character output
//!
//! Decoded characters go to the debug serial port as `Char <hex>` lines,
//! each one marked by a short pulse on the status LED. Output is
//! fire-and-forget: write errors are dropped.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use heapless::String;
use ps2kbc_hal::{OutputPin, UartTx};

/// Startup banner
pub const BANNER: &str = "Hello\r\n";

/// Longest line: "Char ff\r\n"
const LINE_LEN: usize = 16;

/// Serial port plus status LED
pub struct CharSink<U, L> {
    uart: U,
    status_led: L,
}

impl<U, L> CharSink<U, L>
where
    U: UartTx,
    L: OutputPin,
{
    pub fn new(uart: U, mut status_led: L) -> Self {
        status_led.set_low();
        Self { uart, status_led }
    }

    pub fn banner(&mut self) {
        let _ = self.uart.write_blocking(BANNER.as_bytes());
        let _ = self.uart.flush();
    }

    /// Pulse the status LED for `pulse_us` and report `ch`
    pub fn emit(&mut self, ch: u8, delay: &mut impl DelayNs, pulse_us: u32) {
        self.status_led.set_high();
        delay.delay_us(pulse_us);
        self.status_led.set_low();

        let mut line: String<LINE_LEN> = String::new();
        if write!(line, "Char {:x}\r\n", ch).is_ok() {
            let _ = self.uart.write_blocking(line.as_bytes());
        }
    }
}
