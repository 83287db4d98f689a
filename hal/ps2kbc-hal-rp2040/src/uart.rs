//! Blocking debug UART
//!
//! Only the TX half is used; characters are short and infrequent, so
//! writes block rather than going through DMA.

use embassy_rp::uart::{self, Blocking};
use ps2kbc_hal::uart::UartConfig;
use ps2kbc_hal::UartTx;

/// Convert the board-agnostic UART settings to embassy-rp's
///
/// embassy-rp defaults to 8N1, so only the rate is carried over.
pub fn to_embassy_config(config: &UartConfig) -> uart::Config {
    let mut out = uart::Config::default();
    out.baudrate = config.baudrate;
    out
}

/// Debug serial output
pub struct DebugUart<'d> {
    tx: uart::UartTx<'d, Blocking>,
}

impl<'d> DebugUart<'d> {
    pub fn new(tx: uart::UartTx<'d, Blocking>) -> Self {
        Self { tx }
    }
}

impl UartTx for DebugUart<'_> {
    type Error = uart::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.blocking_write(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.tx.blocking_flush()
    }
}
