//! PS2KBC - PS/2 Keyboard Controller Firmware
//!
//! Main firmware binary for RP2040 boards. Decodes a PS/2 keyboard into
//! ASCII on the debug UART and requests a host reset on Ctrl+Alt+AltGr.
//!
//! Pin assignments:
//! - GPIO0: debug UART TX
//! - GPIO2: PS/2 clock sense
//! - GPIO3: PS/2 clock drive (wired to the same line as GPIO2)
//! - GPIO4: PS/2 data
//! - GPIO5: host reset request
//! - GPIO25: status LED

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::uart;
use embassy_rp::watchdog::Watchdog;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use ps2kbc_core::controller::ProtocolController;
use ps2kbc_core::keyboard::Keyboard;
use ps2kbc_core::sink::CharSink;
use ps2kbc_hal_rp2040::uart::to_embassy_config;
use ps2kbc_hal_rp2040::{
    DebugUart, OpenDrain, PushPull, Rp2040Watchdog, SharedLine, UartConfig,
};

use crate::channels::{DATA_LINE, EDGE_GATE, LINK};

mod channels;
mod config;
mod tasks;

/// Executor for the clock-edge task, preempts the foreground
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("PS2KBC firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    info!(
        "Config: watchdog={}ms attempts={} baud={}",
        config.watchdog_timeout_ms, config.timing.send_attempts, config.debug_baudrate
    );

    // Debug serial
    let uart_config = to_embassy_config(&UartConfig {
        baudrate: config.debug_baudrate,
    });
    let uart = DebugUart::new(uart::UartTx::new_blocking(p.UART0, p.PIN_0, uart_config));

    // PS/2 bus
    let clock_sense = Input::new(p.PIN_2, Pull::None);
    let clock_drive = OpenDrain::new(Flex::new(p.PIN_3));
    let data_cell = DATA_LINE.init(Mutex::new(RefCell::new(Flex::new(p.PIN_4))));
    let data = SharedLine::new(data_cell);
    info!("PS/2 lines released");

    // Host reset request starts deasserted; the controller sets the level
    let host_reset = PushPull::new(Output::new(p.PIN_5, Level::High));
    let status_led = PushPull::new(Output::new(p.PIN_25, Level::Low));

    // Edge handling must be running before the keyboard is reset
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high_spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    high_spawner
        .spawn(tasks::line_task(
            clock_sense,
            data,
            &EDGE_GATE,
            config.timing.framing_recovery_ms,
        ))
        .unwrap();

    let controller = ProtocolController::new(
        clock_drive,
        data,
        EDGE_GATE.handle(),
        host_reset,
        Delay,
        &LINK,
        &config,
    );
    let sink = CharSink::new(uart, status_led);
    let watchdog = Rp2040Watchdog::start(Watchdog::new(p.WATCHDOG), config.watchdog_timeout_ms);
    info!("Watchdog started ({}ms)", config.watchdog_timeout_ms);

    let keyboard = Keyboard::new(controller, sink, watchdog);
    spawner.spawn(tasks::foreground_task(keyboard)).unwrap();

    info!("All tasks spawned, firmware running");
}
