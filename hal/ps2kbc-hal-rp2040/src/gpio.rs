//! Bus lines and push-pull outputs
//!
//! The RP2040 has no true open-drain mode. A line is emulated by latching
//! the output level low once and switching the pin direction: output pulls
//! the wire low, input lets the keyboard's pull-up take it high.

use core::cell::RefCell;

use embassy_rp::gpio::{Flex, Output, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use ps2kbc_hal::{BusLine, OutputPin};

/// Emulated open-collector line owned by one context
pub struct OpenDrain<'d> {
    pin: Flex<'d>,
}

impl<'d> OpenDrain<'d> {
    /// Wrap a pin and leave the line released
    pub fn new(mut pin: Flex<'d>) -> Self {
        release(&mut pin);
        Self { pin }
    }
}

impl BusLine for OpenDrain<'_> {
    fn pull_low(&mut self) {
        pull_low(&mut self.pin);
    }

    fn release(&mut self) {
        release(&mut self.pin);
    }

    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

/// Storage for a line used from both the edge task and the foreground
pub type LineCell = Mutex<CriticalSectionRawMutex, RefCell<Flex<'static>>>;

/// Handle to a [`LineCell`]; every access runs inside a critical section
#[derive(Clone, Copy)]
pub struct SharedLine {
    cell: &'static LineCell,
}

impl SharedLine {
    /// Wrap the cell and leave the line released
    pub fn new(cell: &'static LineCell) -> Self {
        cell.lock(|pin| release(&mut pin.borrow_mut()));
        Self { cell }
    }
}

impl BusLine for SharedLine {
    fn pull_low(&mut self) {
        self.cell.lock(|pin| pull_low(&mut pin.borrow_mut()));
    }

    fn release(&mut self) {
        self.cell.lock(|pin| release(&mut pin.borrow_mut()));
    }

    fn is_high(&self) -> bool {
        self.cell.lock(|pin| pin.borrow().is_high())
    }
}

fn pull_low(pin: &mut Flex<'_>) {
    pin.set_low();
    pin.set_as_output();
}

fn release(pin: &mut Flex<'_>) {
    pin.set_pull(Pull::None);
    pin.set_as_input();
}

/// Plain push-pull output (status LED, host reset request)
pub struct PushPull<'d> {
    pin: Output<'d>,
}

impl<'d> PushPull<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl OutputPin for PushPull<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
