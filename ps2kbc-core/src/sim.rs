//! Bit-level keyboard simulator for host tests
//!
//! A [`Wire`] holds the level of every line plus a few counters. The
//! simulated keyboard clocks real 11-bit frames through an [`EdgeHandler`]
//! whenever simulated time advances, and time only advances through
//! [`SimDelay`], i.e. whenever the code under test waits.

use core::cell::{Cell, RefCell};
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use heapless::{Deque, Vec};
use ps2kbc_hal::{BusLine, EdgeInterrupt, OutputPin, UartTx, Watchdog};
use ps2kbc_protocol::messages::{ACK, CMD_RESEND, CMD_RESET, SELF_TEST_PASSED};
use ps2kbc_protocol::{BitFrame, FRAME_BITS, TX_DRIVEN_BITS};

use crate::config::KeyboardConfig;
use crate::controller::ProtocolController;
use crate::keyboard::{Keyboard, Poll};
use crate::link::{EdgeHandler, Link};
use crate::sink::CharSink;

/// One full clock cycle
const CLOCK_PERIOD_NS: u64 = 80_000;
/// Pause between two bytes sent back to back
const BYTE_GAP_NS: u64 = 200_000;
/// Delay before answering a host byte
const REPLY_DELAY_NS: u64 = 200_000;
/// Basic assurance test duration after a reset command
const SELF_TEST_NS: u64 = 2_000_000;
/// Shortest clock hold the keyboard accepts as request-to-send
const MIN_REQUEST_TO_SEND_NS: u64 = 100_000;

/// Line levels and observation counters
pub struct Wire {
    pub now_ns: Cell<u64>,
    pub host_clock_low: Cell<bool>,
    pub host_data_low: Cell<bool>,
    pub device_data_low: Cell<bool>,
    pub clock_low_since: Cell<u64>,
    pub last_clock_hold_ns: Cell<u64>,
    pub longest_clock_hold_ns: Cell<u64>,
    pub edge_enabled: Cell<bool>,
    pub edge_pending: Cell<bool>,
    pub isr_delay_ns: Cell<u64>,
    pub host_reset_high: Cell<bool>,
    pub host_reset_asserts: Cell<u32>,
    pub status_high: Cell<bool>,
    pub status_pulses: Cell<u32>,
    pub watchdog_feeds: Cell<u32>,
    pub uart: RefCell<Vec<u8, 1024>>,
}

impl Wire {
    pub fn new() -> Self {
        Self {
            now_ns: Cell::new(0),
            host_clock_low: Cell::new(false),
            host_data_low: Cell::new(false),
            device_data_low: Cell::new(false),
            clock_low_since: Cell::new(0),
            last_clock_hold_ns: Cell::new(0),
            longest_clock_hold_ns: Cell::new(0),
            edge_enabled: Cell::new(true),
            edge_pending: Cell::new(false),
            isr_delay_ns: Cell::new(0),
            host_reset_high: Cell::new(false),
            host_reset_asserts: Cell::new(0),
            status_high: Cell::new(false),
            status_pulses: Cell::new(0),
            watchdog_feeds: Cell::new(0),
            uart: RefCell::new(Vec::new()),
        }
    }

    fn data_is_high(&self) -> bool {
        !(self.host_data_low.get() || self.device_data_low.get())
    }
}

/// Host side of the clock line
pub struct SimClock<'w>(pub &'w Wire);

impl BusLine for SimClock<'_> {
    fn pull_low(&mut self) {
        if !self.0.host_clock_low.get() {
            self.0.clock_low_since.set(self.0.now_ns.get());
        }
        self.0.host_clock_low.set(true);
    }

    fn release(&mut self) {
        if self.0.host_clock_low.get() {
            let held = self.0.now_ns.get() - self.0.clock_low_since.get();
            self.0.last_clock_hold_ns.set(held);
            if held > self.0.longest_clock_hold_ns.get() {
                self.0.longest_clock_hold_ns.set(held);
            }
        }
        self.0.host_clock_low.set(false);
    }

    fn is_high(&self) -> bool {
        !self.0.host_clock_low.get()
    }
}

/// Host side of the data line
pub struct SimData<'w>(pub &'w Wire);

impl BusLine for SimData<'_> {
    fn pull_low(&mut self) {
        self.0.host_data_low.set(true);
    }

    fn release(&mut self) {
        self.0.host_data_low.set(false);
    }

    fn is_high(&self) -> bool {
        self.0.data_is_high()
    }
}

pub struct SimEdge<'w>(pub &'w Wire);

impl EdgeInterrupt for SimEdge<'_> {
    fn disable(&mut self) {
        self.0.edge_enabled.set(false);
    }

    fn enable(&mut self) {
        self.0.edge_enabled.set(true);
    }

    fn clear_pending(&mut self) {
        self.0.edge_pending.set(false);
    }
}

#[derive(Clone, Copy)]
enum PinKind {
    Status,
    HostReset,
}

pub struct SimPin<'w> {
    wire: &'w Wire,
    kind: PinKind,
}

impl<'w> SimPin<'w> {
    pub fn status(wire: &'w Wire) -> Self {
        Self {
            wire,
            kind: PinKind::Status,
        }
    }

    pub fn host_reset(wire: &'w Wire) -> Self {
        Self {
            wire,
            kind: PinKind::HostReset,
        }
    }
}

impl OutputPin for SimPin<'_> {
    fn set_high(&mut self) {
        match self.kind {
            PinKind::Status => {
                if !self.wire.status_high.get() {
                    self.wire.status_pulses.set(self.wire.status_pulses.get() + 1);
                }
                self.wire.status_high.set(true);
            }
            PinKind::HostReset => self.wire.host_reset_high.set(true),
        }
    }

    fn set_low(&mut self) {
        match self.kind {
            PinKind::Status => self.wire.status_high.set(false),
            PinKind::HostReset => {
                if self.wire.host_reset_high.get() {
                    let asserts = self.wire.host_reset_asserts.get();
                    self.wire.host_reset_asserts.set(asserts + 1);
                }
                self.wire.host_reset_high.set(false);
            }
        }
    }

    fn is_set_high(&self) -> bool {
        match self.kind {
            PinKind::Status => self.wire.status_high.get(),
            PinKind::HostReset => self.wire.host_reset_high.get(),
        }
    }
}

pub struct SimUart<'w>(pub &'w Wire);

impl UartTx for SimUart<'_> {
    type Error = Infallible;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let _ = self.0.uart.borrow_mut().extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub struct SimWatchdog<'w>(pub &'w Wire);

impl Watchdog for SimWatchdog<'_> {
    fn feed(&mut self) {
        self.0.watchdog_feeds.set(self.0.watchdog_feeds.get() + 1);
    }
}

/// Delay used inside the edge handler; records without advancing time
pub struct IsrDelay<'w>(pub &'w Wire);

impl DelayNs for IsrDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.0.isr_delay_ns.set(self.0.isr_delay_ns.get() + ns as u64);
    }
}

/// How the keyboard answers host bytes other than Resend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceReply {
    /// 0xFA, followed by the self-test result after a reset
    Ack,
    /// Always this byte
    Byte(u8),
    /// No answer at all
    Silent,
}

#[derive(Clone, Copy)]
struct Outgoing {
    frame: BitFrame,
    byte: u8,
    ready_ns: u64,
}

#[derive(Clone, Copy)]
enum DeviceState {
    Idle,
    Sending { out: Outgoing, bit: u8 },
    Receiving { raw: u16, bits: u8 },
}

/// Simulated keyboard wired to a [`Wire`]
pub struct SimKeyboard<'w> {
    wire: &'w Wire,
    handler: EdgeHandler<'w, SimData<'w>, SimEdge<'w>, IsrDelay<'w>>,
    state: DeviceState,
    queue: Deque<Outgoing, 32>,
    received: Vec<u8, 64>,
    last_sent: u8,
    reply: DeviceReply,
    self_test: u8,
    corrupt: Option<u8>,
    connected: bool,
    next_tick_ns: u64,
    idle_until_ns: u64,
}

impl<'w> SimKeyboard<'w> {
    pub fn new(wire: &'w Wire, link: &'w Link) -> Self {
        let recovery_ms = KeyboardConfig::default().timing.framing_recovery_ms;
        Self {
            wire,
            handler: EdgeHandler::new(SimData(wire), SimEdge(wire), IsrDelay(wire), link, recovery_ms),
            state: DeviceState::Idle,
            queue: Deque::new(),
            received: Vec::new(),
            last_sent: 0,
            reply: DeviceReply::Ack,
            self_test: SELF_TEST_PASSED,
            corrupt: None,
            connected: true,
            next_tick_ns: CLOCK_PERIOD_NS,
            idle_until_ns: 0,
        }
    }

    pub fn set_reply(&mut self, reply: DeviceReply) {
        self.reply = reply;
    }

    pub fn set_self_test(&mut self, code: u8) {
        self.self_test = code;
    }

    /// Flip the parity bit the next time the keyboard answers with `byte`;
    /// a resend repeats it intact
    pub fn corrupt_next(&mut self, byte: u8) {
        self.corrupt = Some(byte);
    }

    /// Stop generating clock edges altogether
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    /// Bytes the host has sent, in order
    pub fn received(&self) -> &[u8] {
        &self.received
    }

    pub fn queue_byte(&mut self, byte: u8) {
        self.queue_frame(BitFrame::encode(byte), byte);
    }

    pub fn queue_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.queue_byte(b);
        }
    }

    /// Queue an arbitrary frame; `byte` is what a resend will repeat
    pub fn queue_frame(&mut self, frame: BitFrame, byte: u8) {
        let ready_ns = self.wire.now_ns.get();
        self.push(Outgoing {
            frame,
            byte,
            ready_ns,
        });
    }

    /// Nothing in flight and nothing left to send
    pub fn is_quiet(&self) -> bool {
        matches!(self.state, DeviceState::Idle) && self.queue.is_empty()
    }

    /// Run the keyboard for `ns` of simulated time
    pub fn advance(&mut self, ns: u64) {
        let end = self.wire.now_ns.get() + ns;
        while self.next_tick_ns <= end {
            self.wire.now_ns.set(self.next_tick_ns);
            self.tick();
            self.next_tick_ns += CLOCK_PERIOD_NS;
        }
        self.wire.now_ns.set(end);
    }

    fn push(&mut self, out: Outgoing) {
        let _ = self.queue.push_back(out);
    }

    fn reply_after(&mut self, byte: u8, delay_ns: u64) {
        let mut frame = BitFrame::encode(byte);
        if self.corrupt == Some(byte) {
            self.corrupt = None;
            frame = BitFrame::from_raw(frame.raw() ^ (1 << 9));
        }
        self.push(Outgoing {
            frame,
            byte,
            ready_ns: self.wire.now_ns.get() + delay_ns,
        });
    }

    fn falling_edge(&mut self) {
        if self.wire.edge_enabled.get() {
            self.handler.on_falling_edge();
        } else {
            self.wire.edge_pending.set(true);
        }
    }

    fn tick(&mut self) {
        if !self.connected {
            return;
        }

        let wire = self.wire;
        if wire.host_clock_low.get() {
            // Inhibited mid-byte: give up and send it again later
            if let DeviceState::Sending { out, .. } = self.state {
                wire.device_data_low.set(false);
                let _ = self.queue.push_front(Outgoing { ready_ns: 0, ..out });
                self.state = DeviceState::Idle;
            }
            return;
        }

        match self.state {
            DeviceState::Idle => self.idle_tick(),
            DeviceState::Sending { out, bit } => {
                wire.device_data_low.set(!out.frame.bit(bit));
                self.falling_edge();
                if bit + 1 < FRAME_BITS {
                    self.state = DeviceState::Sending { out, bit: bit + 1 };
                } else {
                    wire.device_data_low.set(false);
                    self.last_sent = out.byte;
                    self.idle_until_ns = wire.now_ns.get() + BYTE_GAP_NS;
                    self.state = DeviceState::Idle;
                }
            }
            DeviceState::Receiving { raw, bits } if bits < TX_DRIVEN_BITS => {
                self.falling_edge();
                let level = wire.data_is_high() as u16;
                self.state = DeviceState::Receiving {
                    raw: raw | (level << (bits + 1)),
                    bits: bits + 1,
                };
            }
            DeviceState::Receiving { raw, .. } => {
                // Line acknowledge
                wire.device_data_low.set(true);
                self.falling_edge();
                wire.device_data_low.set(false);
                self.state = DeviceState::Idle;
                self.host_byte(BitFrame::from_raw(raw));
            }
        }
    }

    fn idle_tick(&mut self) {
        let wire = self.wire;
        if wire.host_data_low.get() {
            if wire.last_clock_hold_ns.get() >= MIN_REQUEST_TO_SEND_NS {
                wire.last_clock_hold_ns.set(0);
                self.state = DeviceState::Receiving { raw: 0, bits: 0 };
            }
            return;
        }

        let now = wire.now_ns.get();
        if now < self.idle_until_ns {
            return;
        }
        let ready = self.queue.front().map_or(false, |out| out.ready_ns <= now);
        if ready {
            if let Some(out) = self.queue.pop_front() {
                self.state = DeviceState::Sending { out, bit: 0 };
            }
        }
    }

    fn host_byte(&mut self, frame: BitFrame) {
        let Ok(byte) = frame.decode() else {
            self.reply_after(CMD_RESEND, REPLY_DELAY_NS);
            return;
        };
        let _ = self.received.push(byte);

        if byte == CMD_RESEND {
            let last = self.last_sent;
            self.reply_after(last, REPLY_DELAY_NS);
            return;
        }

        match self.reply {
            DeviceReply::Silent => {}
            DeviceReply::Byte(b) => self.reply_after(b, REPLY_DELAY_NS),
            DeviceReply::Ack => {
                self.reply_after(ACK, REPLY_DELAY_NS);
                if byte == CMD_RESET {
                    let code = self.self_test;
                    self.reply_after(code, SELF_TEST_NS);
                }
            }
        }
    }
}

/// Foreground delay; waiting is what moves simulated time forward
pub struct SimDelay<'d, 'w> {
    device: &'d RefCell<SimKeyboard<'w>>,
}

impl DelayNs for SimDelay<'_, '_> {
    fn delay_ns(&mut self, ns: u32) {
        self.device.borrow_mut().advance(ns as u64);
    }
}

pub type SimController<'w, 'd> =
    ProtocolController<'w, SimClock<'w>, SimData<'w>, SimEdge<'w>, SimPin<'w>, SimDelay<'d, 'w>>;

pub type SimLoop<'w, 'd> = Keyboard<
    'w,
    SimClock<'w>,
    SimData<'w>,
    SimEdge<'w>,
    SimPin<'w>,
    SimDelay<'d, 'w>,
    SimUart<'w>,
    SimPin<'w>,
    SimWatchdog<'w>,
>;

/// Controller wired to the simulated keyboard with default timings
pub fn controller<'w, 'd>(
    wire: &'w Wire,
    link: &'w Link,
    device: &'d RefCell<SimKeyboard<'w>>,
) -> SimController<'w, 'd> {
    ProtocolController::new(
        SimClock(wire),
        SimData(wire),
        SimEdge(wire),
        SimPin::host_reset(wire),
        SimDelay { device },
        link,
        &KeyboardConfig::default(),
    )
}

/// Full foreground loop wired to the simulated keyboard
pub fn keyboard<'w, 'd>(
    wire: &'w Wire,
    link: &'w Link,
    device: &'d RefCell<SimKeyboard<'w>>,
) -> SimLoop<'w, 'd> {
    Keyboard::new(
        controller(wire, link, device),
        CharSink::new(SimUart(wire), SimPin::status(wire)),
        SimWatchdog(wire),
    )
}

/// Poll until the keyboard has nothing more to say, collecting every
/// non-idle result; stops at the first restart request
pub fn run<'w, 'd>(kb: &mut SimLoop<'w, 'd>, device: &'d RefCell<SimKeyboard<'w>>) -> Vec<Poll, 64> {
    const POLL_STEP_NS: u64 = 20_000;
    const QUIET_POLLS: u32 = 50;
    const MAX_POLLS: u32 = 100_000;

    let mut polls = Vec::new();
    let mut quiet = 0;

    for _ in 0..MAX_POLLS {
        let poll = kb.poll();
        if poll != Poll::Idle {
            let _ = polls.push(poll);
            if matches!(poll, Poll::Restart(_)) {
                break;
            }
        }

        if device.borrow().is_quiet() && !kb.link().mailbox().is_full() {
            quiet += 1;
            if quiet >= QUIET_POLLS {
                break;
            }
        } else {
            quiet = 0;
        }

        device.borrow_mut().advance(POLL_STEP_NS);
    }
    polls
}
