//! Software gate for the clock-edge task
//!
//! Falling edges are awaited by a task on a high-priority interrupt
//! executor. Masking the GPIO interrupt from the foreground would race
//! with that task, so the mask lives here instead: while the gate is
//! closed, edges are dropped and the handler is skipped.

use portable_atomic::{AtomicBool, Ordering};
use ps2kbc_hal::EdgeInterrupt;

/// Shared gate state, normally a `static`
pub struct EdgeGate {
    enabled: AtomicBool,
}

impl EdgeGate {
    /// Gate starts open
    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
        }
    }

    /// Called by the edge task for every falling edge. Returns whether the
    /// handler should run.
    pub fn admit(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn handle(&'static self) -> GateHandle {
        GateHandle { gate: self }
    }
}

impl Default for EdgeGate {
    fn default() -> Self {
        Self::new()
    }
}

/// [`EdgeInterrupt`] view of a static [`EdgeGate`]
#[derive(Clone, Copy)]
pub struct GateHandle {
    gate: &'static EdgeGate,
}

impl EdgeInterrupt for GateHandle {
    fn disable(&mut self) {
        self.gate.enabled.store(false, Ordering::Release);
    }

    fn enable(&mut self) {
        self.gate.enabled.store(true, Ordering::Release);
    }

    // Nothing is latched while the gate is closed
    fn clear_pending(&mut self) {}
}
