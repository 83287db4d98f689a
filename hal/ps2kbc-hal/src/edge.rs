//! Edge interrupt gate
//!
//! The transceiver runs from a falling-edge interrupt on the PS/2 clock
//! line. The foreground needs to mask that source while it holds the clock
//! low (the device would otherwise see its own inhibit as a clock edge) and
//! throw away any edge latched while masked.

/// Falling-edge interrupt source on the clock line
pub trait EdgeInterrupt {
    /// Mask the edge interrupt
    fn disable(&mut self);

    /// Unmask the edge interrupt
    fn enable(&mut self);

    /// Discard an edge latched while the source was masked
    fn clear_pending(&mut self);

    /// Clear anything latched, then unmask
    fn rearm(&mut self) {
        self.clear_pending();
        self.enable();
    }
}
