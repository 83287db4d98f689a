//! GPIO pin abstractions
//!
//! The PS/2 bus is two open-collector lines pulled up at the device. The
//! controller never drives a line high: it either pulls it low or lets go
//! and reads whatever the bus settles at. [`BusLine`] models exactly that.
//! Ordinary push-pull outputs (status LED, host reset request) use
//! [`OutputPin`].

/// Open-collector bus line (PS/2 clock or data)
pub trait BusLine {
    /// Actively pull the line low
    fn pull_low(&mut self);

    /// Stop driving the line; the pull-up takes it high unless the
    /// device is holding it low
    fn release(&mut self);

    /// Sample the current level seen on the wire
    fn is_high(&self) -> bool;

    /// Sample the current level seen on the wire
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Pull low for `false`, release for `true`
    fn drive(&mut self, high: bool) {
        if high {
            self.release();
        } else {
            self.pull_low();
        }
    }
}

/// Digital push-pull output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}
