//! Configuration type definitions
//!
//! Every wait the foreground performs is bounded by a value here. The
//! longest stretch between two watchdog feeds must fit inside one watchdog
//! period, otherwise the watchdog would restart the chip before the wait
//! could report its timeout. The keyboard reset feeds between its steps;
//! an LED update runs two sends inside one foreground iteration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum clock-low hold for a request-to-send
pub const MIN_REQUEST_TO_SEND_US: u32 = 100;

/// Bus timings used by the transceiver and protocol controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TimingConfig {
    /// Clock-low hold before pulling data low (request-to-send)
    pub request_to_send_us: u32,
    /// Settle time after a send, whether acknowledged or not
    pub post_send_us: u32,
    /// Budget for the device to clock a host byte out
    pub transmit_timeout_us: u32,
    /// Budget for the acknowledgment after each send attempt
    pub ack_timeout_us: u32,
    /// Budget for a command response (self-test can take hundreds of ms)
    pub response_timeout_us: u32,
    /// Time to let the rest of a misframed packet go by
    pub framing_recovery_ms: u32,
    /// Width of the status LED pulse per character
    pub status_pulse_us: u32,
    /// Total send attempts, first try included
    pub send_attempts: u8,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            request_to_send_us: 150,
            post_send_us: 150,
            transmit_timeout_us: 15_000,
            ack_timeout_us: 20_000,
            response_timeout_us: 450_000,
            framing_recovery_ms: 8,
            status_pulse_us: 10,
            send_attempts: 3,
        }
    }
}

impl TimingConfig {
    /// Worst-case duration of one `send`, all retries included
    pub fn worst_case_send_us(&self) -> u32 {
        let attempt = self
            .request_to_send_us
            .saturating_add(self.transmit_timeout_us)
            .saturating_add(self.ack_timeout_us);
        attempt
            .saturating_mul(self.send_attempts as u32)
            .saturating_add(self.post_send_us)
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct KeyboardConfig {
    /// Bus timings
    pub timing: TimingConfig,
    /// Watchdog period
    pub watchdog_timeout_ms: u32,
    /// Debug serial baud rate
    pub debug_baudrate: u32,
    /// Host reset request is asserted by driving the line low
    pub host_reset_active_low: bool,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            watchdog_timeout_ms: 500,
            debug_baudrate: 19200,
            host_reset_active_low: true,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `send_attempts` is zero
    NoSendAttempts,
    /// Request-to-send hold is shorter than the bus minimum
    RequestToSendTooShort,
    /// A bounded wait would outlive the watchdog period
    WaitExceedsWatchdog,
    /// Watchdog period is zero
    NoWatchdogPeriod,
    /// Baud rate is zero
    InvalidBaudrate,
}

impl KeyboardConfig {
    /// Check the configuration for values the controller cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timing = &self.timing;

        if timing.send_attempts == 0 {
            return Err(ConfigError::NoSendAttempts);
        }
        if timing.request_to_send_us < MIN_REQUEST_TO_SEND_US {
            return Err(ConfigError::RequestToSendTooShort);
        }
        if self.watchdog_timeout_ms == 0 {
            return Err(ConfigError::NoWatchdogPeriod);
        }
        if self.debug_baudrate == 0 {
            return Err(ConfigError::InvalidBaudrate);
        }

        let watchdog_us = self.watchdog_timeout_ms.saturating_mul(1000);
        let framing_us = timing.framing_recovery_ms.saturating_mul(1000);
        let led_update_us = timing.worst_case_send_us().saturating_mul(2);
        if led_update_us >= watchdog_us
            || timing.response_timeout_us >= watchdog_us
            || framing_us >= watchdog_us
        {
            return Err(ConfigError::WaitExceedsWatchdog);
        }

        Ok(())
    }
}
