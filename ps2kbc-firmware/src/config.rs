//! Keyboard configuration
//!
//! The constant below is generated by build.rs from keyboard.toml, which
//! has already been checked at compile time.

use defmt::*;
use ps2kbc_core::config::{KeyboardConfig, TimingConfig};

include!(concat!(env!("OUT_DIR"), "/keyboard_config.rs"));

/// Configuration to run with
pub fn load() -> KeyboardConfig {
    match KEYBOARD_CONFIG.validate() {
        Ok(()) => KEYBOARD_CONFIG,
        Err(e) => {
            warn!("keyboard.toml rejected ({}), using defaults", e);
            KeyboardConfig::default()
        }
    }
}
