//! Build script for ps2kbc-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates keyboard.toml at compile time
//! - Generates the `KEYBOARD_CONFIG` constant from it

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use ps2kbc_core::config::{ConfigError, KeyboardConfig, MIN_REQUEST_TO_SEND_US};

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate keyboard.toml configuration at compile time
fn validate_config() -> KeyboardConfig {
    println!("cargo:rerun-if-changed=keyboard.toml");

    let config_path = Path::new("keyboard.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: keyboard.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a keyboard.toml configuration file.       ║\n\
            ║  Please create one in the ps2kbc-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read keyboard.toml                             ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Syntax errors, unknown keys and out-of-range values all land here
    let config: KeyboardConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid keyboard.toml                                    ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid keyboard configuration                           ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            ║  • {:<62} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            describe(e, &config)
        );
    }

    println!("cargo:warning=keyboard.toml validated successfully");
    config
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line explanation of a rejected configuration
fn describe(error: ConfigError, config: &KeyboardConfig) -> String {
    match error {
        ConfigError::NoSendAttempts => "[timing] send_attempts must be at least 1".to_string(),
        ConfigError::RequestToSendTooShort => format!(
            "[timing] request_to_send_us must be at least {}",
            MIN_REQUEST_TO_SEND_US
        ),
        ConfigError::NoWatchdogPeriod => "watchdog_timeout_ms must be at least 1".to_string(),
        ConfigError::InvalidBaudrate => "debug_baudrate must be at least 1".to_string(),
        ConfigError::WaitExceedsWatchdog => format!(
            "a wait outlives the {} ms watchdog (LED update {} us)",
            config.watchdog_timeout_ms,
            config.timing.worst_case_send_us().saturating_mul(2)
        ),
    }
}

/// Write `KEYBOARD_CONFIG` to OUT_DIR for `include!`
fn generate_config(config: &KeyboardConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let t = &config.timing;

    let source = format!(
        "/// Configuration generated from keyboard.toml\n\
         pub const KEYBOARD_CONFIG: KeyboardConfig = KeyboardConfig {{\n    \
             timing: TimingConfig {{\n        \
                 request_to_send_us: {},\n        \
                 post_send_us: {},\n        \
                 transmit_timeout_us: {},\n        \
                 ack_timeout_us: {},\n        \
                 response_timeout_us: {},\n        \
                 framing_recovery_ms: {},\n        \
                 status_pulse_us: {},\n        \
                 send_attempts: {},\n    \
             }},\n    \
             watchdog_timeout_ms: {},\n    \
             debug_baudrate: {},\n    \
             host_reset_active_low: {},\n\
         }};\n",
        t.request_to_send_us,
        t.post_send_us,
        t.transmit_timeout_us,
        t.ack_timeout_us,
        t.response_timeout_us,
        t.framing_recovery_ms,
        t.status_pulse_us,
        t.send_attempts,
        config.watchdog_timeout_ms,
        config.debug_baudrate,
        config.host_reset_active_low
    );

    let mut f = File::create(out_dir.join("keyboard_config.rs")).unwrap();
    f.write_all(source.as_bytes()).unwrap();
}
