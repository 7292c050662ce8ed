//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence; `default_level` (for example `"info"`) is
/// used when the variable is unset. Safe to call more than once: later calls
/// are ignored.
pub fn init(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}
