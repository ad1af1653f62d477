//! Logging setup.
//!
//! The library only emits through the `log` facade; binaries call [`init`]
//! once at startup to route records to stderr.

use log::SetLoggerError;
use std::env;

/// Environment variable that raises the default level to `debug`.
pub const DEBUG_VAR: &str = "DEBUG";

/// Default filter when `RUST_LOG` is not set.
#[must_use]
pub fn default_filter(debug: bool) -> &'static str {
    if debug { "debug" } else { "warn" }
}

/// Install the stderr logger.
///
/// `RUST_LOG` takes precedence; otherwise the level is `debug` when the
/// `DEBUG` environment variable is set and `warn` when it is not.
///
/// # Errors
///
/// Returns an error if a global logger was already installed.
pub fn init() -> Result<(), SetLoggerError> {
    let filter = default_filter(env::var_os(DEBUG_VAR).is_some());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp_millis()
        .try_init()
}
