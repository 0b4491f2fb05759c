//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with `RUST_LOG` or the `info` default
pub fn init() {
    init_with_level("info");
}

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence; `default_level` is used when it is unset.
/// Calling this more than once is harmless (later calls are ignored), which
/// keeps test binaries and embedding hosts from panicking on re-init.
pub fn init_with_level(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}
