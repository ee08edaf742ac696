//! Logging setup for hosts embedding the engine.
//!
//! The engine only emits `tracing` events; installing a subscriber is the
//! host's call. `init_logging` is a convenience for hosts without their own.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "sqlintel=info";

/// Installs a stderr subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
