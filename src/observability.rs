//! Tracing setup

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor `--log-filter` says otherwise
pub const DEFAULT_FILTER: &str = "info";

/// Build the env filter: `RUST_LOG` wins over `fallback`.
///
/// An unparsable `fallback` degrades to [`DEFAULT_FILTER`].
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global fmt subscriber. Later calls are no-ops.
pub fn init_tracing(fallback: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(fallback))
        .try_init();
}
