//! Tracing setup shared by every setlog binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the default subscriber: compact output at INFO, overridable
/// through `RUST_LOG`.
pub fn init() {
    init_with_level("info")
}

/// Like [`init`] but with a caller-chosen fallback level.
///
/// `RUST_LOG`, when set, still takes precedence over `default_level`.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

/// Subscriber for unit tests, routing output through the test writer
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
