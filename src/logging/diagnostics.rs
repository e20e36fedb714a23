//! Internal diagnostics for the crate itself
//!
//! The dual-sink logger never reports on its own failures. Diagnostics such as
//! config fallbacks or an unwritten fatal record go through `tracing` to stderr.

use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_DIAGNOSTIC_FILTER: &str = "twinlog=warn";

/// Build the diagnostic filter from `RUST_LOG`, or `default` if it is unset or invalid
pub fn diagnostic_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the stderr diagnostics subscriber
///
/// Returns false if a global subscriber was already installed.
pub fn init_diagnostics() -> bool {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(diagnostic_filter(DEFAULT_DIAGNOSTIC_FILTER))
        .with(stderr_layer)
        .try_init()
        .is_ok()
}
