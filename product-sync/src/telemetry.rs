//! Tracing subscriber setup.
//!
//! Logs are JSON lines on stderr so stdout stays free for the mapping
//! output. Filtering follows `RUST_LOG`, defaulting to `info`.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info";

/// Install the global JSON subscriber.
///
/// A second call, or any other installation failure, is logged and
/// otherwise ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}
