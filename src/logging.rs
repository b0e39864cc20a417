//! Log output for the command-line tools.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a subscriber that writes logs to stderr.
///
/// The level is read from `RUST_LOG`, e.g. `RUST_LOG=pocketbook=debug`, and
/// defaults to `info`. Calling this more than once has no further effect.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if let Err(error) = tracing_subscriber::registry()
        .with(stderr_log.with_filter(filter))
        .try_init()
    {
        tracing::debug!("Logging was already set up: {error}");
    }
}
