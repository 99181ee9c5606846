//! Tracing subscriber setup for binaries.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! job of whichever binary embeds the crate.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise `default_filter`
/// (for example `"tasklane=info"`).
///
/// # Errors
///
/// Returns an error when a global subscriber has already been installed.
pub fn init_tracing(
    default_filter: &str,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
