//! Log setup for the binaries.
//!
//! Events go to stderr so that stdout carries nothing but protocol output.
//! Components log under these targets:
//!
//! | Target | Description |
//! |--------|-------------|
//! | `pipefitter::policy` | Turn planning and decision diagnostics |
//! | `pipefitter::autoplay` | Scheduler lifecycle and executed actions |
//! | `pipefitter::protocol` | Command parsing and engine state changes |
//!
//! `RUST_LOG` takes precedence over the filter passed in.

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Builds the filter, preferring `RUST_LOG` over `default_filter`.
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Installs the global subscriber. Safe to call more than once; only the
/// first call has any effect.
pub fn init(default_filter: &str) {
    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init()
        .ok();
}
