//! Logging setup for the `riskmap` binary.
//!
//! The library only emits `tracing` spans and events; installing a
//! subscriber is left to the binary. `RUST_LOG` wins over `-v` flags:
//!
//! ```ignore
//! use riskmap::observability::init_tracing;
//!
//! fn main() {
//!     init_tracing(cli.verbosity);
//!     // ... rest of application
//! }
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a `-v` count.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs a stderr subscriber. A subscriber installed earlier is kept.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
