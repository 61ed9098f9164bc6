//! Diagnostics through the `tracing` ecosystem.
//!
//! Diagnostics go to stderr so that stdout only carries per-file results.
//! `RUST_LOG` takes precedence over the `-v` count when it is set.

use tracing_subscriber::{fmt, EnvFilter};

/// Map the number of `-v` flags to an `EnvFilter` directive.
pub const fn filter_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Calling it twice keeps the first one.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_for_verbosity(verbosity)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
