//! Diagnostics go to stderr through `tracing`; stdout stays reserved for the
//! board itself.

use std::io;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Maps the number of `-v` flags to a level: warn, info, debug, then trace.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init_logging(verbosity: u8) {
    let level = level_for_verbosity(verbosity).as_str().to_lowercase();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,kanban={level}")));

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time();

    // A second initialisation (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
