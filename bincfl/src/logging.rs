//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with the serialized document on
//! stdout. `CFL_LOG` takes an `EnvFilter` directive and overrides `-v`.

use std::io;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive such as `libcfl=trace`.
pub const LOG_ENV: &str = "CFL_LOG";

/// Map a `-v` count to a default level.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity).as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .compact()
        .init();
}
