//! Tracing subscriber setup for binaries built on the engine.

use tracing_subscriber::EnvFilter;

use crate::{RuntimeError, RuntimeResult};

/// Install a `fmt` subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (e.g. `"info"` or
/// `"nav_track=debug,info"`) is used.  Fails if the filter does not parse or
/// a global subscriber is already installed.
pub fn init_logging(default_filter: &str) -> RuntimeResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(default_filter).map_err(|e| RuntimeError::Logging(e.to_string()))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| RuntimeError::Logging(e.to_string()))
}
