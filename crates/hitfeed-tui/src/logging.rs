//! Log subscriber setup.
//!
//! The terminal belongs to the UI, so logs go to a file. `RUST_LOG`
//! overrides the configured level.

use std::{fs::OpenOptions, path::Path, sync::Mutex};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::TerminalError;

/// Install a global subscriber appending to the file at `path`.
///
/// `level` is an `EnvFilter` directive such as `info` or
/// `hitfeed_client=debug`.
pub fn init(path: &Path, level: &str) -> Result<(), TerminalError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .try_init()
        .map_err(|e| TerminalError::Logging(e.to_string()))
}
