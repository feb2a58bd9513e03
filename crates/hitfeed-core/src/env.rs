//! Environment abstraction for deterministic testing.
//!
//! Decouples client logic from the system clock. Production reads the local
//! wall clock, simulation hands out scripted times so rendered feed
//! timestamps are reproducible.

use chrono::NaiveTime;

/// Abstract environment providing the time of day.
///
/// # Invariants
///
/// - `local_time()` is the client-side capture time. It is never compared
///   with, or replaced by, server time.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Current local wall-clock time of day.
    fn local_time(&self) -> NaiveTime;
}

/// Environment backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    fn local_time(&self) -> NaiveTime {
        chrono::Local::now().time()
    }
}
