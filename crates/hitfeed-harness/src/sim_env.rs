//! Simulated wall clock.
//!
//! [`SimEnv`] hands out scripted times of day. Clones share one clock, so a
//! test can keep a handle and move time while the runtime owns another.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{NaiveTime, TimeDelta};
use hitfeed_core::Environment;

/// Environment with a scripted clock.
///
/// Every `local_time()` read returns the current time and then advances the
/// clock by the configured step (zero for a fixed clock). Times wrap at
/// midnight like a real wall clock.
#[derive(Debug, Clone)]
pub struct SimEnv {
    clock: Arc<Mutex<NaiveTime>>,
    step: TimeDelta,
}

impl Default for SimEnv {
    fn default() -> Self {
        Self::fixed(NaiveTime::default())
    }
}

impl SimEnv {
    /// Clock frozen at `time`.
    pub fn fixed(time: NaiveTime) -> Self {
        Self::advancing(time, TimeDelta::zero())
    }

    /// Clock starting at `start` that moves by `step` on every read.
    pub fn advancing(start: NaiveTime, step: TimeDelta) -> Self {
        Self { clock: Arc::new(Mutex::new(start)), step }
    }

    /// Clock starting at `h:m:s`, moving one second per read.
    ///
    /// Out-of-range fields start the clock at midnight.
    pub fn ticking_from(h: u32, m: u32, s: u32) -> Self {
        let start = NaiveTime::from_hms_opt(h, m, s).unwrap_or_default();
        Self::advancing(start, TimeDelta::seconds(1))
    }

    /// Time the next read will return, without advancing.
    pub fn peek(&self) -> NaiveTime {
        *self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move the clock to `time`.
    pub fn set(&self, time: NaiveTime) {
        *self.clock.lock().unwrap_or_else(PoisonError::into_inner) = time;
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        let mut clock = self.clock.lock().unwrap_or_else(PoisonError::into_inner);
        *clock += delta;
    }
}

impl Environment for SimEnv {
    fn local_time(&self) -> NaiveTime {
        let mut clock = self.clock.lock().unwrap_or_else(PoisonError::into_inner);
        let now = *clock;
        *clock += self.step;
        now
    }
}
