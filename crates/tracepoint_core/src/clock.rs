//! Time source for occurrence timestamps
//!
//! Report payloads carry Unix timestamps in whole seconds. The host's wall
//! clock is an external collaborator, so the tracker reads time through
//! this trait; tests and replay tooling substitute [`ManualClock`].

use std::cell::Cell;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of the current wall-clock time
pub trait Clock {
    /// Current time as a duration since the Unix epoch
    fn now(&self) -> Duration;

    /// Current Unix time in whole seconds (convenience method)
    fn unix_seconds(&self) -> i64 {
        self.now().as_secs() as i64
    }
}

/// System wall clock
///
/// The default time source for trackers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }
}

/// Manually driven clock
///
/// Stands still until moved; used for deterministic tests and replay.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    /// Create a clock pinned at the given Unix time in seconds
    pub fn at(unix_seconds: u64) -> Self {
        Self {
            now: Cell::new(Duration::from_secs(unix_seconds)),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Pin the clock to an absolute time since the epoch
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
