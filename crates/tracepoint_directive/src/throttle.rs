//! Invocation throttling for scroll-driven checks
//!
//! Rapid scrolling produces a burst of notifications; the view trigger
//! only needs to re-check visibility every so often. Dropped calls are
//! not queued or replayed.

use std::time::Duration;

/// Leading-edge throttle
///
/// The first call is admitted and opens the window; calls inside the
/// window are dropped.
#[derive(Debug, Clone)]
pub struct Throttle {
    window: Duration,
    last_run: Option<Duration>,
}

impl Throttle {
    /// Create a throttle with the given minimum spacing between runs
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_run: None,
        }
    }

    /// Whether a call at `now` (time since the Unix epoch) may run
    ///
    /// Admission consumes the slot: the next call is admitted once the
    /// window has elapsed.
    pub fn admit(&mut self, now: Duration) -> bool {
        match self.last_run {
            Some(last) if now < last + self.window => false,
            _ => {
                self.last_run = Some(now);
                true
            }
        }
    }
}
