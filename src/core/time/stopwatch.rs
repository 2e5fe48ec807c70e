//=========================================================================
// Stopwatch
//=========================================================================
//
// Wall-clock lap timer for the loop driver.
//
// Every lap measures the time since the previous lap. Stopping drops the
// baseline, so a restart measures from zero instead of replaying the time
// spent stopped.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

//=== Stopwatch ===========================================================

/// Measures elapsed wall-clock time between consecutive ticks.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    last_lap: Option<Instant>,
}

impl Stopwatch {
    /// A stopped stopwatch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) measuring from `now`.
    pub fn start(&mut self, now: Instant) {
        self.last_lap = Some(now);
    }

    /// Stops measuring. The next lap after a restart begins from zero.
    pub fn stop(&mut self) {
        self.last_lap = None;
    }

    /// True between `start` and `stop`.
    pub fn is_running(&self) -> bool {
        self.last_lap.is_some()
    }

    /// Returns the time since the previous lap (or start) and moves the
    /// baseline to `now`.
    ///
    /// Returns [`Duration::ZERO`] when stopped or when `now` precedes the
    /// baseline.
    pub fn lap(&mut self, now: Instant) -> Duration {
        match self.last_lap {
            Some(last) => {
                let elapsed = now.saturating_duration_since(last);
                if now > last {
                    self.last_lap = Some(now);
                }
                elapsed
            }
            None => Duration::ZERO,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
