//=========================================================================
// Fixed-Step Accumulator
//=========================================================================
//
// Turns irregular wall-clock frame intervals into a whole number of
// fixed simulation steps plus an interpolation fraction.
//
// Flow:
//   advance(measured) → leftover += measured
//                     → while leftover >= fixed && steps < 5: step
//                     → alpha = clamp(leftover / fixed)
//
// The per-call bound keeps a long stall (app suspended, debugger break)
// from turning into an unbounded catch-up loop. Time beyond the bound
// stays in `leftover` and is drained by later calls, at most five
// steps at a time.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::sim_time::clamp_alpha;
use crate::core::error::EngineError;

//=== Constants ===========================================================

/// Upper bound on fixed steps extracted by a single [`FixedStepAccumulator::advance`].
pub const MAX_STEPS_PER_ADVANCE: u32 = 5;

/// Default simulation rate in steps per second.
pub const DEFAULT_STEPS_PER_SECOND: f64 = 60.0;

//=== FixedSteps ==========================================================

/// Result of one [`FixedStepAccumulator::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSteps {
    /// Number of fixed steps to simulate, at most [`MAX_STEPS_PER_ADVANCE`].
    pub steps: u32,

    /// Interpolation alpha in `[0, 1]` after extraction.
    pub alpha: f64,

    /// True when the bound stopped extraction with a full step still pending.
    pub saturated: bool,
}

//=== FixedStepAccumulator ================================================

/// Accumulates measured time and releases it in fixed-size steps.
#[derive(Debug, Clone)]
pub struct FixedStepAccumulator {
    fixed_delta: f64,
    leftover: f64,
}

impl FixedStepAccumulator {
    /// Creates an accumulator stepping at `steps_per_second`.
    ///
    /// The fixed delta (`1 / steps_per_second`) never changes afterwards.
    pub fn new(steps_per_second: f64) -> Result<Self, EngineError> {
        if !steps_per_second.is_finite() || steps_per_second <= 0.0 {
            return Err(EngineError::invalid_argument(format!(
                "steps per second must be positive, got {steps_per_second}"
            )));
        }

        Ok(Self {
            fixed_delta: 1.0 / steps_per_second,
            leftover: 0.0,
        })
    }

    //--- Stepping ---------------------------------------------------------

    /// Adds `measured_delta_seconds` and extracts as many fixed steps as the
    /// bound allows.
    pub fn advance(&mut self, measured_delta_seconds: f64) -> Result<FixedSteps, EngineError> {
        if !measured_delta_seconds.is_finite() || measured_delta_seconds < 0.0 {
            return Err(EngineError::invalid_argument(format!(
                "measured delta must be a non-negative number of seconds, got {measured_delta_seconds}"
            )));
        }

        self.leftover += measured_delta_seconds;

        let mut steps = 0;
        while self.leftover >= self.fixed_delta && steps < MAX_STEPS_PER_ADVANCE {
            self.leftover -= self.fixed_delta;
            steps += 1;
        }

        Ok(FixedSteps {
            steps,
            alpha: self.alpha(),
            saturated: self.leftover >= self.fixed_delta,
        })
    }

    /// Drops any accumulated time. Called at loop start/stop boundaries.
    pub fn reset(&mut self) {
        self.leftover = 0.0;
    }

    //--- Queries ----------------------------------------------------------

    /// Seconds per fixed step. Never changes after construction.
    pub fn fixed_delta(&self) -> f64 {
        self.fixed_delta
    }

    /// Time not yet consumed by a step. May exceed one step after saturation.
    pub fn leftover(&self) -> f64 {
        self.leftover
    }

    /// Current interpolation alpha, clamped to `[0, 1]`.
    pub fn alpha(&self) -> f64 {
        clamp_alpha(self.leftover / self.fixed_delta)
    }

    /// Whole fixed steps still pending after a saturated advance.
    pub fn backlog_steps(&self) -> u64 {
        (self.leftover / self.fixed_delta).floor() as u64
    }
}

impl Default for FixedStepAccumulator {
    fn default() -> Self {
        Self {
            fixed_delta: 1.0 / DEFAULT_STEPS_PER_SECOND,
            leftover: 0.0,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
