//=========================================================================
// SimTime
//=========================================================================
//
// Time value handed to every fixed update.
//
// Owned by the loop driver, advanced once per fixed step, read-only for
// everyone else.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::EngineError;

//=== SimTime =============================================================

/// Timing information for fixed-step updates and render interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimTime {
    total_seconds: f64,
    delta_seconds: f64,
    alpha: f64,
}

impl SimTime {
    /// Creates a zeroed time value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a time value from explicit parts. `alpha` is clamped.
    pub fn with_values(total_seconds: f64, delta_seconds: f64, alpha: f64) -> Self {
        Self {
            total_seconds,
            delta_seconds,
            alpha: clamp_alpha(alpha),
        }
    }

    /// Total simulated seconds since the loop started.
    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }

    /// Fixed delta of the step just taken, in seconds.
    pub fn delta_seconds(&self) -> f64 {
        self.delta_seconds
    }

    /// Interpolation alpha in `[0, 1]`.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Advances by one fixed step and records the interpolation alpha.
    ///
    /// A negative or non-finite delta is rejected. An out-of-range alpha is
    /// clamped, never rejected.
    pub fn advance(&mut self, fixed_delta_seconds: f64, alpha: f64) -> Result<(), EngineError> {
        if !fixed_delta_seconds.is_finite() || fixed_delta_seconds < 0.0 {
            return Err(EngineError::invalid_argument(format!(
                "fixed delta must be a non-negative number of seconds, got {fixed_delta_seconds}"
            )));
        }

        self.delta_seconds = fixed_delta_seconds;
        self.total_seconds += fixed_delta_seconds;
        self.alpha = clamp_alpha(alpha);
        Ok(())
    }

    /// Replaces the interpolation alpha (clamped).
    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = clamp_alpha(alpha);
    }
}

/// NaN maps to 0 so the `[0, 1]` invariant holds for any input.
pub(crate) fn clamp_alpha(alpha: f64) -> f64 {
    if alpha.is_nan() {
        0.0
    } else {
        alpha.clamp(0.0, 1.0)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates_total() {
        let mut time = SimTime::new();
        time.advance(0.5, 0.0).unwrap();
        time.advance(0.25, 0.0).unwrap();

        assert_eq!(time.total_seconds(), 0.75);
        assert_eq!(time.delta_seconds(), 0.25);
    }

    #[test]
    fn advance_rejects_negative_delta() {
        let mut time = SimTime::new();
        let err = time.advance(-0.1, 0.5).unwrap_err();

        assert!(matches!(err, EngineError::InvalidArgument(_)));
        assert_eq!(time, SimTime::new(), "rejected advance must not mutate");
    }

    #[test]
    fn advance_rejects_nan_delta() {
        let mut time = SimTime::new();
        assert!(time.advance(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn zero_delta_is_allowed() {
        let mut time = SimTime::new();
        time.advance(0.0, 0.3).unwrap();
        assert_eq!(time.total_seconds(), 0.0);
        assert_eq!(time.alpha(), 0.3);
    }

    #[test]
    fn alpha_is_clamped_not_rejected() {
        let mut time = SimTime::new();

        time.advance(0.1, 7.0).unwrap();
        assert_eq!(time.alpha(), 1.0);

        time.advance(0.1, -3.0).unwrap();
        assert_eq!(time.alpha(), 0.0);

        time.advance(0.1, f64::NAN).unwrap();
        assert_eq!(time.alpha(), 0.0);

        time.set_alpha(f64::INFINITY);
        assert_eq!(time.alpha(), 1.0);
    }

    #[test]
    fn with_values_clamps_alpha() {
        let time = SimTime::with_values(1.0, 0.5, 2.0);
        assert_eq!(time.alpha(), 1.0);
        assert_eq!(time.total_seconds(), 1.0);
        assert_eq!(time.delta_seconds(), 0.5);
    }
}
