//=========================================================================
// FPS Counter
//=========================================================================
//
// Frames-per-second estimate from an exponential moving average of
// frame times. Fed once per presented frame.
//
//=========================================================================

use crate::core::error::EngineError;

/// Default smoothing factor for [`FpsCounter`].
pub const DEFAULT_FPS_SMOOTHING: f64 = 0.1;

/// Exponential-moving-average frame rate estimator.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    smoothing: f64,
    ema_frame_time: f64,
    seeded: bool,
}

impl FpsCounter {
    /// Creates a counter; `smoothing` must be in `(0, 1]`. Higher reacts faster.
    pub fn new(smoothing: f64) -> Result<Self, EngineError> {
        if !(smoothing > 0.0 && smoothing <= 1.0) {
            return Err(EngineError::invalid_argument(format!(
                "fps smoothing must be in (0, 1], got {smoothing}"
            )));
        }

        Ok(Self {
            smoothing,
            ema_frame_time: 0.0,
            seeded: false,
        })
    }

    /// Records one frame that took `delta_seconds`. Non-positive deltas are ignored.
    pub fn on_frame(&mut self, delta_seconds: f64) {
        if !(delta_seconds > 0.0) {
            return;
        }

        if !self.seeded {
            self.ema_frame_time = delta_seconds;
            self.seeded = true;
            return;
        }

        let a = self.smoothing;
        self.ema_frame_time = a * delta_seconds + (1.0 - a) * self.ema_frame_time;
    }

    /// Current estimate, or `0.0` before the first frame.
    pub fn fps(&self) -> f64 {
        if self.ema_frame_time <= 0.0 {
            0.0
        } else {
            1.0 / self.ema_frame_time
        }
    }

    /// Weight given to each new frame time.
    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_FPS_SMOOTHING,
            ema_frame_time: 0.0,
            seeded: false,
        }
    }
}
