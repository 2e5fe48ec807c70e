//=========================================================================
// Time
//=========================================================================
//
// Fixed-timestep scheduling primitives.
//
// Architecture:
//   Stopwatch ──lap()──> FixedStepAccumulator ──steps, alpha──> SimTime
//                                                  │
//   FpsCounter <── presented frames                └─> LoopDriver
//
//=========================================================================

//=== Module Declarations =================================================

mod accumulator;
mod fps_counter;
mod sim_time;
mod stopwatch;

//=== Public API ==========================================================

pub use accumulator::{
    FixedStepAccumulator, FixedSteps, DEFAULT_STEPS_PER_SECOND, MAX_STEPS_PER_ADVANCE,
};
pub use fps_counter::{FpsCounter, DEFAULT_FPS_SMOOTHING};
pub use sim_time::SimTime;
pub(crate) use sim_time::clamp_alpha;
pub use stopwatch::Stopwatch;
