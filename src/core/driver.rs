//=========================================================================
// Loop Driver
//=========================================================================
//
// Bridges the host's periodic tick and paint callbacks to the
// accumulator and the game.
//
// Flow (per host callback):
//   tick()  → game.pump() → stopwatch.lap() → accumulator.advance()
//           → N × (time.advance(fixed, prev_alpha) → game.update(time))
//           → store alpha → host requests redraw
//   paint() → DrawSurface(alpha) → game.draw() → fps.on_frame()
//
// Lifecycle:
//   Idle ─start()→ Running ─stop()→ Stopped ─start()→ Running
//          └ initialize + load run on the first start only
//
// A failed update stops the loop and surfaces to the host. A failed
// draw is logged and reported per frame; the loop keeps going.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::time::Instant;

//=== Internal Dependencies ===============================================

use crate::core::error::EngineError;
use crate::core::game::Game;
use crate::core::logger::Logger;
use crate::core::services::CancellationToken;
use crate::core::surface::DrawSurface;
use crate::core::time::{FixedStepAccumulator, FpsCounter, SimTime, Stopwatch};

//=== TickOutcome =========================================================

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Fixed updates run during this tick.
    pub steps: u32,

    /// Interpolation alpha for the next paint.
    pub alpha: f64,

    /// The per-tick step bound was hit with time still pending.
    pub saturated: bool,
}

//=== FrameStatus =========================================================

/// Outcome of one paint callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// The game drew the frame.
    Presented,

    /// The game's draw failed; the error was logged.
    Failed,

    /// Nothing to draw yet: the loop was never started.
    Skipped,
}

//=== LoopDriver ==========================================================

/// Owns the game and the fixed-step clock for one running session.
pub struct LoopDriver<G: Game> {
    game: G,
    accumulator: FixedStepAccumulator,
    time: SimTime,
    stopwatch: Stopwatch,
    fps: FpsCounter,
    last_paint: Option<Instant>,
    logger: Logger,
    running: bool,
    started: bool,
    /// The previous tick hit the step bound.
    saturated: bool,
}

impl<G: Game> LoopDriver<G> {
    /// Creates an idle driver stepping at `steps_per_second`.
    pub fn new(game: G, steps_per_second: f64, logger: Logger) -> Result<Self, EngineError> {
        Ok(Self {
            game,
            accumulator: FixedStepAccumulator::new(steps_per_second)?,
            time: SimTime::new(),
            stopwatch: Stopwatch::new(),
            fps: FpsCounter::default(),
            last_paint: None,
            logger,
            running: false,
            started: false,
            saturated: false,
        })
    }

    //--- Lifecycle --------------------------------------------------------

    /// Starts the loop, measuring from now.
    pub async fn start(&mut self, cancel: &CancellationToken) -> Result<(), EngineError> {
        self.start_at(Instant::now(), cancel).await
    }

    /// Starts the loop with `now` as the timing baseline.
    ///
    /// The first successful start runs the game's `initialize` and `load`.
    /// Restarts after [`LoopDriver::stop`] only reset the clock.
    pub async fn start_at(
        &mut self,
        now: Instant,
        cancel: &CancellationToken,
    ) -> Result<(), EngineError> {
        if self.running {
            return Ok(());
        }

        if !self.started {
            self.logger.debug(format_args!("Initializing and loading game"));
            if let Err(err) = self.bootstrap(cancel).await {
                self.logger.error(format_args!("Game startup failed: {:#}", err));
                return Err(EngineError::Startup(err));
            }
            self.started = true;
        }

        self.accumulator.reset();
        self.stopwatch.start(now);
        self.last_paint = None;
        self.saturated = false;
        self.running = true;

        self.logger.info(format_args!(
            "Loop started at {:.1} steps/s",
            1.0 / self.accumulator.fixed_delta()
        ));
        Ok(())
    }

    async fn bootstrap(&mut self, cancel: &CancellationToken) -> anyhow::Result<()> {
        self.game.initialize()?;
        self.game.load(cancel).await
    }

    /// Halts ticking. Idempotent.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.stopwatch.stop();
            self.logger.info(format_args!("Loop stopped"));
        }
    }

    //--- Tick -------------------------------------------------------------

    /// Runs the fixed updates owed since the previous tick.
    pub fn tick(&mut self) -> Result<Option<TickOutcome>, EngineError> {
        self.tick_at(Instant::now())
    }

    /// Like [`LoopDriver::tick`], measuring elapsed time up to `now`.
    ///
    /// Returns `None` while the loop is not running. A pump or update
    /// failure stops the loop and is returned as [`EngineError::Update`].
    pub fn tick_at(&mut self, now: Instant) -> Result<Option<TickOutcome>, EngineError> {
        if !self.running {
            return Ok(None);
        }

        if let Err(err) = self.game.pump() {
            self.logger.error(format_args!("Background work failed: {:#}", err));
            self.stop();
            return Err(EngineError::Update(err));
        }

        let elapsed = self.stopwatch.lap(now).as_secs_f64();
        let extracted = self.accumulator.advance(elapsed)?;
        let fixed = self.accumulator.fixed_delta();
        let previous_alpha = self.time.alpha();

        // Warn when a stall starts; the catch-up ticks after it log at debug.
        if extracted.saturated && !self.saturated {
            self.logger.warn(format_args!(
                "Fixed-step bound reached after {:.3}s, {} steps still pending",
                elapsed,
                self.accumulator.backlog_steps()
            ));
        } else if extracted.saturated {
            self.logger.debug(format_args!(
                "Still catching up, {} steps pending",
                self.accumulator.backlog_steps()
            ));
        }
        self.saturated = extracted.saturated;

        for _ in 0..extracted.steps {
            self.time.advance(fixed, previous_alpha)?;
            if let Err(err) = self.game.update(&self.time) {
                self.logger.error(format_args!("Fixed update failed: {:#}", err));
                self.stop();
                return Err(EngineError::Update(err));
            }
        }

        self.time.set_alpha(extracted.alpha);
        self.logger.trace(format_args!(
            "Tick: {} steps, alpha {:.3}",
            extracted.steps, extracted.alpha
        ));

        Ok(Some(TickOutcome {
            steps: extracted.steps,
            alpha: extracted.alpha,
            saturated: extracted.saturated,
        }))
    }

    //--- Paint ------------------------------------------------------------

    /// Draws one frame onto the host's render target.
    pub fn paint(&mut self, width: u32, height: u32, handle: &mut dyn Any) -> FrameStatus {
        self.paint_at(Instant::now(), width, height, handle)
    }

    /// Like [`LoopDriver::paint`], timing the frame at `now`.
    ///
    /// Draw failures are logged and reported as [`FrameStatus::Failed`];
    /// they never stop the loop.
    pub fn paint_at(
        &mut self,
        now: Instant,
        width: u32,
        height: u32,
        handle: &mut dyn Any,
    ) -> FrameStatus {
        if !self.started {
            return FrameStatus::Skipped;
        }

        let mut surface = DrawSurface::new(width, height, handle).with_alpha(self.time.alpha());
        if let Err(err) = self.game.draw(&mut surface) {
            self.logger.error(format_args!("Draw failed: {:#}", err));
            return FrameStatus::Failed;
        }

        if let Some(last) = self.last_paint.replace(now) {
            self.fps.on_frame(now.saturating_duration_since(last).as_secs_f64());
        }
        FrameStatus::Presented
    }

    //--- Accessors --------------------------------------------------------

    /// True between a successful start and the next stop.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True once `initialize` and `load` have succeeded.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Alpha the next paint will receive.
    pub fn interpolation_alpha(&self) -> f64 {
        self.time.alpha()
    }

    /// Simulation time as of the last fixed step.
    pub fn time(&self) -> &SimTime {
        &self.time
    }

    /// Seconds per fixed step.
    pub fn fixed_delta(&self) -> f64 {
        self.accumulator.fixed_delta()
    }

    /// Smoothed frames per second over presented frames.
    pub fn fps(&self) -> f64 {
        self.fps.fps()
    }

    /// The driven game.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Mutable access to the driven game.
    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use async_trait::async_trait;
    use log::Level;
    use pollster::block_on;
    use std::time::Duration;

    #[derive(Default)]
    struct CountingGame {
        initializes: u32,
        loads: u32,
        updates: Vec<SimTime>,
        drawn_alphas: Vec<f64>,
        fail_load: bool,
        fail_update_at: Option<usize>,
        fail_draw: bool,
        pumps: u32,
        fail_pump: bool,
    }

    #[async_trait(?Send)]
    impl Game for CountingGame {
        fn initialize(&mut self) -> anyhow::Result<()> {
            self.initializes += 1;
            Ok(())
        }

        async fn load(&mut self, cancel: &CancellationToken) -> anyhow::Result<()> {
            self.loads += 1;
            cancel.check()?;
            if self.fail_load {
                bail!("assets missing");
            }
            Ok(())
        }

        fn pump(&mut self) -> anyhow::Result<()> {
            self.pumps += 1;
            if self.fail_pump {
                bail!("loader crashed");
            }
            Ok(())
        }

        fn update(&mut self, time: &SimTime) -> anyhow::Result<()> {
            if self.fail_update_at == Some(self.updates.len()) {
                bail!("simulation diverged");
            }
            self.updates.push(*time);
            Ok(())
        }

        fn draw(&mut self, surface: &mut DrawSurface<'_>) -> anyhow::Result<()> {
            if self.fail_draw {
                bail!("device lost");
            }
            self.drawn_alphas.push(surface.interpolation_alpha());
            Ok(())
        }
    }

    fn started(game: CountingGame, at: Instant) -> LoopDriver<CountingGame> {
        let mut driver = LoopDriver::new(game, 60.0, Logger::null()).unwrap();
        block_on(driver.start_at(at, &CancellationToken::new())).unwrap();
        driver
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    //--- Lifecycle --------------------------------------------------------

    #[test]
    fn invalid_rate_is_rejected() {
        assert!(LoopDriver::new(CountingGame::default(), 0.0, Logger::null()).is_err());
    }

    #[test]
    fn tick_before_start_does_nothing() {
        let mut driver = LoopDriver::new(CountingGame::default(), 60.0, Logger::null()).unwrap();
        assert_eq!(driver.tick().unwrap(), None);
        assert!(driver.game().updates.is_empty());
    }

    #[test]
    fn paint_before_start_is_skipped() {
        let mut driver = LoopDriver::new(CountingGame::default(), 60.0, Logger::null()).unwrap();
        let mut handle = ();
        assert_eq!(driver.paint(10, 10, &mut handle), FrameStatus::Skipped);
    }

    #[test]
    fn restart_does_not_reload() {
        let t0 = Instant::now();
        let mut driver = started(CountingGame::default(), t0);
        driver.stop();
        driver.stop();
        assert!(!driver.is_running());

        block_on(driver.start_at(t0 + ms(500), &CancellationToken::new())).unwrap();

        assert!(driver.is_running());
        assert_eq!(driver.game().initializes, 1);
        assert_eq!(driver.game().loads, 1);
    }

    #[test]
    fn restart_measures_from_fresh_baseline() {
        let t0 = Instant::now();
        let mut driver = started(CountingGame::default(), t0);
        driver.stop();

        let t1 = t0 + Duration::from_secs(30);
        block_on(driver.start_at(t1, &CancellationToken::new())).unwrap();
        let outcome = driver.tick_at(t1 + ms(20)).unwrap().unwrap();

        assert_eq!(outcome.steps, 1);
        assert!(!outcome.saturated);
    }

    #[test]
    fn failed_load_is_a_startup_error_and_retried() {
        let (logger, log) = Logger::memory("driver");
        let game = CountingGame {
            fail_load: true,
            ..Default::default()
        };
        let mut driver = LoopDriver::new(game, 60.0, logger).unwrap();

        let err = block_on(driver.start(&CancellationToken::new())).unwrap_err();
        assert!(matches!(err, EngineError::Startup(_)));
        assert!(!driver.is_running());
        assert!(log.contains(Level::Error, "Game startup failed"));

        driver.game_mut().fail_load = false;
        block_on(driver.start(&CancellationToken::new())).unwrap();
        assert!(driver.is_running());
        assert_eq!(driver.game().initializes, 2);
        assert_eq!(driver.game().loads, 2);
    }

    #[test]
    fn cancelled_start_fails() {
        let mut driver = LoopDriver::new(CountingGame::default(), 60.0, Logger::null()).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = block_on(driver.start(&cancel)).unwrap_err();

        assert!(matches!(err, EngineError::Startup(_)));
        assert!(!driver.is_started());
    }

    //--- Ticking ----------------------------------------------------------

    #[test]
    fn tick_runs_whole_steps_and_keeps_fraction() {
        let t0 = Instant::now();
        let mut driver = started(CountingGame::default(), t0);

        let outcome = driver.tick_at(t0 + ms(40)).unwrap().unwrap();

        assert_eq!(outcome.steps, 2);
        assert!(outcome.alpha > 0.3 && outcome.alpha < 0.5, "alpha {}", outcome.alpha);
        assert_eq!(driver.interpolation_alpha(), outcome.alpha);

        let updates = &driver.game().updates;
        assert_eq!(updates.len(), 2);
        assert!((updates[1].total_seconds() - 2.0 / 60.0).abs() < 1e-9);
        assert!((updates[0].delta_seconds() - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn updates_see_previous_tick_alpha() {
        let t0 = Instant::now();
        let mut driver = started(CountingGame::default(), t0);

        let first = driver.tick_at(t0 + ms(25)).unwrap().unwrap();
        driver.tick_at(t0 + ms(50)).unwrap();

        let last = driver.game().updates.last().copied().unwrap();
        assert!((last.alpha() - first.alpha).abs() < 1e-12);
    }

    #[test]
    fn long_stall_is_bounded_per_tick() {
        let t0 = Instant::now();
        let (logger, log) = Logger::memory("driver");
        let mut driver = LoopDriver::new(CountingGame::default(), 60.0, logger).unwrap();
        block_on(driver.start_at(t0, &CancellationToken::new())).unwrap();

        let outcome = driver.tick_at(t0 + Duration::from_secs(10)).unwrap().unwrap();

        assert_eq!(outcome.steps, 5);
        assert!(outcome.saturated);
        assert_eq!(outcome.alpha, 1.0);
        assert!(log.contains(Level::Warn, "Fixed-step bound reached"));
    }

    #[test]
    fn sustained_catch_up_warns_once() {
        let t0 = Instant::now();
        let (logger, log) = Logger::memory("driver");
        let mut driver = LoopDriver::new(CountingGame::default(), 60.0, logger).unwrap();
        block_on(driver.start_at(t0, &CancellationToken::new())).unwrap();

        let stalled = t0 + Duration::from_secs(10);
        for frame in 0..4 {
            let outcome = driver.tick_at(stalled + ms(frame)).unwrap().unwrap();
            assert!(outcome.saturated);
        }

        assert_eq!(log.count(Level::Warn), 1);
        assert!(log.contains(Level::Debug, "Still catching up"));
    }

    #[test]
    fn warning_returns_after_catching_up() {
        let t0 = Instant::now();
        let (logger, log) = Logger::memory("driver");
        let mut driver = LoopDriver::new(CountingGame::default(), 60.0, logger).unwrap();
        block_on(driver.start_at(t0, &CancellationToken::new())).unwrap();

        // 110 ms owes six steps: one saturated tick, then the backlog drains.
        driver.tick_at(t0 + ms(110)).unwrap();
        let drained = driver.tick_at(t0 + ms(111)).unwrap().unwrap();
        assert!(!drained.saturated);

        driver.tick_at(t0 + ms(311)).unwrap();

        assert_eq!(log.count(Level::Warn), 2);
    }

    #[test]
    fn tick_pumps_once_even_without_steps() {
        let t0 = Instant::now();
        let mut driver = started(CountingGame::default(), t0);

        let outcome = driver.tick_at(t0 + ms(1)).unwrap().unwrap();

        assert_eq!(outcome.steps, 0);
        assert_eq!(driver.game().pumps, 1);
    }

    #[test]
    fn pump_failure_stops_the_loop() {
        let t0 = Instant::now();
        let game = CountingGame {
            fail_pump: true,
            ..Default::default()
        };
        let mut driver = started(game, t0);

        let err = driver.tick_at(t0 + ms(20)).unwrap_err();

        assert!(matches!(err, EngineError::Update(_)));
        assert!(!driver.is_running());
        assert!(driver.game().updates.is_empty());
    }

    #[test]
    fn update_failure_stops_the_loop() {
        let t0 = Instant::now();
        let game = CountingGame {
            fail_update_at: Some(1),
            ..Default::default()
        };
        let mut driver = started(game, t0);

        let err = driver.tick_at(t0 + ms(50)).unwrap_err();

        assert!(matches!(err, EngineError::Update(_)));
        assert!(!driver.is_running());
        assert_eq!(driver.game().updates.len(), 1);
        assert_eq!(driver.tick_at(t0 + ms(100)).unwrap(), None);
    }

    //--- Painting ---------------------------------------------------------

    #[test]
    fn paint_supplies_current_alpha() {
        let t0 = Instant::now();
        let mut driver = started(CountingGame::default(), t0);
        let outcome = driver.tick_at(t0 + ms(25)).unwrap().unwrap();

        let mut handle = ();
        assert_eq!(driver.paint_at(t0 + ms(26), 640, 480, &mut handle), FrameStatus::Presented);

        assert_eq!(driver.game().drawn_alphas, vec![outcome.alpha]);
    }

    #[test]
    fn draw_failure_is_reported_not_fatal() {
        let t0 = Instant::now();
        let (logger, log) = Logger::memory("driver");
        let game = CountingGame {
            fail_draw: true,
            ..Default::default()
        };
        let mut driver = LoopDriver::new(game, 60.0, logger).unwrap();
        block_on(driver.start_at(t0, &CancellationToken::new())).unwrap();

        let mut handle = ();
        assert_eq!(driver.paint_at(t0, 1, 1, &mut handle), FrameStatus::Failed);
        assert!(driver.is_running());
        assert!(log.contains(Level::Error, "Draw failed"));
    }

    #[test]
    fn fps_tracks_presented_frames() {
        let t0 = Instant::now();
        let mut driver = started(CountingGame::default(), t0);
        let mut handle = ();

        for frame in 0..4 {
            driver.paint_at(t0 + ms(20 * frame), 1, 1, &mut handle);
        }

        assert!((driver.fps() - 50.0).abs() < 1e-6, "fps {}", driver.fps());
    }
}
