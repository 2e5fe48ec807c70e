//=========================================================================
// Platform Subsystem
//
// Hosts the loop driver inside a Winit event loop.
//
// Architecture:
// ```text
//  Main Thread (single logical thread):
//  ┌───────────────────────────────────────────┐
//  │  Winit Event Loop                         │
//  │   ├─ resumed        → create window       │
//  │   │                   → driver.start()    │
//  │   ├─ window_event   → map_window_event    │
//  │   │                   → InputService      │
//  │   ├─ about_to_wait  → driver.tick()       │
//  │   │                   → request_redraw    │
//  │   │                   → WaitUntil(+fixed) │
//  │   └─ RedrawRequested→ driver.paint()      │
//  └───────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Tick on about_to_wait**: the periodic callback is the event loop
//   going idle; `WaitUntil` wakes it one fixed step later
// - **Paint on RedrawRequested**: only requested after a tick that ran,
//   so painting never outpaces simulation bookkeeping
// - **Focus = run state**: losing focus or suspending stops the driver,
//   regaining it restarts with a fresh timing baseline
// - **Fatal errors exit**: a failed startup or update is stored and
//   returned from `run` after the loop exits
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;

//=== External Crates =====================================================

use std::rc::Rc;
use std::time::{Duration, Instant};

use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::driver::{FrameStatus, LoopDriver};
use crate::core::error::EngineError;
use crate::core::game::Game;
use crate::core::input::InputService;
use crate::core::logger::Logger;
use crate::core::services::CancellationToken;
use event_mapper::map_window_event;

//=== PlatformError =======================================================

/// Event loop failures. These are fatal: without an event loop the
/// engine cannot run.
#[derive(Debug, Error)]
pub(crate) enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    /// Event loop execution error.
    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),
}

impl From<PlatformError> for EngineError {
    fn from(err: PlatformError) -> Self {
        EngineError::Platform(err.to_string())
    }
}

//=== WindowSettings ======================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

//=== Platform ============================================================

/// Window owner and callback bridge for one [`LoopDriver`].
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(..)`; no window yet
/// 2. **Execution**: `platform.run()` blocks in the Winit event loop
/// 3. **Shutdown**: close request → cancel loads, stop driver, exit;
///    the game (and its scene stack) is dropped with the platform
///
/// # Thread Safety
///
/// Not Send/Sync. Winit requires the main thread on macOS/iOS, and the
/// game's services are single-threaded.
pub(crate) struct Platform<G: Game> {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    driver: LoopDriver<G>,

    /// Shared with games through `Engine::input`.
    input: Rc<InputService>,

    settings: WindowSettings,

    /// Handed to the game's startup load. A `SceneGame` keeps it for the
    /// scene loads it starts later, so cancelling on close aborts those too.
    cancel: CancellationToken,

    /// First fatal error; returned from `run`.
    failure: Option<EngineError>,

    logger: Logger,
}

impl<G: Game> Platform<G> {
    //--- Construction -----------------------------------------------------

    /// Wraps `driver`; the window is created on the first `resumed`.
    pub fn new(
        driver: LoopDriver<G>,
        input: Rc<InputService>,
        settings: WindowSettings,
        logger: Logger,
    ) -> Self {
        logger.info(format_args!("Platform subsystem initialized"));
        Self {
            window: None,
            driver,
            input,
            settings,
            cancel: CancellationToken::new(),
            failure: None,
            logger,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes or a fatal error
    /// occurs.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), EngineError> {
        self.logger.debug(format_args!("Starting Winit event loop"));

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)?;

        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn start_driver(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(err) = pollster::block_on(self.driver.start(&self.cancel)) {
            self.fail(event_loop, err);
        }
    }

    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        match self.driver.tick() {
            Ok(Some(_)) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Ok(None) => {}
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn paint(&mut self) {
        let Some(window) = self.window.as_mut() else {
            return;
        };
        let size = window.inner_size();

        if let FrameStatus::Failed = self.driver.paint(size.width, size.height, window) {
            self.logger.trace(format_args!("Frame dropped after draw failure"));
        }
    }

    /// Records a fatal error, stops the loop, and asks Winit to exit.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: EngineError) {
        self.logger.error(format_args!("Fatal engine error: {}", err));
        self.driver.stop();
        self.cancel.cancel();
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        event_loop.exit();
    }

    fn next_wake(&self) -> ControlFlow {
        if self.driver.is_running() {
            let step = Duration::from_secs_f64(self.driver.fixed_delta());
            ControlFlow::WaitUntil(Instant::now() + step)
        } else {
            ControlFlow::Wait
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    /// The OS window, once created.
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl<G: Game> ApplicationHandler for Platform<G> {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window once, then (re)starts the driver.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = WindowAttributes::default()
                .with_title(self.settings.title.clone())
                .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));

            match event_loop.create_window(attrs) {
                Ok(window) => {
                    self.logger.info(format_args!(
                        "Window created: {}x{} @ {}x DPI",
                        window.inner_size().width,
                        window.inner_size().height,
                        window.scale_factor()
                    ));
                    self.window = Some(window);
                }
                Err(e) => {
                    let err = EngineError::Platform(format!("window creation failed: {e}"));
                    self.fail(event_loop, err);
                    return;
                }
            }
        }

        self.start_driver(event_loop);
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.logger.debug(format_args!("Application suspended"));
        self.driver.stop();
    }

    /// The periodic tick: runs owed fixed steps and schedules the next wake.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.tick(event_loop);
        event_loop.set_control_flow(self.next_wake());
    }

    /// Handles per-window events.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let Some(input) = map_window_event(&event) {
            self.input.apply(input);
        }

        match event {
            WindowEvent::CloseRequested => {
                self.logger.info(format_args!("Window close requested"));
                self.cancel.cancel();
                self.driver.stop();
                event_loop.exit();
            }

            WindowEvent::Focused(false) => {
                self.logger.debug(format_args!("Focus lost, pausing loop"));
                self.driver.stop();
            }

            WindowEvent::Focused(true) => {
                if self.window.is_some() && !self.driver.is_running() {
                    self.logger.debug(format_args!("Focus regained, resuming loop"));
                    self.start_driver(event_loop);
                }
            }

            WindowEvent::Resized(_) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.paint(),

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
