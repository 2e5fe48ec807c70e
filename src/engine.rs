//=========================================================================
// Stepwise Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(game)──>  [Event Loop]
//         │                          │
//         ├─ with_steps_per_second() ├─ input()      shared InputService
//         ├─ with_command_capacity() ├─ scene_game() SceneGame wiring
//         ├─ with_window_title()     └─ run()        blocks until exit
//         ├─ with_window_size()
//         └─ with_logger()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::driver::LoopDriver;
use crate::core::error::EngineError;
use crate::core::game::{Game, SceneGame};
use crate::core::input::InputService;
use crate::core::logger::Logger;
use crate::core::scene::{Scene, DEFAULT_COMMAND_CAPACITY};
use crate::core::services::{AudioService, ContentLoader, Services};
use crate::core::time::DEFAULT_STEPS_PER_SECOND;
use crate::platform::{Platform, WindowSettings};

//=== EngineConfig ========================================================

/// Settings captured by [`EngineBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub steps_per_second: f64,
    pub command_capacity: usize,
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            steps_per_second: DEFAULT_STEPS_PER_SECOND,
            command_capacity: DEFAULT_COMMAND_CAPACITY,
            window_title: "Stepwise Engine".to_owned(),
            window_width: 800,
            window_height: 600,
        }
    }
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Steps per second**: 60.0 (fixed simulation rate)
/// - **Command capacity**: 16 scene commands per stack
/// - **Window**: "Stepwise Engine", 800×600
///
/// # Examples
///
/// Simple usage with defaults:
/// ```no_run
/// # use stepwise_engine::prelude::*;
/// # struct MyGame;
/// # impl Game for MyGame {
/// #     fn update(&mut self, _: &SimTime) -> anyhow::Result<()> { Ok(()) }
/// #     fn draw(&mut self, _: &mut DrawSurface<'_>) -> anyhow::Result<()> { Ok(()) }
/// # }
/// EngineBuilder::new().build().run(MyGame)?;
/// # Ok::<(), EngineError>(())
/// ```
///
/// Advanced configuration:
/// ```no_run
/// # use stepwise_engine::prelude::*;
/// # struct MyGame;
/// # impl Game for MyGame {
/// #     fn update(&mut self, _: &SimTime) -> anyhow::Result<()> { Ok(()) }
/// #     fn draw(&mut self, _: &mut DrawSurface<'_>) -> anyhow::Result<()> { Ok(()) }
/// # }
/// EngineBuilder::new()
///     .with_steps_per_second(120.0)   // Finer simulation
///     .with_window_title("Asteroids")
///     .with_window_size(1280, 720)
///     .build()
///     .run(MyGame)?;
/// # Ok::<(), EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    config: EngineConfig,
    logger: Logger,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            logger: Logger::default(),
        }
    }

    /// Sets the fixed simulation rate.
    ///
    /// Each fixed update advances simulated time by `1 / steps_per_second`
    /// regardless of the display's refresh rate.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `steps_per_second` is not a positive finite number.
    pub fn with_steps_per_second(mut self, steps_per_second: f64) -> Self {
        assert!(
            steps_per_second.is_finite() && steps_per_second > 0.0,
            "Steps per second must be positive, got {}",
            steps_per_second
        );
        self.config.steps_per_second = steps_per_second;
        self
    }

    /// Sets the scene command queue capacity used by [`Engine::scene_game`].
    ///
    /// Default: 16
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_command_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Command capacity must be positive");
        self.config.command_capacity = capacity;
        self
    }

    /// Sets the window title.
    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.config.window_title = title.into();
        self
    }

    /// Sets the initial logical window size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is 0.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero, got {}x{}", width, height);
        self.config.window_width = width;
        self.config.window_height = height;
        self
    }

    /// Routes engine diagnostics through `logger` instead of the `log`
    /// facade under the `stepwise` target.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        self.logger.info(format_args!(
            "Building engine (steps/s: {}, commands: {})",
            self.config.steps_per_second, self.config.command_capacity
        ));

        Engine {
            input: Rc::new(InputService::new(self.logger.child("input"))),
            config: self.config,
            logger: self.logger,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Stepwise Engine runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   └─► Platform (Winit Event Loop)
///         ├─► InputService    ← window input events
///         └─► LoopDriver      ← tick / paint callbacks
///               └─► Game      (often a SceneGame → SceneStack)
/// ```
///
/// # Examples
///
/// ```no_run
/// # use stepwise_engine::prelude::*;
/// # use std::rc::Rc;
/// # fn title() -> Box<dyn Scene> { unimplemented!() }
/// # fn content() -> Rc<dyn ContentLoader> { unimplemented!() }
/// # fn audio() -> Rc<dyn AudioService> { unimplemented!() }
/// let engine = EngineBuilder::new().build();
/// let game = engine.scene_game(content(), audio(), title());
/// engine.run(game)?;
/// # Ok::<(), EngineError>(())
/// ```
pub struct Engine {
    config: EngineConfig,
    input: Rc<InputService>,
    logger: Logger,
}

impl Engine {
    //--- Accessors --------------------------------------------------------

    /// The configuration this engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The input service fed by the window. Share it in a game's
    /// [`Services`] so scenes see live input.
    pub fn input(&self) -> Rc<InputService> {
        Rc::clone(&self.input)
    }

    //--- Wiring -----------------------------------------------------------

    /// Builds [`Services`] around this engine's input service.
    pub fn services(
        &self,
        content: Rc<dyn ContentLoader>,
        audio: Rc<dyn AudioService>,
    ) -> Services {
        Services::new(content, audio, self.input())
    }

    /// Builds a [`SceneGame`] starting at `initial`, wired to this engine's
    /// input and command capacity.
    pub fn scene_game(
        &self,
        content: Rc<dyn ContentLoader>,
        audio: Rc<dyn AudioService>,
        initial: Box<dyn Scene>,
    ) -> SceneGame {
        SceneGame::with_command_capacity(
            self.services(content, audio),
            initial,
            self.config.command_capacity,
            self.logger.child("game"),
        )
    }

    //--- Execution --------------------------------------------------------

    /// Runs `game` in a window and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Wraps `game` in a [`LoopDriver`] at the configured rate
    /// 2. Runs the Winit event loop (blocks here)
    /// 3. On window close: pending loads are cancelled, the loop stops,
    ///    and the game is dropped (disposing any scene stack it owns)
    ///
    /// # Errors
    ///
    /// Returns the first fatal error: a failed startup
    /// ([`EngineError::Startup`]), a failed fixed update
    /// ([`EngineError::Update`]), or a platform failure.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread on platforms where Winit
    /// requires it.
    pub fn run<G: Game>(self, game: G) -> Result<(), EngineError> {
        self.logger.info(format_args!(
            "Starting engine runtime (steps/s: {})",
            self.config.steps_per_second
        ));

        let driver = LoopDriver::new(game, self.config.steps_per_second, self.logger.child("loop"))?;
        let settings = WindowSettings {
            title: self.config.window_title.clone(),
            width: self.config.window_width,
            height: self.config.window_height,
        };
        let platform = Platform::new(driver, self.input(), settings, self.logger.child("platform"));

        let result = platform.run();
        match &result {
            Ok(()) => self.logger.info(format_args!("Engine shutdown complete")),
            Err(err) => self.logger.error(format_args!("Engine stopped with error: {}", err)),
        }
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
