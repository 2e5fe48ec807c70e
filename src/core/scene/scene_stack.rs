//=========================================================================
// Scene Stack
//=========================================================================
//
// Owns the active scenes and mediates their lifecycle against the shared
// services.
//
// Stack discipline:
//   push(A); push(B); pop()  → current is A
//   replace(B)               → pop() then push(B), not atomic
//   dispose()                → pops everything, top first
//
// Failure policy:
//   push without services    → ServicesNotAttached, stack unchanged
//   initialize/load failure  → logged, returned, retryable
//   update/draw failure      → logged, returned
//   teardown failure         → collected into a TeardownReport, logged
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::teardown::{tear_down, TeardownReport};
use super::transition_queue::{CommandQueue, SceneCommand, SceneCommands, DEFAULT_COMMAND_CAPACITY};
use super::{Scene, SceneContext};
use crate::core::error::EngineError;
use crate::core::logger::Logger;
use crate::core::services::{CancellationToken, Services};
use crate::core::surface::DrawSurface;
use crate::core::time::SimTime;

/// Upper bound on commands applied by one `process_commands` call.
///
/// Scenes that queue new commands from `unload` could otherwise keep the
/// drain loop alive forever; anything past the bound waits for the next
/// tick.
const MAX_COMMANDS_PER_TICK: usize = 64;

//=== CommandOutcome ======================================================

/// Result of draining the command queue once.
#[derive(Debug, Default)]
pub struct CommandOutcome {
    /// Number of commands applied.
    pub applied: usize,

    /// Teardowns triggered by pop, replace and clear commands.
    pub teardowns: Vec<TeardownReport>,
}

//=== SceneStack ==========================================================

/// Last-in-first-out collection of scenes where only the top one runs.
///
/// The stack exclusively owns every scene it holds. Removing a scene
/// always tears it down (unload, then drop) before the removal completes.
///
/// # Example
///
/// ```rust,ignore
/// let mut stack = SceneStack::new(Logger::new("game::scene"));
/// stack.attach_services(services);
///
/// stack.push(Box::new(TitleScene::new()?))?;
/// pollster::block_on(stack.ensure_loaded(&CancellationToken::new()))?;
/// stack.update(&time)?;
/// ```
pub struct SceneStack {
    scenes: Vec<Box<dyn Scene>>,
    services: Option<Services>,
    commands: CommandQueue,
    logger: Logger,
}

impl SceneStack {
    //--- Construction -----------------------------------------------------

    /// Creates an empty stack with the default command capacity.
    pub fn new(logger: Logger) -> Self {
        Self::with_command_capacity(DEFAULT_COMMAND_CAPACITY, logger)
    }

    /// Creates an empty stack whose command queue holds `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn with_command_capacity(capacity: usize, logger: Logger) -> Self {
        assert!(capacity > 0, "Command capacity must be greater than 0");

        Self {
            scenes: Vec::new(),
            services: None,
            commands: CommandQueue::new(capacity),
            logger,
        }
    }

    //--- Services ---------------------------------------------------------

    /// Sets the services injected into every scene pushed from now on.
    pub fn attach_services(&mut self, services: Services) {
        self.services = Some(services);
        self.logger.debug(format_args!("Services attached to scene stack"));
    }

    /// True once `attach_services` has run.
    pub fn has_services(&self) -> bool {
        self.services.is_some()
    }

    /// The attached services, if any.
    pub fn services(&self) -> Option<&Services> {
        self.services.as_ref()
    }

    //--- Stack Operations -------------------------------------------------

    /// Injects the services into `scene` and makes it current.
    ///
    /// Fails with [`EngineError::ServicesNotAttached`] before touching the
    /// stack if no services have been attached. The rejected scene is
    /// dropped without teardown since it never became active.
    pub fn push(&mut self, scene: Box<dyn Scene>) -> Result<(), EngineError> {
        let Some(services) = self.services.clone() else {
            self.logger.error(format_args!(
                "Cannot push scene {}: services not attached",
                scene.name()
            ));
            return Err(EngineError::ServicesNotAttached);
        };

        let mut scene = scene;
        scene.attach(SceneContext {
            services,
            commands: self.commands(),
        });

        self.logger.info(format_args!("Scene pushed: {}", scene.name()));
        self.scenes.push(scene);
        Ok(())
    }

    /// Removes the current scene and tears it down.
    ///
    /// Returns `None` on an empty stack. Teardown failures are in the
    /// report and never propagate.
    pub fn pop(&mut self) -> Option<TeardownReport> {
        let scene = self.scenes.pop()?;
        self.logger.info(format_args!("Scene popped: {}", scene.name()));
        Some(tear_down(scene, &self.logger))
    }

    /// Pops the current scene, then pushes `scene`.
    ///
    /// Not atomic: the old scene is torn down before the push is
    /// attempted, so a failed push leaves the old scene gone and the error
    /// is returned.
    pub fn replace(&mut self, scene: Box<dyn Scene>) -> Result<Option<TeardownReport>, EngineError> {
        let report = self.pop();
        self.push(scene)?;
        Ok(report)
    }

    /// Pops every scene, top first, tearing each one down.
    pub fn dispose(&mut self) -> Vec<TeardownReport> {
        let mut reports = Vec::with_capacity(self.scenes.len());
        while let Some(report) = self.pop() {
            reports.push(report);
        }
        reports
    }

    //--- Loading ----------------------------------------------------------

    /// Initializes and loads the current scene unless it is already loaded.
    ///
    /// The only place scene loading is triggered. Safe to call repeatedly:
    /// a loaded scene makes this a no-op, and a failed attempt is retried
    /// from `initialize` on the next call.
    pub async fn ensure_loaded(&mut self, cancel: &CancellationToken) -> Result<(), EngineError> {
        let Some(scene) = self.scenes.last_mut() else {
            return Ok(());
        };
        if scene.is_loaded() {
            return Ok(());
        }

        let name = scene.name().to_owned();

        if cancel.is_cancelled() {
            self.logger.warn(format_args!("Loading of scene {} cancelled before start", name));
            return Err(EngineError::Cancelled { scene: name });
        }

        self.logger.debug(format_args!("Initializing scene {}", name));
        if let Err(source) = scene.initialize() {
            self.logger.error(format_args!("Failed to initialize scene {}: {:#}", name, source));
            return Err(EngineError::SceneInitialize { scene: name, source });
        }

        self.logger.debug(format_args!("Loading scene {}", name));
        match scene.load(cancel).await {
            Ok(()) => {
                self.logger.info(format_args!("Scene loaded: {}", name));
                Ok(())
            }
            Err(_) if cancel.is_cancelled() => {
                self.logger.warn(format_args!("Loading of scene {} was cancelled", name));
                Err(EngineError::Cancelled { scene: name })
            }
            Err(source) => {
                self.logger.error(format_args!("Failed to load scene {}: {:#}", name, source));
                Err(EngineError::SceneLoad { scene: name, source })
            }
        }
    }

    //--- Update & Draw ----------------------------------------------------

    /// Runs one fixed update on the current scene.
    ///
    /// No-op when the stack is empty or the current scene is not loaded.
    pub fn update(&mut self, time: &SimTime) -> Result<(), EngineError> {
        let Some(scene) = self.scenes.last_mut() else {
            return Ok(());
        };
        if !scene.is_loaded() {
            return Ok(());
        }

        scene.update(time).map_err(|source| {
            let scene = scene.name().to_owned();
            self.logger.error(format_args!("Update failed in scene {}: {:#}", scene, source));
            EngineError::SceneUpdate { scene, source }
        })
    }

    /// Draws the current scene.
    ///
    /// No-op when the stack is empty or the current scene is not loaded.
    pub fn draw(&mut self, surface: &mut DrawSurface<'_>) -> Result<(), EngineError> {
        let Some(scene) = self.scenes.last_mut() else {
            return Ok(());
        };
        if !scene.is_loaded() {
            return Ok(());
        }

        scene.draw(surface).map_err(|source| {
            let scene = scene.name().to_owned();
            self.logger.error(format_args!("Draw failed in scene {}: {:#}", scene, source));
            EngineError::SceneDraw { scene, source }
        })
    }

    //--- Commands ---------------------------------------------------------

    /// Returns a sender handle for queueing transitions.
    pub fn commands(&self) -> SceneCommands {
        self.commands.handle(self.logger.clone())
    }

    /// Number of commands waiting to be applied.
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Applies queued commands in FIFO order.
    ///
    /// Call once per tick, before updating. Stops at the first failing
    /// push; later commands stay queued for the next call.
    pub fn process_commands(&mut self) -> Result<CommandOutcome, EngineError> {
        let mut outcome = CommandOutcome::default();

        while outcome.applied < MAX_COMMANDS_PER_TICK {
            let Some(command) = self.commands.try_next() else {
                break;
            };
            self.logger.debug(format_args!("Applying scene command {:?}", command));

            match command {
                SceneCommand::Push(scene) => self.push(scene)?,
                SceneCommand::Pop => outcome.teardowns.extend(self.pop()),
                SceneCommand::Replace(scene) => {
                    let report = self.pop();
                    outcome.teardowns.extend(report);
                    self.push(scene)?;
                }
                SceneCommand::Clear => outcome.teardowns.extend(self.dispose()),
            }
            outcome.applied += 1;
        }

        if outcome.applied == MAX_COMMANDS_PER_TICK && self.commands.len() > 0 {
            self.logger.warn(format_args!(
                "Scene command limit reached, {} deferred to next tick",
                self.commands.len()
            ));
        }

        Ok(outcome)
    }

    //--- Queries ----------------------------------------------------------

    /// The top scene.
    pub fn current(&self) -> Option<&dyn Scene> {
        self.scenes.last().map(|s| s.as_ref())
    }

    /// Mutable access to the top scene.
    pub fn current_mut(&mut self) -> Option<&mut (dyn Scene + 'static)> {
        self.scenes.last_mut().map(|s| s.as_mut())
    }

    /// Name of the top scene.
    pub fn current_name(&self) -> Option<&str> {
        self.current().map(|s| s.name())
    }

    /// True when there is a current scene and it has finished loading.
    pub fn is_current_loaded(&self) -> bool {
        self.current().is_some_and(|s| s.is_loaded())
    }

    /// Number of scenes on the stack.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// True when no scene is on the stack.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Scene names from bottom to top.
    pub fn names(&self) -> Vec<&str> {
        self.scenes.iter().map(|s| s.name()).collect()
    }
}

impl Drop for SceneStack {
    fn drop(&mut self) {
        if !self.scenes.is_empty() {
            self.logger.debug(format_args!("Disposing {} remaining scenes", self.scenes.len()));
            self.dispose();
        }
    }
}

impl fmt::Debug for SceneStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneStack")
            .field("scenes", &self.names())
            .field("has_services", &self.has_services())
            .field("pending_commands", &self.commands.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
