//=========================================================================
// Game
//=========================================================================
//
// Top-level simulation and draw entry points driven by the loop.
//
// Architecture:
//   LoopDriver ──initialize/load──> Game
//              ──pump────────────>  │   once per tick, never waits
//              ──update × N──────>  │
//              ──draw────────────>  │
//
//   SceneGame: Game backed by a SceneStack
//     pump   → poll the in-flight scene load, if any
//     update → pump → process_commands → start load (if needed) → stack.update
//     draw   → stack.draw
//
// Scene loads started mid-run own the stack until they finish. Until
// then update and draw are no-ops and queued transitions wait.
//
//=========================================================================

//=== External Dependencies ===============================================

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use futures::FutureExt;

//=== Internal Dependencies ===============================================

use crate::core::error::EngineError;
use crate::core::logger::Logger;
use crate::core::scene::{Scene, SceneCommands, SceneStack};
use crate::core::services::{CancellationToken, Services};
use crate::core::surface::DrawSurface;
use crate::core::time::SimTime;

//=== Game Trait ==========================================================

/// The consumer's top-level game, driven by a [`LoopDriver`](crate::core::driver::LoopDriver).
#[async_trait(?Send)]
pub trait Game {
    /// Synchronous setup, run once before the first load.
    fn initialize(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Asynchronous resource acquisition, awaited before the loop starts.
    async fn load(&mut self, _cancel: &CancellationToken) -> anyhow::Result<()> {
        Ok(())
    }

    /// Advances work that runs alongside the loop, such as in-flight
    /// asset loads.
    ///
    /// Called once per tick before the fixed steps. Must return without
    /// waiting on that work.
    fn pump(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// One fixed simulation step.
    fn update(&mut self, time: &SimTime) -> anyhow::Result<()>;

    /// One rendered frame.
    fn draw(&mut self, surface: &mut DrawSurface<'_>) -> anyhow::Result<()>;
}

//=== SceneGame ===========================================================

/// A scene load in flight. Owns the stack and hands it back when done.
type LoadTask = LocalBoxFuture<'static, (SceneStack, Result<(), EngineError>)>;

/// A [`Game`] that forwards everything to a [`SceneStack`].
///
/// The initial scene is pushed on `initialize` and loaded on `load`.
/// Scenes reached later through commands are loaded in the background:
/// the load is polled once per tick and the scene starts updating on the
/// tick it completes.
///
/// Later loads observe the token passed to `load`, so cancelling the
/// startup token also aborts them.
pub struct SceneGame {
    /// `None` while `loading` owns the stack.
    stack: Option<SceneStack>,
    loading: Option<LoadTask>,
    commands: SceneCommands,
    initial: Option<Box<dyn Scene>>,
    cancel: CancellationToken,
    logger: Logger,
}

impl SceneGame {
    /// Creates a game over a fresh stack with `services` attached.
    pub fn new(services: Services, initial: Box<dyn Scene>, logger: Logger) -> Self {
        let stack = SceneStack::new(logger.child("scene"));
        Self::from_stack(stack, services, initial, logger)
    }

    /// Like [`SceneGame::new`], with a custom command queue capacity.
    pub fn with_command_capacity(
        services: Services,
        initial: Box<dyn Scene>,
        capacity: usize,
        logger: Logger,
    ) -> Self {
        let stack = SceneStack::with_command_capacity(capacity, logger.child("scene"));
        Self::from_stack(stack, services, initial, logger)
    }

    fn from_stack(
        mut stack: SceneStack,
        services: Services,
        initial: Box<dyn Scene>,
        logger: Logger,
    ) -> Self {
        stack.attach_services(services);
        Self {
            commands: stack.commands(),
            stack: Some(stack),
            loading: None,
            initial: Some(initial),
            cancel: CancellationToken::new(),
            logger,
        }
    }

    /// The scene stack, or `None` while a scene load is in flight.
    pub fn stack(&self) -> Option<&SceneStack> {
        self.stack.as_ref()
    }

    /// Mutable access to the scene stack, or `None` while a scene load is
    /// in flight.
    pub fn stack_mut(&mut self) -> Option<&mut SceneStack> {
        self.stack.as_mut()
    }

    /// Sender for scene transitions. Usable while a load is in flight;
    /// commands apply once it finishes.
    pub fn commands(&self) -> &SceneCommands {
        &self.commands
    }

    /// True while a scene load started from the loop is still running.
    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Token observed by scene loads. Cancel it to abort pending loads.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    //--- Background Loading -----------------------------------------------

    /// Starts a load for an unloaded current scene, then polls the
    /// in-flight load once.
    ///
    /// Returns the load's error on the poll that completes it.
    fn pump_load(&mut self) -> Result<(), EngineError> {
        if self.loading.is_none() {
            self.start_load();
        }

        let Some(task) = self.loading.as_mut() else {
            return Ok(());
        };
        let Some((stack, result)) = task.as_mut().now_or_never() else {
            return Ok(());
        };

        self.loading = None;
        self.stack = Some(stack);
        result
    }

    fn start_load(&mut self) {
        let needs_load = self
            .stack
            .as_ref()
            .is_some_and(|stack| !stack.is_empty() && !stack.is_current_loaded());
        if !needs_load {
            return;
        }
        let Some(mut stack) = self.stack.take() else {
            return;
        };

        self.logger.debug(format_args!(
            "Loading scene {} in the background",
            stack.current_name().unwrap_or_default()
        ));

        let cancel = self.cancel.clone();
        self.loading = Some(
            async move {
                let result = stack.ensure_loaded(&cancel).await;
                (stack, result)
            }
            .boxed_local(),
        );
    }

    /// Waits for an in-flight load and takes the stack back.
    async fn settle(&mut self) -> Result<(), EngineError> {
        if let Some(task) = self.loading.take() {
            let (stack, result) = task.await;
            self.stack = Some(stack);
            result?;
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl Game for SceneGame {
    fn initialize(&mut self) -> anyhow::Result<()> {
        let Some(stack) = self.stack.as_mut() else {
            return Ok(());
        };
        if let Some(scene) = self.initial.take() {
            self.logger.debug(format_args!("Pushing initial scene {}", scene.name()));
            stack.push(scene)?;
        }
        Ok(())
    }

    async fn load(&mut self, cancel: &CancellationToken) -> anyhow::Result<()> {
        self.cancel = cancel.clone();
        self.settle().await?;
        if let Some(stack) = self.stack.as_mut() {
            stack.ensure_loaded(cancel).await?;
        }
        Ok(())
    }

    fn pump(&mut self) -> anyhow::Result<()> {
        self.pump_load()?;
        Ok(())
    }

    fn update(&mut self, time: &SimTime) -> anyhow::Result<()> {
        self.pump_load()?;
        let Some(stack) = self.stack.as_mut() else {
            return Ok(());
        };
        stack.process_commands()?;

        self.pump_load()?;
        if let Some(stack) = self.stack.as_mut() {
            stack.update(time)?;
        }
        Ok(())
    }

    fn draw(&mut self, surface: &mut DrawSurface<'_>) -> anyhow::Result<()> {
        if let Some(stack) = self.stack.as_mut() {
            stack.draw(surface)?;
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
