//=========================================================================
// Scene System
//=========================================================================
//
// Scene lifecycle and stack-based scene switching.
//
// Architecture:
//   SceneStack
//     ├─ scenes: Vec<Box<dyn Scene>>   (top = current)
//     ├─ services: Option<Services>    (injected on push)
//     └─ commands: CommandQueue        (drained once per tick)
//
// Lifecycle:
//   Inert ─initialize()→ Initialized ─load()→ Ready
//                                      └─(fail)→ Inert
//   (any) ─unload()→ Unloaded ─drop→ gone
//
// Flow:
//   update() → current scene only, skipped while not loaded
//
//=========================================================================

//=== Module Declarations =================================================

mod scene_base;
mod scene_stack;
mod teardown;
mod transition_queue;

//=== Public API ==========================================================

pub use scene_base::{SceneBase, SceneState};
pub use scene_stack::{CommandOutcome, SceneStack};
pub use teardown::{TeardownFailure, TeardownReport};
pub use transition_queue::{SceneCommand, SceneCommands, DEFAULT_COMMAND_CAPACITY};

//=== External Dependencies ===============================================

use async_trait::async_trait;

//=== Internal Dependencies ===============================================

use crate::core::services::{CancellationToken, Services};
use crate::core::surface::DrawSurface;
use crate::core::time::SimTime;

//=== SceneContext ========================================================

/// What a scene receives when it is pushed: the shared services and a
/// handle for requesting stack transitions.
#[derive(Debug, Clone)]
pub struct SceneContext {
    pub services: Services,
    pub commands: SceneCommands,
}

//=== Scene Trait =========================================================

/// An independently loadable unit of game logic (a menu, a level).
///
/// Scenes are driven by a [`SceneStack`]. Only the topmost scene is
/// updated or drawn, and only once its load has completed.
///
/// # Contract
///
/// - `initialize` does lightweight synchronous setup and always finishes
///   before `load` starts.
/// - `load` acquires heavyweight resources. On failure (including
///   cancellation) `is_loaded` stays false; the stack may retry later.
/// - `update`/`draw` must return `Ok(())` without touching visible state
///   while `is_loaded` is false. [`SceneBase::is_loaded`] is the gate.
/// - `unload` clears the loaded flag and releases scene-owned resources.
///   It must be idempotent. The stack calls it before dropping the scene.
///
/// # Minimal Implementation
///
/// ```rust
/// # use stepwise_engine::prelude::*;
/// struct Menu {
///     base: SceneBase,
/// }
///
/// #[async_trait::async_trait(?Send)]
/// impl Scene for Menu {
///     fn name(&self) -> &str { self.base.name() }
///     fn is_loaded(&self) -> bool { self.base.is_loaded() }
///     fn attach(&mut self, context: SceneContext) { self.base.attach(context) }
///
///     async fn load(&mut self, cancel: &CancellationToken) -> anyhow::Result<()> {
///         self.base.begin_load();
///         let result = cancel.check().map_err(anyhow::Error::from);
///         self.base.finish_load(result)
///     }
///
///     fn update(&mut self, _time: &SimTime) -> anyhow::Result<()> {
///         if !self.base.is_loaded() { return Ok(()); }
///         Ok(())
///     }
///
///     fn draw(&mut self, _surface: &mut DrawSurface<'_>) -> anyhow::Result<()> {
///         Ok(())
///     }
///
///     fn unload(&mut self) -> anyhow::Result<()> {
///         self.base.mark_unloaded();
///         Ok(())
///     }
/// }
/// ```
#[async_trait(?Send)]
pub trait Scene {
    /// Diagnostic name; conventionally unique within one stack.
    fn name(&self) -> &str;

    /// True once `load` has completed successfully and until `unload`.
    fn is_loaded(&self) -> bool;

    /// Receives services and the command handle when pushed.
    fn attach(&mut self, context: SceneContext);

    /// Lightweight, synchronous setup.
    fn initialize(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Heavyweight, asynchronous resource acquisition.
    async fn load(&mut self, cancel: &CancellationToken) -> anyhow::Result<()>;

    /// Advances scene logic by one fixed step.
    fn update(&mut self, time: &SimTime) -> anyhow::Result<()>;

    /// Renders the scene onto the frame's surface.
    fn draw(&mut self, surface: &mut DrawSurface<'_>) -> anyhow::Result<()>;

    /// Releases scene-owned resources.
    fn unload(&mut self) -> anyhow::Result<()>;
}
