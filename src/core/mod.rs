//=========================================================================
// Core Systems
//
// Host-independent engine systems: fixed-step timing, the scene stack,
// the loop driver and the collaborator contracts they consume.
//
// Responsibilities:
// - Turn irregular host callbacks into fixed simulation steps (`time`)
// - Manage scene lifecycle and transitions (`scene`)
// - Drive a `Game` from tick/paint callbacks (`driver`, `game`)
// - Define the content, audio and input seams (`services`, `input`)
//
// Notes:
// Nothing in here touches Winit. The `platform` module adapts these
// systems to a window; tests drive them directly with explicit instants.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod driver;
pub mod error;
pub mod game;
pub mod input;
pub mod logger;
pub mod scene;
pub mod services;
pub mod surface;
pub mod time;

#[cfg(test)]
pub(crate) mod testing;

//=== Re-exports ==========================================================

pub use driver::{FrameStatus, LoopDriver, TickOutcome};
pub use error::EngineError;
pub use game::{Game, SceneGame};
pub use logger::{LogRecord, Logger, MemoryLog};
pub use surface::DrawSurface;
