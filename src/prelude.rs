//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use stepwise_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder, EngineConfig};
pub use crate::logging::{init_logging, LoggingConfig};

// Errors and diagnostics
pub use crate::core::error::EngineError;
pub use crate::core::logger::Logger;

// Loop
pub use crate::core::driver::{FrameStatus, LoopDriver, TickOutcome};
pub use crate::core::game::{Game, SceneGame};
pub use crate::core::surface::DrawSurface;
pub use crate::core::time::SimTime;

// Scene system
pub use crate::core::scene::{
    Scene, SceneBase, SceneCommands, SceneContext, SceneStack, SceneState, TeardownReport,
};

// Services and input
pub use crate::core::input::{InputSource, Key, MouseButtons};
pub use crate::core::services::{
    AudioClip, AudioService, CancellationToken, ContentError, ContentLoader, Font,
    PlaybackInstance, PlaybackOptions, Services, Texture,
};
