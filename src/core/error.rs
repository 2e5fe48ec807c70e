//=========================================================================
// Engine Errors
//=========================================================================
//
// One error type for every failure the engine surfaces to a caller.
//
// Categories:
//   argument     → InvalidArgument
//   lifecycle    → ServicesNotAttached
//   load         → SceneInitialize / SceneLoad / Cancelled
//   steady-state → SceneUpdate / SceneDraw / Update
//   host         → Startup / Platform
//
// Teardown failures have no variant: they never propagate and are
// reported through `TeardownReport` instead.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== EngineError =========================================================

/// Errors raised by the scheduler, the scene stack and the host.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A constructor or method received an argument outside its contract.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A scene was pushed before services were attached to the stack.
    #[error("services have not been attached to the scene stack")]
    ServicesNotAttached,

    /// `Scene::initialize` failed; the scene stays inert.
    #[error("failed to initialize scene `{scene}`")]
    SceneInitialize {
        scene: String,
        #[source]
        source: anyhow::Error,
    },

    /// `Scene::load` failed; the scene stays inert and may be retried.
    #[error("failed to load scene `{scene}`")]
    SceneLoad {
        scene: String,
        #[source]
        source: anyhow::Error,
    },

    /// Loading was cancelled through a `CancellationToken`.
    #[error("loading of scene `{scene}` was cancelled")]
    Cancelled { scene: String },

    /// The active scene failed while updating.
    #[error("update failed in scene `{scene}`")]
    SceneUpdate {
        scene: String,
        #[source]
        source: anyhow::Error,
    },

    /// The active scene failed while drawing.
    #[error("draw failed in scene `{scene}`")]
    SceneDraw {
        scene: String,
        #[source]
        source: anyhow::Error,
    },

    /// The driven game failed during a fixed update.
    #[error("fixed update failed")]
    Update(#[source] anyhow::Error),

    /// The initialize-and-load pass failed before the loop could start.
    #[error("failed to initialize or load the game")]
    Startup(#[source] anyhow::Error),

    /// Window or event loop failure in the host layer.
    #[error("platform error: {0}")]
    Platform(String),
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Returns true for failures that leave a scene inert but retryable.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::SceneInitialize { .. } | Self::SceneLoad { .. } | Self::Cancelled { .. }
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
