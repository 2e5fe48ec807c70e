//=========================================================================
// Scene Base
//=========================================================================
//
// Reusable lifecycle bookkeeping composed into concrete scenes.
//
// Holds the name, the lifecycle state and the injected context, so that
// every scene shares one implementation of the loaded-flag rules instead
// of re-deriving them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::{SceneCommands, SceneContext};
use crate::core::error::EngineError;
use crate::core::input::InputSource;
use crate::core::services::{AudioService, ContentLoader, Services};

//=== SceneState ==========================================================

/// Lifecycle state of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    /// Constructed, or a load attempt failed.
    Inert,
    /// `initialize` completed.
    Initialized,
    /// `load` in progress.
    Loading,
    /// Loaded; eligible for update and draw.
    Ready,
    /// `unload` ran.
    Unloaded,
}

//=== SceneBase ===========================================================

/// Name, lifecycle state and injected context for one scene.
#[derive(Debug)]
pub struct SceneBase {
    name: String,
    state: SceneState,
    context: Option<SceneContext>,
}

impl SceneBase {
    /// Creates an inert scene base. The name must not be blank.
    pub fn new(name: impl Into<String>) -> Result<Self, EngineError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EngineError::invalid_argument("scene name must not be empty"));
        }

        Ok(Self {
            name,
            state: SceneState::Inert,
            context: None,
        })
    }

    //--- Identity & State -------------------------------------------------

    /// The non-blank name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SceneState {
        self.state
    }

    /// True once `load` has succeeded and until unload.
    pub fn is_loaded(&self) -> bool {
        self.state == SceneState::Ready
    }

    /// Attached to a stack and not yet unloaded.
    pub fn is_active(&self) -> bool {
        self.context.is_some() && self.state != SceneState::Unloaded
    }

    //--- Transitions ------------------------------------------------------

    /// Records a completed `initialize`. A ready scene stays ready.
    pub fn mark_initialized(&mut self) {
        if self.state != SceneState::Ready {
            self.state = SceneState::Initialized;
        }
    }

    /// Records the start of `load`.
    pub fn begin_load(&mut self) {
        self.state = SceneState::Loading;
    }

    /// Records the outcome of `load` and passes it through unchanged.
    ///
    /// Success makes the scene ready; failure leaves it inert.
    pub fn finish_load<T, E>(&mut self, result: Result<T, E>) -> Result<T, E> {
        self.state = match result {
            Ok(_) => SceneState::Ready,
            Err(_) => SceneState::Inert,
        };
        result
    }

    /// Records `unload`. Idempotent.
    pub fn mark_unloaded(&mut self) {
        self.state = SceneState::Unloaded;
    }

    //--- Injected Context -------------------------------------------------

    /// Stores the context handed over by the stack.
    pub fn attach(&mut self, context: SceneContext) {
        self.context = Some(context);
    }

    /// The attached context, if any.
    pub fn context(&self) -> Option<&SceneContext> {
        self.context.as_ref()
    }

    /// The injected services, or `ServicesNotAttached`.
    pub fn services(&self) -> Result<&Services, EngineError> {
        self.context
            .as_ref()
            .map(|c| &c.services)
            .ok_or(EngineError::ServicesNotAttached)
    }

    /// The injected content loader.
    pub fn content(&self) -> Result<Rc<dyn ContentLoader>, EngineError> {
        self.services().map(|s| Rc::clone(&s.content))
    }

    /// The injected audio service.
    pub fn audio(&self) -> Result<Rc<dyn AudioService>, EngineError> {
        self.services().map(|s| Rc::clone(&s.audio))
    }

    /// The injected input source.
    pub fn input(&self) -> Result<Rc<dyn InputSource>, EngineError> {
        self.services().map(|s| Rc::clone(&s.input))
    }

    /// Handle for requesting stack transitions from inside the scene.
    pub fn commands(&self) -> Result<&SceneCommands, EngineError> {
        self.context
            .as_ref()
            .map(|c| &c.commands)
            .ok_or(EngineError::ServicesNotAttached)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_rejected() {
        assert!(matches!(SceneBase::new(""), Err(EngineError::InvalidArgument(_))));
        assert!(matches!(SceneBase::new("   "), Err(EngineError::InvalidArgument(_))));
    }

    #[test]
    fn starts_inert_and_unattached() {
        let base = SceneBase::new("Title").unwrap();
        assert_eq!(base.name(), "Title");
        assert_eq!(base.state(), SceneState::Inert);
        assert!(!base.is_loaded());
        assert!(!base.is_active());
        assert!(matches!(base.services(), Err(EngineError::ServicesNotAttached)));
        assert!(base.commands().is_err());
    }

    #[test]
    fn happy_path_reaches_ready() {
        let mut base = SceneBase::new("Level").unwrap();
        base.mark_initialized();
        assert_eq!(base.state(), SceneState::Initialized);

        base.begin_load();
        assert_eq!(base.state(), SceneState::Loading);
        assert!(!base.is_loaded());

        let out: Result<u8, ()> = base.finish_load(Ok(3));
        assert_eq!(out, Ok(3));
        assert!(base.is_loaded());
    }

    #[test]
    fn failed_load_returns_to_inert() {
        let mut base = SceneBase::new("Level").unwrap();
        base.mark_initialized();
        base.begin_load();

        let out: Result<(), &str> = base.finish_load(Err("missing"));
        assert_eq!(out, Err("missing"));
        assert_eq!(base.state(), SceneState::Inert);
    }

    #[test]
    fn unload_is_idempotent_from_any_state() {
        let mut base = SceneBase::new("Level").unwrap();
        base.mark_unloaded();
        base.mark_unloaded();
        assert_eq!(base.state(), SceneState::Unloaded);

        base.mark_initialized();
        base.begin_load();
        let _ = base.finish_load::<(), ()>(Ok(()));
        base.mark_unloaded();
        assert!(!base.is_loaded());
    }

    #[test]
    fn initialize_does_not_demote_ready() {
        let mut base = SceneBase::new("Level").unwrap();
        base.begin_load();
        let _ = base.finish_load::<(), ()>(Ok(()));
        base.mark_initialized();
        assert!(base.is_loaded());
    }
}
