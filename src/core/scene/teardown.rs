//=========================================================================
// Teardown
//=========================================================================
//
// Unload-then-drop for scenes leaving the stack.
//
// Teardown is total: every failure is collected and logged, none stops
// the remaining steps, and nothing propagates to the caller. Panics in
// `unload` or in the scene's destructor are caught and recorded too.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::logger::Logger;

//=== TeardownFailure =====================================================

/// One failure observed while tearing a scene down.
#[derive(Debug, Error)]
pub enum TeardownFailure {
    /// `Scene::unload` returned an error.
    #[error("unload failed: {0:#}")]
    Unload(anyhow::Error),

    /// `Scene::unload` or the scene's destructor panicked.
    #[error("panicked during teardown: {0}")]
    Panicked(String),
}

//=== TeardownReport ======================================================

/// Outcome of tearing down one scene.
#[derive(Debug)]
pub struct TeardownReport {
    pub scene: String,
    pub failures: Vec<TeardownFailure>,
}

impl TeardownReport {
    /// True when unload and disposal both completed without failure.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

//=== tear_down ===========================================================

/// Unloads and drops `scene`, collecting every failure along the way.
pub(crate) fn tear_down(scene: Box<dyn Scene>, logger: &Logger) -> TeardownReport {
    let mut scene = scene;
    let name = scene.name().to_owned();
    let mut failures = Vec::new();

    match catch_unwind(AssertUnwindSafe(|| scene.unload())) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => failures.push(TeardownFailure::Unload(err)),
        Err(payload) => failures.push(TeardownFailure::Panicked(panic_message(payload.as_ref()))),
    }

    if let Err(payload) = catch_unwind(AssertUnwindSafe(move || drop(scene))) {
        failures.push(TeardownFailure::Panicked(panic_message(payload.as_ref())));
    }

    for failure in &failures {
        logger.error(format_args!("Error while disposing scene {}: {}", name, failure));
    }

    TeardownReport { scene: name, failures }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
