//=========================================================================
// Services
//=========================================================================
//
// Shared collaborators injected into every scene on a stack.
//
// Architecture:
//   Services
//     ├─ content: Rc<dyn ContentLoader>
//     ├─ audio:   Rc<dyn AudioService>
//     └─ input:   Rc<dyn InputSource>
//
// The services are shared by reference: no scene owns them, and they
// outlive the stack they are attached to.
//
//=========================================================================

//=== Module Declarations =================================================

mod audio;
mod cancel;
mod content;

//=== Public API ==========================================================

pub use audio::{AudioClip, AudioService, PlaybackInstance, PlaybackOptions};
pub use cancel::{CancellationToken, Cancelled};
pub use content::{ContentError, ContentLoader, Font, Texture};

//=== External Dependencies ===============================================

use std::fmt;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::input::InputSource;

//=== Services ============================================================

/// Handles to the content, audio and input collaborators.
#[derive(Clone)]
pub struct Services {
    pub content: Rc<dyn ContentLoader>,
    pub audio: Rc<dyn AudioService>,
    pub input: Rc<dyn InputSource>,
}

impl Services {
    /// Bundles the three collaborators.
    pub fn new(
        content: Rc<dyn ContentLoader>,
        audio: Rc<dyn AudioService>,
        input: Rc<dyn InputSource>,
    ) -> Self {
        Self { content, audio, input }
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
