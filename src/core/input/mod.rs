//=========================================================================
// Input System
//
// Pollable input for game code.
//
// Responsibilities:
// - Define the host-independent input vocabulary (`event`)
// - Expose immutable snapshots for keyboard, pointer and touch
// - Provide the host-fed `InputService` behind the `InputSource` trait
//
// Notes:
// Game code only sees `InputSource`. Which host feeds the state (winit,
// a test harness, a replay file) is invisible to scenes.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod input_service;
mod snapshot;

//=== Public API ==========================================================

pub use event::{InputEvent, Key, MouseButtons, TouchPhase};
pub use input_service::InputService;
pub use snapshot::{KeyboardState, MouseState, TouchPoint, TouchState};

//=== InputSource =========================================================

/// Synchronous snapshot queries over the current input state.
pub trait InputSource {
    /// Keys held right now.
    fn keyboard(&self) -> KeyboardState;

    /// Pointer position, buttons, and scroll since the previous query.
    fn mouse(&self) -> MouseState;

    /// Active touch contacts.
    fn touches(&self) -> TouchState;
}
