//=========================================================================
// Input Snapshots
//=========================================================================
//
// Immutable views of input state handed to game code. Scenes read them
// during fixed updates; the host never mutates a snapshot after it has
// been handed out.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{Key, MouseButtons, TouchPhase};

//=== KeyboardState =======================================================

/// Keyboard snapshot: the set of keys held at the time of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pressed: HashSet<Key>,
}

impl KeyboardState {
    /// A snapshot with exactly `pressed` held down.
    pub fn new(pressed: impl IntoIterator<Item = Key>) -> Self {
        Self {
            pressed: pressed.into_iter().collect(),
        }
    }

    /// True while `key` is held.
    pub fn is_down(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// True if any of `keys` is held.
    pub fn any_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.pressed.contains(k))
    }

    /// Every held key.
    pub fn pressed(&self) -> impl Iterator<Item = Key> + '_ {
        self.pressed.iter().copied()
    }
}

//=== MouseState ==========================================================

/// Pointer snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    /// Position in surface pixels.
    pub position: (f32, f32),

    /// Buttons currently held.
    pub buttons: MouseButtons,

    /// Scroll accumulated since the previous snapshot.
    pub scroll_delta: f32,
}

impl MouseState {
    /// True while every button in `button` is held.
    pub fn is_down(&self, button: MouseButtons) -> bool {
        self.buttons.contains(button)
    }
}

//=== TouchState ==========================================================

/// A single touch contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub position: (f32, f32),
    pub phase: TouchPhase,
}

/// The set of active touch contacts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchState {
    touches: Vec<TouchPoint>,
}

impl TouchState {
    /// A snapshot of the given contacts.
    pub fn new(touches: Vec<TouchPoint>) -> Self {
        Self { touches }
    }

    /// Active contacts.
    pub fn touches(&self) -> &[TouchPoint] {
        &self.touches
    }

    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.touches.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
