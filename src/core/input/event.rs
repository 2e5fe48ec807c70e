//=========================================================================
// Input Event Types
//
// Defines the portable representation of low-level input that the host
// feeds into the input service.
//
// Responsibilities:
// - Represent keyboard, pointer and touch input independent of winit
// - Provide a small bit set for pointer buttons
// - Describe the touch contact lifecycle
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    InputService (applies events)
//         ↓
//    Snapshots (KeyboardState, MouseState, TouchState)
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::ops::{BitOr, BitOrAssign};

//=== Key =================================================================

/// Keyboard keys understood by the engine.
///
/// A subset sufficient for most 2D games. Physical keys the host cannot
/// map become `Unknown` and are ignored by the input service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Unknown,

    //--- Alphabetic Keys --------------------------------------------------
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    //--- Number Row -------------------------------------------------------
    D0, D1, D2, D3, D4, D5, D6, D7, D8, D9,

    //--- Arrow Keys -------------------------------------------------------
    Left,
    Right,
    Up,
    Down,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,
    Shift,
    Control,
    Alt,
    Tab,
}

//=== MouseButtons ========================================================

/// Set of pointer buttons, stored as bit flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MouseButtons(u8);

impl MouseButtons {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(1);
    pub const RIGHT: Self = Self(2);
    pub const MIDDLE: Self = Self(4);
    pub const X1: Self = Self(8);
    pub const X2: Self = Self(16);

    /// True if every button in `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Adds the buttons in `other`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Removes the buttons in `other`.
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// True when no button is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for MouseButtons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for MouseButtons {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

//=== TouchPhase ==========================================================

/// Lifecycle phase of a touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
}

impl TouchPhase {
    /// True for phases that remove the contact.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Canceled)
    }
}

//=== InputEvent ==========================================================

/// Low-level input event from the host layer.
///
/// Coordinates are in surface pixels with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown(Key),

    /// Key released.
    KeyUp(Key),

    /// Pointer moved to a new position.
    PointerMoved { x: f32, y: f32 },

    /// One or more pointer buttons pressed.
    PointerDown(MouseButtons),

    /// One or more pointer buttons released.
    PointerUp(MouseButtons),

    /// Scroll wheel moved; units are host-defined.
    Scrolled(f32),

    /// Touch contact changed.
    Touch {
        id: u64,
        x: f32,
        y: f32,
        phase: TouchPhase,
    },

    /// The surface lost focus; held keys and buttons are released.
    FocusLost,
}

//=========================================================================
// Unit Tests
//=========================================================================
