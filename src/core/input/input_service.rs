//=========================================================================
// Input Service
//=========================================================================
//
// Host-fed input state with snapshot queries.
//
// Architecture:
//   InputEvent → apply() → InputState (keys, pointer, touches) → snapshots
//
// The host and the game share one service per running loop. Both run on
// the same thread, so the state lives in a `RefCell` and no locking is
// needed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, Key, MouseButtons, TouchPhase};
use super::snapshot::{KeyboardState, MouseState, TouchPoint, TouchState};
use super::InputSource;
use crate::core::logger::Logger;

//=== InputState ==========================================================

#[derive(Debug, Default)]
struct InputState {
    keys_down: HashSet<Key>,
    pointer: (f32, f32),
    buttons: MouseButtons,
    scroll_delta: f32,
    touches: Vec<TouchPoint>,
}

impl InputState {
    /// Applies one event; returns true if visible state changed.
    fn apply(&mut self, event: InputEvent) -> bool {
        match event {
            //--- Keyboard ---------------------------------------------------
            InputEvent::KeyDown(Key::Unknown) | InputEvent::KeyUp(Key::Unknown) => false,
            InputEvent::KeyDown(key) => self.keys_down.insert(key),
            InputEvent::KeyUp(key) => self.keys_down.remove(&key),

            //--- Pointer ----------------------------------------------------
            InputEvent::PointerMoved { x, y } => {
                let changed = self.pointer != (x, y);
                self.pointer = (x, y);
                changed
            }
            InputEvent::PointerDown(buttons) => {
                let before = self.buttons;
                self.buttons.insert(buttons);
                before != self.buttons
            }
            InputEvent::PointerUp(buttons) => {
                let before = self.buttons;
                self.buttons.remove(buttons);
                before != self.buttons
            }
            InputEvent::Scrolled(delta) => {
                self.scroll_delta += delta;
                delta != 0.0
            }

            //--- Touch ------------------------------------------------------
            InputEvent::Touch { id, x, y, phase } => {
                self.apply_touch(id, (x, y), phase);
                true
            }

            //--- Focus ------------------------------------------------------
            InputEvent::FocusLost => {
                let changed = !self.keys_down.is_empty() || !self.buttons.is_empty();
                self.keys_down.clear();
                self.buttons = MouseButtons::NONE;
                changed
            }
        }
    }

    fn apply_touch(&mut self, id: u64, position: (f32, f32), phase: TouchPhase) {
        // Single-touch hosts read the pointer, so it mirrors the last contact.
        self.pointer = position;

        let index = self.touches.iter().position(|t| t.id == id);
        if phase.is_terminal() {
            if let Some(i) = index {
                self.touches.remove(i);
            }
        } else {
            let point = TouchPoint { id, position, phase };
            match index {
                Some(i) => self.touches[i] = point,
                None => self.touches.push(point),
            }
        }

        // Emulate the primary button while any finger is down.
        if self.touches.is_empty() {
            self.buttons.remove(MouseButtons::LEFT);
        } else {
            self.buttons.insert(MouseButtons::LEFT);
        }
    }
}

//=== InputService ========================================================

/// Input state fed by the host and queried by game code through [`InputSource`].
#[derive(Debug)]
pub struct InputService {
    state: RefCell<InputState>,
    logger: Logger,
}

impl InputService {
    /// An input service with nothing held.
    pub fn new(logger: Logger) -> Self {
        Self {
            state: RefCell::new(InputState::default()),
            logger,
        }
    }

    /// Applies a host event to the tracked state.
    pub fn apply(&self, event: InputEvent) {
        let changed = self.state.borrow_mut().apply(event);
        if changed {
            self.logger.trace(format_args!("Input updated: {:?}", event));
        }
    }

    /// Applies a batch of host events in order.
    pub fn apply_all(&self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.apply(event);
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new(Logger::null())
    }
}

impl InputSource for InputService {
    fn keyboard(&self) -> KeyboardState {
        KeyboardState::new(self.state.borrow().keys_down.iter().copied())
    }

    /// Returns the pointer snapshot and resets the accumulated scroll delta.
    fn mouse(&self) -> MouseState {
        let mut state = self.state.borrow_mut();
        let snapshot = MouseState {
            position: state.pointer,
            buttons: state.buttons,
            scroll_delta: state.scroll_delta,
        };
        state.scroll_delta = 0.0;
        snapshot
    }

    fn touches(&self) -> TouchState {
        TouchState::new(self.state.borrow().touches.clone())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
