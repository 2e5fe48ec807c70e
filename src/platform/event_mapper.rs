//=========================================================================
// Platform Event Mapper
//
// Converts Winit window events to engine-level `InputEvent` values.
//
// Responsibilities:
// - Translate keyboard, pointer, wheel and touch events
// - Collapse left/right modifier keys into a single `Key`
// - Ignore Winit events the input service has no use for
//
//=========================================================================

use winit::event::{
    ElementState, MouseButton as WinitMouseButton, MouseScrollDelta,
    TouchPhase as WinitTouchPhase, WindowEvent,
};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::core::input::{InputEvent, Key, MouseButtons, TouchPhase};

/// Pixel-precise wheel deltas are converted to lines at this ratio.
const PIXELS_PER_SCROLL_LINE: f64 = 40.0;

//=== Key Conversion ======================================================
//
// Only a subset of codes is supported; everything else maps to
// `Key::Unknown`, which the input service ignores.
//

impl From<WinitKeyCode> for Key {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Alphabetic keys --------------------------------------------------
            KeyA => Key::A, KeyB => Key::B, KeyC => Key::C, KeyD => Key::D,
            KeyE => Key::E, KeyF => Key::F, KeyG => Key::G, KeyH => Key::H,
            KeyI => Key::I, KeyJ => Key::J, KeyK => Key::K, KeyL => Key::L,
            KeyM => Key::M, KeyN => Key::N, KeyO => Key::O, KeyP => Key::P,
            KeyQ => Key::Q, KeyR => Key::R, KeyS => Key::S, KeyT => Key::T,
            KeyU => Key::U, KeyV => Key::V, KeyW => Key::W, KeyX => Key::X,
            KeyY => Key::Y, KeyZ => Key::Z,

            //--- Number row -------------------------------------------------------
            Digit0 => Key::D0, Digit1 => Key::D1, Digit2 => Key::D2,
            Digit3 => Key::D3, Digit4 => Key::D4, Digit5 => Key::D5,
            Digit6 => Key::D6, Digit7 => Key::D7, Digit8 => Key::D8,
            Digit9 => Key::D9,

            //--- Arrow keys -------------------------------------------------------
            ArrowLeft => Key::Left, ArrowRight => Key::Right,
            ArrowUp => Key::Up, ArrowDown => Key::Down,

            //--- Special keys -----------------------------------------------------
            Space => Key::Space,
            Enter | NumpadEnter => Key::Enter,
            Escape => Key::Escape,
            Tab => Key::Tab,
            ShiftLeft | ShiftRight => Key::Shift,
            ControlLeft | ControlRight => Key::Control,
            AltLeft | AltRight => Key::Alt,

            //--- Fallback ---------------------------------------------------------
            _ => Key::Unknown,
        }
    }
}

impl From<PhysicalKey> for Key {
    fn from(key: PhysicalKey) -> Self {
        match key {
            PhysicalKey::Code(code) => Key::from(code),
            PhysicalKey::Unidentified(_) => Key::Unknown,
        }
    }
}

//=== Mouse Conversion ====================================================

impl From<WinitMouseButton> for MouseButtons {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButtons::LEFT,
            WinitMouseButton::Right => MouseButtons::RIGHT,
            WinitMouseButton::Middle => MouseButtons::MIDDLE,
            WinitMouseButton::Back => MouseButtons::X1,
            WinitMouseButton::Forward => MouseButtons::X2,
            WinitMouseButton::Other(_) => MouseButtons::NONE,
        }
    }
}

fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(position) => (position.y / PIXELS_PER_SCROLL_LINE) as f32,
    }
}

//=== Touch Conversion ====================================================

impl From<WinitTouchPhase> for TouchPhase {
    fn from(phase: WinitTouchPhase) -> Self {
        match phase {
            WinitTouchPhase::Started => TouchPhase::Began,
            WinitTouchPhase::Moved => TouchPhase::Moved,
            WinitTouchPhase::Ended => TouchPhase::Ended,
            WinitTouchPhase::Cancelled => TouchPhase::Canceled,
        }
    }
}

//=== Full Event Conversion ===============================================
//
// Notes:
// - `KeyboardInput` becomes `KeyDown`/`KeyUp`; unmapped keys still map
//   (to `Key::Unknown`) and are dropped by the input service.
// - `MouseInput` with an unsupported button yields `None`.
// - `Focused(false)` becomes `FocusLost`; gaining focus yields nothing.
//

/// Translates a window event, returning `None` for events that carry no
/// input.
pub(crate) fn map_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        //--- Keyboard Input ----------------------------------------------
        WindowEvent::KeyboardInput { event, .. } => {
            let key = Key::from(event.physical_key);
            Some(match event.state {
                ElementState::Pressed => InputEvent::KeyDown(key),
                ElementState::Released => InputEvent::KeyUp(key),
            })
        }

        //--- Pointer -----------------------------------------------------
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved {
            x: position.x as f32,
            y: position.y as f32,
        }),

        WindowEvent::MouseInput { state, button, .. } => {
            let buttons = MouseButtons::from(*button);
            if buttons.is_empty() {
                return None;
            }
            Some(match state {
                ElementState::Pressed => InputEvent::PointerDown(buttons),
                ElementState::Released => InputEvent::PointerUp(buttons),
            })
        }

        WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Scrolled(scroll_lines(*delta))),

        //--- Touch -------------------------------------------------------
        WindowEvent::Touch(touch) => Some(InputEvent::Touch {
            id: touch.id,
            x: touch.location.x as f32,
            y: touch.location.y as f32,
            phase: TouchPhase::from(touch.phase),
        }),

        //--- Focus -------------------------------------------------------
        WindowEvent::Focused(false) => Some(InputEvent::FocusLost),

        //--- Unhandled Events --------------------------------------------
        _ => None,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
