//! Maps winit window events onto an [`InputContext`].
//!
//! The event loop owns the context and calls [`apply_window_event`] for every
//! window event; the returned [`Action`] says whether something one-shot
//! happened (a shot, a time-speed change).

use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::action::Action;
use crate::context::InputContext;
use crate::keys::Key;

/// Game key bound to a physical key code, if any.
pub fn key_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyW => Some(Key::Forward),
        KeyCode::KeyS => Some(Key::Back),
        KeyCode::KeyA => Some(Key::Left),
        KeyCode::KeyD => Some(Key::Right),
        KeyCode::Space => Some(Key::Up),
        KeyCode::ShiftLeft => Some(Key::Down),
        KeyCode::ControlLeft => Some(Key::Slow),
        _ => None,
    }
}

/// One-shot action bound to a freshly pressed key code.
pub fn action_for(code: KeyCode) -> Action {
    match code {
        KeyCode::ArrowUp => Action::TimeFaster,
        KeyCode::ArrowDown => Action::TimeSlower,
        _ => Action::Noop,
    }
}

/// Feed one window event into the input context.
pub fn apply_window_event(input: &mut InputContext, event: &WindowEvent) -> Action {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            input.mouse.on_cursor_moved(position.x, position.y);
            Action::Noop
        }
        WindowEvent::CursorEntered { .. } => {
            input.mouse.on_cursor_enter(true);
            Action::Noop
        }
        WindowEvent::CursorLeft { .. } => {
            input.mouse.on_cursor_enter(false);
            Action::Noop
        }
        WindowEvent::Focused(false) => {
            input.focus_lost();
            Action::Noop
        }
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state,
                    repeat,
                    ..
                },
            ..
        } => {
            let pressed = *state == ElementState::Pressed;
            if let Some(key) = key_for(*code) {
                input.keys.set(key, pressed);
            }
            if pressed && !repeat {
                action_for(*code)
            } else {
                Action::Noop
            }
        }
        WindowEvent::MouseInput {
            button: MouseButton::Left,
            state: ElementState::Pressed,
            ..
        } => Action::Fire,
        _ => Action::Noop,
    }
}
