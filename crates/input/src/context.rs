use glam::Vec2;

use crate::keys::{Key, KeyState};
use crate::mouse::MouseTracker;

/// Read-only view of the input state the simulation polls every tick.
pub trait InputSource {
    /// Whether a game key is currently held.
    fn is_pressed(&self, key: Key) -> bool;

    /// Accumulated mouse offset, see [`MouseTracker::position`].
    fn mouse_position(&self) -> Vec2;
}

/// Owned input state: held keys plus the mouse tracker.
///
/// Created by the top-level loop, fed by the windowing layer, lent by shared
/// reference to the scene and renderer.
#[derive(Debug, Clone, Default)]
pub struct InputContext {
    pub keys: KeyState,
    pub mouse: MouseTracker,
}

impl InputContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Window lost keyboard focus: nothing counts as held anymore.
    pub fn focus_lost(&mut self) {
        self.keys.clear();
        tracing::debug!("focus lost, released held keys");
    }
}

impl InputSource for InputContext {
    fn is_pressed(&self, key: Key) -> bool {
        self.keys.is_pressed(key)
    }

    fn mouse_position(&self) -> Vec2 {
        self.mouse.position()
    }
}

impl<T: InputSource + ?Sized> InputSource for &T {
    fn is_pressed(&self, key: Key) -> bool {
        (**self).is_pressed(key)
    }

    fn mouse_position(&self) -> Vec2 {
        (**self).mouse_position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_reports_keys_and_mouse() {
        let mut input = InputContext::new();
        input.keys.set(Key::Right, true);
        input.mouse.on_cursor_enter(true);
        input.mouse.on_cursor_moved(0.0, 0.0);
        input.mouse.on_cursor_moved(7.0, -3.0);

        assert!(input.is_pressed(Key::Right));
        assert!(!input.is_pressed(Key::Left));
        assert_eq!(input.mouse_position(), Vec2::new(7.0, -3.0));
    }

    #[test]
    fn focus_lost_releases_keys_but_keeps_mouse() {
        let mut input = InputContext::new();
        input.keys.set(Key::Forward, true);
        input.mouse.on_cursor_enter(true);
        input.mouse.on_cursor_moved(1.0, 1.0);
        input.mouse.on_cursor_moved(2.0, 1.0);

        input.focus_lost();
        assert!(!input.is_pressed(Key::Forward));
        assert_eq!(input.mouse_position(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn references_are_sources_too() {
        fn held(source: impl InputSource) -> bool {
            source.is_pressed(Key::Slow)
        }
        let mut input = InputContext::new();
        input.keys.set(Key::Slow, true);
        assert!(held(&input));
    }
}
