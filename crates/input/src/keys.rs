use std::collections::HashSet;

/// Game-level keys the scene polls every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
    /// Divides movement speed while held.
    Slow,
}

impl Key {
    pub const ALL: [Key; 7] = [
        Key::Forward,
        Key::Back,
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::Slow,
    ];
}

/// Set of currently held keys.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }
}
