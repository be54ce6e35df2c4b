//! Logical key state
//!
//! The simulation only asks "is this key held right now". Key events from the
//! host are routed into an [`InputState`] owned by one game instance, so
//! several games can run side by side without sharing handlers.

use serde::{Deserialize, Serialize};

/// Keys the player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Fire,
}

impl Key {
    #[inline]
    fn index(self) -> usize {
        match self {
            Key::Left => 0,
            Key::Right => 1,
            Key::Up => 2,
            Key::Fire => 3,
        }
    }
}

/// Anything that can answer held-key queries
pub trait InputSource {
    fn is_down(&self, key: Key) -> bool;
}

/// Held keys for one game instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: [bool; 4],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    pub fn set(&mut self, key: Key, down: bool) {
        self.held[key.index()] = down;
    }

    /// Forget every held key (focus loss would otherwise leave keys stuck)
    pub fn release_all(&mut self) {
        self.held = [false; 4];
    }
}

impl InputSource for InputState {
    #[inline]
    fn is_down(&self, key: Key) -> bool {
        self.held[key.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KEYS: [Key; 4] = [Key::Left, Key::Right, Key::Up, Key::Fire];

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::new();
        assert!(ALL_KEYS.iter().all(|&key| !input.is_down(key)));

        input.press(Key::Fire);
        input.press(Key::Left);
        assert!(input.is_down(Key::Fire));
        assert!(input.is_down(Key::Left));
        assert!(!input.is_down(Key::Right));

        input.release(Key::Fire);
        assert!(!input.is_down(Key::Fire));
        assert!(input.is_down(Key::Left));
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::new();
        for key in ALL_KEYS {
            input.press(key);
        }
        input.release_all();
        assert!(ALL_KEYS.iter().all(|&key| !input.is_down(key)));
    }

    #[test]
    fn test_instances_are_independent() {
        let mut a = InputState::new();
        let b = InputState::new();
        a.press(Key::Up);
        assert!(a.is_down(Key::Up));
        assert!(!b.is_down(Key::Up));
    }
}
