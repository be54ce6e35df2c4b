//! Platform abstraction layer
//!
//! Maps host keyboard events onto the logical keys the simulation reads.
//! Browsers report either a `key` name (modern and legacy spellings) or a
//! numeric `keyCode`; both are accepted.

use crate::sim::Key;

/// Map a DOM `KeyboardEvent.key` value
pub fn key_from_dom(name: &str) -> Option<Key> {
    match name {
        "ArrowLeft" | "Left" => Some(Key::Left),
        "ArrowRight" | "Right" => Some(Key::Right),
        "ArrowUp" | "Up" => Some(Key::Up),
        " " | "Spacebar" => Some(Key::Fire),
        _ => None,
    }
}

/// Map a legacy `KeyboardEvent.keyCode`
pub fn key_from_code(code: u32) -> Option<Key> {
    match code {
        37 => Some(Key::Left),
        39 => Some(Key::Right),
        38 => Some(Key::Up),
        32 => Some(Key::Fire),
        _ => None,
    }
}

/// Prefer the key name, fall back to the code
pub fn map_key(name: &str, code: u32) -> Option<Key> {
    key_from_dom(name).or_else(|| key_from_code(code))
}
