//! Raw key code → symbolic key table.
//!
//! Remote controls, D-pads and gamepads report different codes for the same
//! direction. The default table covers browser keyboards, Android D-pads,
//! Samsung TV remotes and the standard gamepad mapping.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::Key;

pub mod codes {
    pub const LEFT: &[u32] = &[37, 21, 4, 214, 205, 218];
    pub const RIGHT: &[u32] = &[39, 22, 5, 213, 206, 217];
    pub const UP: &[u32] = &[38, 19, 29460, 211, 203, 215];
    pub const DOWN: &[u32] = &[40, 20, 29461, 212, 204, 216];
    pub const ENTER: &[u32] = &[13, 23, 29443, 195];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyMap {
    codes: HashMap<u32, Key>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut map = Self::empty();
        for (key, list) in [
            (Key::Left, codes::LEFT),
            (Key::Right, codes::RIGHT),
            (Key::Up, codes::UP),
            (Key::Down, codes::DOWN),
            (Key::Enter, codes::ENTER),
        ] {
            for &code in list {
                map.insert(code, key);
            }
        }
        map
    }
}

impl KeyMap {
    pub fn empty() -> Self {
        Self {
            codes: HashMap::new(),
        }
    }

    /// Bind `code` to `key`, returning the previous binding.
    pub fn insert(&mut self, code: u32, key: Key) -> Option<Key> {
        self.codes.insert(code, key)
    }

    pub fn remove(&mut self, code: u32) -> Option<Key> {
        self.codes.remove(&code)
    }

    pub fn get(&self, code: u32) -> Option<Key> {
        self.codes.get(&code).copied()
    }

    /// Overlay `other` on top of this table; `other` wins on conflicts.
    pub fn extend(&mut self, other: &KeyMap) {
        self.codes.extend(other.codes.iter().map(|(&c, &k)| (c, k)));
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
