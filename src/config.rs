//! Engine configuration.
//!
//! Hosts usually ship a JSON blob next to their key-code tables:
//!
//! ```json
//! { "key_codes": { "10009": "enter" }, "allow_root_replacement": false }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::keymap::KeyMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LrudConfig {
    /// Extra bindings laid over the built-in table.
    pub key_codes: KeyMap,
    /// Start from the built-in table (`KeyMap::default()`). When false only
    /// `key_codes` is used.
    pub default_key_codes: bool,
    /// Let a second parent-less registration replace the root instead of
    /// being rejected.
    pub allow_root_replacement: bool,
}

impl Default for LrudConfig {
    fn default() -> Self {
        Self {
            key_codes: KeyMap::empty(),
            default_key_codes: true,
            allow_root_replacement: false,
        }
    }
}

impl LrudConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The effective key table.
    pub fn key_map(&self) -> KeyMap {
        let mut map = if self.default_key_codes {
            KeyMap::default()
        } else {
            KeyMap::empty()
        };
        map.extend(&self.key_codes);
        map
    }
}
