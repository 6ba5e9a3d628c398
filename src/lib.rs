//! LRUD — spatial focus navigation.
//!
//! Applications register a tree of nodes (regions, lists, rows, items). The
//! engine tracks which node is focused and which child each container
//! remembers as active, and it routes left/right/up/down/enter keys into
//! focus moves and selections.
//!
//! The Rust API lives on [`Lrud`]. The C ABI in [`ffi`] drives a per-thread
//! instance and drains notifications as JSON.
//!
//! ```
//! use lrud::{Key, Lrud, NodeOptions};
//!
//! let mut lrud = Lrud::new();
//! lrud.register("root", NodeOptions::new().horizontal()).unwrap();
//! lrud.register("a", NodeOptions::new().parent("root")).unwrap();
//! lrud.register("b", NodeOptions::new().parent("root")).unwrap();
//!
//! lrud.focus(None);
//! assert_eq!(lrud.focused_id(), Some("a"));
//! assert!(lrud.handle_key(Key::Right));
//! assert_eq!(lrud.focused_id(), Some("b"));
//! ```

mod active;
mod config;
mod context;
mod emitter;
mod error;
mod event;
pub mod ffi;
mod focus;
mod grid;
mod keymap;
mod node;
mod tree;
mod types;

pub use config::LrudConfig;
pub use context::Lrud;
pub use emitter::{Emitter, Listener, ListenerId};
pub use error::{LrudError, Result};
pub use keymap::KeyMap;
pub use node::{MoveCallback, Node, NodeCallback, NodeCallbacks, NodeOptions, NodeProps};
pub use types::{
    EventKind, Key, LrudEvent, MoveEvent, NodeFlags, NodeSnapshot, Orientation, Position,
};
