//! The `Lrud` engine struct and the per-thread instance behind the FFI.
//!
//! `Lrud` owns all navigation state. Behaviour is split across modules by
//! concern (`tree`, `active`, `focus`, `event`, `grid`), each adding an
//! `impl Lrud` block.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::ffi::CString;
use std::rc::Rc;

use crate::config::LrudConfig;
use crate::emitter::{Emitter, ListenerId};
use crate::error::{LrudError, Result};
use crate::keymap::KeyMap;
use crate::node::Node;
use crate::types::{EventKind, LrudEvent, NodeSnapshot};

/// Spatial navigation engine.
///
/// Single-threaded: callbacks and listeners are not `Send`, and they only
/// ever receive owned snapshots, so they cannot reach back into the engine
/// while an operation is in flight.
#[derive(Debug, Default)]
pub struct Lrud {
    // Tree Module
    pub(crate) nodes: HashMap<String, Node>,
    pub(crate) root: Option<String>,

    // Focus Module
    pub(crate) current_focus: Option<String>,

    // Event Module
    pub(crate) emitter: Emitter,
    pub(crate) key_map: KeyMap,

    pub(crate) config: LrudConfig,
}

impl Lrud {
    pub fn new() -> Self {
        Self::with_config(LrudConfig::default())
    }

    pub fn with_config(config: LrudConfig) -> Self {
        Self {
            nodes: HashMap::new(),
            root: None,
            current_focus: None,
            emitter: Emitter::new(),
            key_map: config.key_map(),
            config,
        }
    }

    /// Drop every node, the focus and all listeners. Configuration survives.
    pub fn destroy(&mut self) {
        log::debug!("destroy: dropping {} nodes", self.nodes.len());
        self.nodes.clear();
        self.root = None;
        self.current_focus = None;
        self.emitter.clear();
    }

    pub fn on(&mut self, kind: EventKind, listener: impl FnMut(&LrudEvent) + 'static) -> ListenerId {
        self.emitter.on(kind, listener)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.emitter.off(id)
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.current_focus.as_deref()
    }

    pub fn get_focused_node(&self) -> Option<&Node> {
        self.current_focus.as_ref().and_then(|id| self.nodes.get(id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    pub fn config(&self) -> &LrudConfig {
        &self.config
    }

    pub(crate) fn snapshot(&self, id: &str) -> Option<NodeSnapshot> {
        self.nodes.get(id).map(Node::snapshot)
    }

    pub(crate) fn emit(&mut self, event: LrudEvent) {
        log::trace!("emit: {:?} {}", event.kind(), event.node_id());
        self.emitter.emit(&event);
    }
}

// ============================================================================
// Per-thread State (FFI)
// ============================================================================

/// Engine plus the queue its listeners drain into for `lrud_next_event`.
pub(crate) struct FfiContext {
    pub lrud: Lrud,
    pub events: Rc<RefCell<VecDeque<LrudEvent>>>,
}

impl FfiContext {
    fn new(config: LrudConfig) -> Self {
        let mut lrud = Lrud::with_config(config);
        let events = Rc::new(RefCell::new(VecDeque::new()));
        subscribe_queue(&mut lrud, &events);
        Self { lrud, events }
    }

    /// The engine drops its listeners on `destroy`; reattach the queue.
    pub fn reset(&mut self) {
        self.lrud.destroy();
        self.events.borrow_mut().clear();
        subscribe_queue(&mut self.lrud, &self.events);
    }
}

fn subscribe_queue(lrud: &mut Lrud, events: &Rc<RefCell<VecDeque<LrudEvent>>>) {
    for kind in [
        EventKind::Focus,
        EventKind::Blur,
        EventKind::Select,
        EventKind::Move,
        EventKind::Active,
        EventKind::Inactive,
    ] {
        let queue = Rc::clone(events);
        lrud.on(kind, move |e| queue.borrow_mut().push_back(e.clone()));
    }
}

thread_local! {
    static CONTEXT: RefCell<Option<FfiContext>> = const { RefCell::new(None) };
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Create this thread's engine.
pub(crate) fn init_context(config: LrudConfig) -> Result<()> {
    CONTEXT.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_some() {
            return Err(LrudError::AlreadyInitialized);
        }
        *slot = Some(FfiContext::new(config));
        Ok(())
    })
}

/// Drop this thread's engine. Returns whether one existed.
pub(crate) fn destroy_context() -> bool {
    CONTEXT.with(|cell| cell.borrow_mut().take().is_some())
}

/// Run `f` against this thread's engine.
pub(crate) fn with_context<T>(f: impl FnOnce(&mut FfiContext) -> Result<T>) -> Result<T> {
    CONTEXT.with(|cell| {
        let mut slot = cell.borrow_mut();
        let ctx = slot.as_mut().ok_or(LrudError::NotInitialized)?;
        f(ctx)
    })
}

pub(crate) fn set_last_error(msg: String) {
    // Interior NULs would truncate the C string anyway.
    let msg = CString::new(msg.replace('\0', " ")).unwrap_or_default();
    LAST_ERROR.with(|cell| *cell.borrow_mut() = Some(msg));
}

pub(crate) fn clear_last_error() {
    LAST_ERROR.with(|cell| *cell.borrow_mut() = None);
}

/// Pointer to the last error message, or null. Valid until the next error
/// is recorded or cleared on this thread.
pub(crate) fn last_error_ptr() -> *const std::os::raw::c_char {
    LAST_ERROR.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |msg| msg.as_ptr())
    })
}
