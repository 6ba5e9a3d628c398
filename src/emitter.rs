//! Emitter Module — synchronous observer list keyed by event kind.

use crate::types::{EventKind, LrudEvent};

pub type Listener = Box<dyn FnMut(&LrudEvent)>;

/// Handle returned by [`Emitter::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct Emitter {
    listeners: Vec<(ListenerId, EventKind, Listener)>,
    next_id: u64,
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: EventKind, listener: impl FnMut(&LrudEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, kind, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Call every listener subscribed to the event's kind, in subscription order.
    pub fn emit(&mut self, event: &LrudEvent) {
        let kind = event.kind();
        for (_, _, listener) in self.listeners.iter_mut().filter(|(_, k, _)| *k == kind) {
            listener(event);
        }
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
