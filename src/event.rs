//! Event Module — directional key routing.
//!
//! Responsibilities:
//! - Map raw key codes to symbolic keys (via the configured `KeyMap`)
//! - Bubble a key from the focused node up to the first ancestor whose
//!   orientation matches the key's axis
//! - Resolve the next active index (wrapping, disabled skipping)
//! - Fire select / move and hand off to the focus controller

use crate::context::Lrud;
use crate::node::Node;
use crate::types::{Key, LrudEvent, MoveEvent, Position};

impl Lrud {
    /// Route a raw platform key code. Returns true if the event was consumed.
    pub fn handle_key_event(&mut self, code: u32) -> bool {
        match self.key_map.get(code) {
            Some(key) => self.handle_key(key),
            None => {
                log::trace!("handle_key_event: unmapped code {code}");
                false
            }
        }
    }

    /// Route a symbolic key from the current focus. Returns true if a select
    /// or move happened; false if the key bubbled past the root.
    pub fn handle_key(&mut self, key: Key) -> bool {
        let mut current = self.current_focus.clone();

        while let Some(id) = current {
            let Some(node) = self.nodes.get(&id) else {
                break;
            };

            if key == Key::Enter {
                self.select(&id);
                return true;
            }

            if node.orientation.responds_to(key) {
                if let Some((offset, leave, enter)) = self.resolve_move(node, key) {
                    self.apply_move(&id, offset, leave, enter);
                    return true;
                }
            }

            current = node.parent.clone();
        }

        log::debug!("handle_key: {key:?} dropped at root");
        false
    }

    fn select(&mut self, id: &str) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let snapshot = node.snapshot();
        if let Some(on_select) = node.callbacks.on_select.as_mut() {
            on_select(&snapshot);
        }
        log::debug!("select: {id}");
        self.emit(LrudEvent::Select(snapshot));
    }

    /// Offset plus leaving and entering positions, if `node` can move.
    fn resolve_move(&self, node: &Node, key: Key) -> Option<(isize, Position, Position)> {
        let offset = key.offset()?;
        let leave_index = self.active_index_of(node)?;
        let enter_index = self.next_active_index(node, offset, leave_index)?;
        Some((
            offset,
            Position {
                id: node.children[leave_index].clone(),
                index: leave_index,
            },
            Position {
                id: node.children[enter_index].clone(),
                index: enter_index,
            },
        ))
    }

    /// Step from `index` by `offset`, skipping disabled children.
    ///
    /// Without wrapping, stepping past either end yields `None`. With
    /// wrapping the search covers one full pass: if every other child is
    /// disabled it lands back on `index`, and only a container with no
    /// enabled child at all yields `None`.
    pub(crate) fn next_active_index(&self, node: &Node, offset: isize, index: usize) -> Option<usize> {
        let len = node.children.len() as isize;
        let mut current = index as isize;

        for _ in 0..len {
            let mut candidate = current + offset;
            if node.is_wrapping() {
                candidate = candidate.rem_euclid(len);
            }
            if candidate < 0 || candidate >= len {
                return None;
            }

            let disabled = self
                .nodes
                .get(&node.children[candidate as usize])
                .is_some_and(Node::is_disabled);
            if !disabled {
                return Some(candidate as usize);
            }
            current = candidate;
        }
        None
    }

    fn apply_move(&mut self, id: &str, offset: isize, leave: Position, enter: Position) {
        if self.nodes.get(id).is_some_and(Node::is_grid) {
            self.update_grid(id);
        }

        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let enter_id = enter.id.clone();
        let event = MoveEvent {
            node: node.snapshot(),
            offset,
            enter,
            leave,
        };
        if let Some(on_move) = node.callbacks.on_move.as_mut() {
            on_move(&event);
        }
        log::debug!(
            "move: {id} {} -> {} (offset {offset})",
            event.leave.id,
            event.enter.id
        );
        self.emit(LrudEvent::Move(event));

        self.focus(Some(&enter_id));
    }
}
