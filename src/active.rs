//! Active-child tracking.
//!
//! Every container remembers one child as "active": the branch focus enters
//! when the container itself is focused. Focusing a node re-points every
//! ancestor's active child towards it.

use crate::context::Lrud;
use crate::node::Node;
use crate::types::LrudEvent;

impl Lrud {
    /// The explicit active child, falling back to the first enabled child.
    pub fn active_child_of<'a>(&'a self, node: &'a Node) -> Option<&'a str> {
        node.active_child.as_deref().or_else(|| {
            node.children
                .iter()
                .find(|c| self.nodes.get(*c).is_some_and(|n| !n.is_disabled()))
                .map(String::as_str)
        })
    }

    /// Position of the resolved active child within `node.children`.
    pub(crate) fn active_index_of(&self, node: &Node) -> Option<usize> {
        self.active_child_of(node).and_then(|c| node.index_of(c))
    }

    /// Mark `child` as the active child of `id`, emitting `inactive` for the
    /// previous one and `active` for the new one when it changes.
    ///
    /// Ignored when either node is unknown, `child` is not a child of `id`,
    /// or `child` is disabled.
    pub fn set_active_child(&mut self, id: &str, child: &str) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.children.iter().any(|c| c == child) {
            return;
        }
        let Some(child_node) = self.nodes.get(child) else {
            return;
        };
        if child_node.is_disabled() || node.active_child.as_deref() == Some(child) {
            return;
        }

        let previous = node.active_child.clone();
        let entering = child_node.snapshot();

        if let Some(leaving) = previous.as_deref().and_then(|p| self.snapshot(p)) {
            self.emit(LrudEvent::Inactive(leaving));
        }
        self.emit(LrudEvent::Active(entering));

        if let Some(node) = self.nodes.get_mut(id) {
            node.active_child = Some(child.to_string());
        }
        log::trace!("set_active_child: {id} -> {child}");
    }

    /// `set_active_child` by position. Out-of-range indices are ignored.
    pub fn set_active_index(&mut self, id: &str, index: usize) {
        let Some(child) = self
            .nodes
            .get(id)
            .and_then(|n| n.children.get(index))
            .cloned()
        else {
            return;
        };
        self.set_active_child(id, &child);
    }

    /// Walk from `id` to the root, making each node its parent's active child.
    pub(crate) fn bubble_active(&mut self, id: &str) {
        let mut current = id.to_string();
        while let Some(parent) = self.nodes.get(&current).and_then(|n| n.parent.clone()) {
            self.set_active_child(&parent, &current);
            current = parent;
        }
    }
}
