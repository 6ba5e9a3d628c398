//! Tree Module — node registry.
//!
//! Responsibilities:
//! - Registration (create or merge) keyed by caller-supplied id
//! - Parent-child links, with stub parents created on demand
//! - Cascading unregistration
//! - Ancestor / active-descendant search

use crate::context::Lrud;
use crate::error::{LrudError, Result};
use crate::node::{Node, NodeOptions};

impl Lrud {
    /// Create `id`, or merge `options` into the existing record.
    ///
    /// A named parent that does not exist yet is created as a bare stub.
    /// A node without a parent becomes the root; a second, different root
    /// is rejected unless `allow_root_replacement` is set.
    pub fn register(&mut self, id: &str, options: NodeOptions) -> Result<()> {
        if id.is_empty() {
            return Err(LrudError::InvalidArgument(
                "attempting to register with an empty id".to_string(),
            ));
        }

        let old_parent = self.nodes.get(id).and_then(|n| n.parent.clone());
        let parent = options.parent.clone().or_else(|| old_parent.clone());

        if let Some(p) = parent.as_deref() {
            if self.is_ancestor_or_self(id, p) {
                return Err(LrudError::InvalidArgument(format!(
                    "`{p}` cannot be the parent of `{id}`: it would create a cycle"
                )));
            }
        } else if let Some(root) = self.root.as_deref() {
            if root != id && !self.config.allow_root_replacement {
                return Err(LrudError::RootConflict {
                    id: id.to_string(),
                    root: root.to_string(),
                });
            }
        }

        let node = self
            .nodes
            .entry(id.to_string())
            .or_insert_with(|| Node::new(id));
        node.apply(options);
        node.parent = parent.clone();
        let disabled = node.is_disabled();

        if let Some(old) = old_parent.filter(|old| Some(old) != parent.as_ref()) {
            self.detach_from_parent(&old, id);
        }

        match parent {
            Some(p) => {
                let parent_node = self.nodes.entry(p.clone()).or_insert_with(|| {
                    log::debug!("register: creating stub parent `{p}` for `{id}`");
                    Node::new(p.as_str())
                });
                if !parent_node.children.iter().any(|c| c == id) {
                    parent_node.children.push(id.to_string());
                }
                if disabled && parent_node.active_child.as_deref() == Some(id) {
                    parent_node.active_child = None;
                }
                if self.root.as_deref() == Some(id) {
                    self.root = None;
                }
            }
            None => {
                if self.root.as_deref() != Some(id) {
                    if let Some(old_root) = self.root.as_deref() {
                        log::debug!("register: root `{old_root}` replaced by `{id}`");
                    }
                    self.root = Some(id.to_string());
                }
            }
        }

        log::debug!("register: id={id}");
        Ok(())
    }

    /// Remove `id` and, after its own bookkeeping, every descendant.
    /// Unknown ids are ignored.
    pub fn unregister(&mut self, id: &str) {
        let Some(parent) = self.nodes.get(id).map(|n| n.parent.clone()) else {
            log::trace!("unregister: unknown id={id}");
            return;
        };

        if let Some(p) = parent {
            self.detach_from_parent(&p, id);
        }

        if self.current_focus.as_deref() == Some(id) {
            self.blur(None);
            self.current_focus = None;
        }

        let Some(node) = self.nodes.remove(id) else {
            return;
        };
        if self.root.as_deref() == Some(id) {
            self.root = None;
        }
        log::debug!("unregister: id={id}");

        for child in &node.children {
            self.unregister(child);
        }
    }

    pub fn get_node_by_id(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Nearest strict ancestor of `id` for which `predicate` holds.
    pub fn search_up(&self, id: &str, predicate: impl Fn(&Node) -> bool) -> Option<&Node> {
        let mut current = self.nodes.get(id)?;
        while let Some(parent) = current.parent.as_ref().and_then(|p| self.nodes.get(p)) {
            if predicate(parent) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// First node on the active-child chain below `id` for which `predicate`
    /// holds. Only the active branch is searched.
    pub fn search_down(&self, id: &str, predicate: impl Fn(&Node) -> bool) -> Option<&Node> {
        let mut current = self.nodes.get(id)?;
        while let Some(child) = self
            .active_child_of(current)
            .and_then(|c| self.nodes.get(c))
        {
            if predicate(child) {
                return Some(child);
            }
            current = child;
        }
        None
    }

    fn detach_from_parent(&mut self, parent: &str, id: &str) {
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|c| c != id);
            if p.active_child.as_deref() == Some(id) {
                p.active_child = None;
            }
        }
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    fn is_ancestor_or_self(&self, ancestor: &str, id: &str) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.nodes.get(c).and_then(|n| n.parent());
        }
        false
    }
}
