//! Focus Module — blur/focus transitions.
//!
//! Focus always lands on the deepest node reachable by following active
//! children down from the requested node.

use crate::context::Lrud;
use crate::types::LrudEvent;

impl Lrud {
    /// Focus `id`, falling back to the current focus and then the root.
    ///
    /// The previous focus is blurred first, then the target's `on_focus`
    /// runs and `focus` is emitted, then every ancestor's active child is
    /// pointed at the target.
    pub fn focus(&mut self, id: Option<&str>) {
        let Some(mut target) = self.resolve_target(id, true) else {
            log::trace!("focus: nothing to focus");
            return;
        };

        while let Some(child) = self
            .nodes
            .get(&target)
            .and_then(|n| self.active_child_of(n))
        {
            target = child.to_string();
        }

        self.blur(None);

        let Some(node) = self.nodes.get_mut(&target) else {
            return;
        };
        let snapshot = node.snapshot();
        if let Some(on_focus) = node.callbacks.on_focus.as_mut() {
            on_focus(&snapshot);
        }
        self.emit(LrudEvent::Focus(snapshot));

        self.bubble_active(&target);
        log::debug!(
            "focus: {} -> {target}",
            self.current_focus.as_deref().unwrap_or("none")
        );
        self.current_focus = Some(target);
    }

    /// Run `id`'s blur hooks, falling back to the current focus.
    ///
    /// Focus bookkeeping is left alone; `focus` and `unregister` own that.
    pub fn blur(&mut self, id: Option<&str>) {
        let Some(target) = self.resolve_target(id, false) else {
            return;
        };
        let Some(node) = self.nodes.get_mut(&target) else {
            return;
        };
        let snapshot = node.snapshot();
        if let Some(on_blur) = node.callbacks.on_blur.as_mut() {
            on_blur(&snapshot);
        }
        self.emit(LrudEvent::Blur(snapshot));
    }

    /// Given id if registered, else the current focus, else (optionally) the root.
    fn resolve_target(&self, id: Option<&str>, use_root: bool) -> Option<String> {
        let known = |candidate: Option<&str>| {
            candidate
                .filter(|c| self.nodes.contains_key(*c))
                .map(str::to_string)
        };
        known(id)
            .or_else(|| known(self.current_focus.as_deref()))
            .or_else(|| if use_root { known(self.root.as_deref()) } else { None })
    }
}
