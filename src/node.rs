//! Node records and the options used to create or update them.

use serde::{Deserialize, Serialize};

use crate::types::{MoveEvent, NodeFlags, NodeSnapshot, Orientation};

pub type NodeCallback = Box<dyn FnMut(&NodeSnapshot)>;
pub type MoveCallback = Box<dyn FnMut(&MoveEvent)>;

/// Per-node lifecycle hooks, invoked synchronously before the matching
/// notification is emitted.
#[derive(Default)]
pub struct NodeCallbacks {
    pub(crate) on_focus: Option<NodeCallback>,
    pub(crate) on_blur: Option<NodeCallback>,
    pub(crate) on_select: Option<NodeCallback>,
    pub(crate) on_move: Option<MoveCallback>,
}

impl std::fmt::Debug for NodeCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeCallbacks")
            .field("on_focus", &self.on_focus.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .field("on_select", &self.on_select.is_some())
            .field("on_move", &self.on_move.is_some())
            .finish()
    }
}

// ============================================================================
// Node
// ============================================================================

#[derive(Debug)]
pub struct Node {
    pub(crate) id: String,
    pub(crate) parent: Option<String>,
    pub(crate) children: Vec<String>,
    pub(crate) orientation: Orientation,
    pub(crate) active_child: Option<String>,
    pub(crate) flags: NodeFlags,
    pub(crate) callbacks: NodeCallbacks,
}

impl Node {
    /// A bare node with no parent, children or flags. Also used for stub parents.
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            children: Vec::new(),
            orientation: Orientation::None,
            active_child: None,
            flags: NodeFlags::empty(),
            callbacks: NodeCallbacks::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The explicitly remembered active child. See `Lrud::active_child_of`
    /// for the resolved one.
    pub fn active_child(&self) -> Option<&str> {
        self.active_child.as_deref()
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn is_disabled(&self) -> bool {
        self.flags.contains(NodeFlags::DISABLED)
    }

    pub fn is_grid(&self) -> bool {
        self.flags.contains(NodeFlags::GRID)
    }

    pub fn is_wrapping(&self) -> bool {
        self.flags.contains(NodeFlags::WRAPPING)
    }

    pub fn index_of(&self, child: &str) -> Option<usize> {
        self.children.iter().position(|c| c == child)
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            id: self.id.clone(),
            parent: self.parent.clone(),
            children: self.children.clone(),
            orientation: self.orientation,
            active_child: self.active_child.clone(),
            disabled: self.is_disabled(),
            grid: self.is_grid(),
            wrapping: self.is_wrapping(),
        }
    }

    /// Overwrite every field that `options` sets. The parent link is handled
    /// by the registry, which has to fix up both the old and new parent.
    pub(crate) fn apply(&mut self, options: NodeOptions) {
        let NodeOptions {
            parent: _,
            orientation,
            disabled,
            grid,
            wrapping,
            on_focus,
            on_blur,
            on_select,
            on_move,
        } = options;

        if let Some(orientation) = orientation {
            self.orientation = orientation;
        }
        if let Some(v) = disabled {
            self.flags.set(NodeFlags::DISABLED, v);
        }
        if let Some(v) = grid {
            self.flags.set(NodeFlags::GRID, v);
        }
        if let Some(v) = wrapping {
            self.flags.set(NodeFlags::WRAPPING, v);
        }
        if on_focus.is_some() {
            self.callbacks.on_focus = on_focus;
        }
        if on_blur.is_some() {
            self.callbacks.on_blur = on_blur;
        }
        if on_select.is_some() {
            self.callbacks.on_select = on_select;
        }
        if on_move.is_some() {
            self.callbacks.on_move = on_move;
        }
    }
}

// ============================================================================
// NodeOptions (builder)
// ============================================================================

/// Properties for `Lrud::register`. Unset fields keep whatever the existing
/// record holds, so re-registering only touches what is named.
#[derive(Default)]
pub struct NodeOptions {
    pub(crate) parent: Option<String>,
    pub(crate) orientation: Option<Orientation>,
    pub(crate) disabled: Option<bool>,
    pub(crate) grid: Option<bool>,
    pub(crate) wrapping: Option<bool>,
    pub(crate) on_focus: Option<NodeCallback>,
    pub(crate) on_blur: Option<NodeCallback>,
    pub(crate) on_select: Option<NodeCallback>,
    pub(crate) on_move: Option<MoveCallback>,
}

impl std::fmt::Debug for NodeOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeOptions")
            .field("parent", &self.parent)
            .field("orientation", &self.orientation)
            .field("disabled", &self.disabled)
            .field("grid", &self.grid)
            .field("wrapping", &self.wrapping)
            .finish_non_exhaustive()
    }
}

impl NodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn horizontal(self) -> Self {
        self.orientation(Orientation::Horizontal)
    }

    pub fn vertical(self) -> Self {
        self.orientation(Orientation::Vertical)
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn grid(mut self, grid: bool) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn wrapping(mut self, wrapping: bool) -> Self {
        self.wrapping = Some(wrapping);
        self
    }

    pub fn on_focus(mut self, f: impl FnMut(&NodeSnapshot) + 'static) -> Self {
        self.on_focus = Some(Box::new(f));
        self
    }

    pub fn on_blur(mut self, f: impl FnMut(&NodeSnapshot) + 'static) -> Self {
        self.on_blur = Some(Box::new(f));
        self
    }

    pub fn on_select(mut self, f: impl FnMut(&NodeSnapshot) + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    pub fn on_move(mut self, f: impl FnMut(&MoveEvent) + 'static) -> Self {
        self.on_move = Some(Box::new(f));
        self
    }
}

// ============================================================================
// NodeProps (JSON)
// ============================================================================

/// Serializable subset of [`NodeOptions`] (everything except callbacks), used
/// where properties arrive as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapping: Option<bool>,
}

impl From<NodeProps> for NodeOptions {
    fn from(props: NodeProps) -> Self {
        Self {
            parent: props.parent,
            orientation: props.orientation,
            disabled: props.disabled,
            grid: props.grid,
            wrapping: props.wrapping,
            ..Self::default()
        }
    }
}
