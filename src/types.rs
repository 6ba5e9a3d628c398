//! Shared types, enums, and constants.
//!
//! Everything that crosses module boundaries (or the FFI boundary as JSON)
//! lives here: orientations, symbolic keys, node flags, snapshots and the
//! notification payloads.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// ============================================================================
// Orientation
// ============================================================================

/// Which key axis a container responds to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
    #[default]
    None,
}

impl Orientation {
    /// Whether this orientation responds to `key`.
    pub fn responds_to(self, key: Key) -> bool {
        match self {
            Self::Horizontal => matches!(key, Key::Left | Key::Right),
            Self::Vertical => matches!(key, Key::Up | Key::Down),
            Self::None => false,
        }
    }

    /// The crossing axis. Rows of a vertical grid are horizontal and vice versa.
    pub fn perpendicular(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
            Self::None => Self::None,
        }
    }
}

// ============================================================================
// Symbolic Keys
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Enter,
}

impl Key {
    /// Step applied to the active index: +1 forward (right/down), -1 backward.
    pub fn offset(self) -> Option<isize> {
        match self {
            Self::Right | Self::Down => Some(1),
            Self::Left | Self::Up => Some(-1),
            Self::Enter => None,
        }
    }

    /// Translate a terminal key code. Anything outside the LRUD set is `None`.
    pub fn from_crossterm(code: crossterm::event::KeyCode) -> Option<Self> {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Left => Some(Self::Left),
            KeyCode::Right => Some(Self::Right),
            KeyCode::Up => Some(Self::Up),
            KeyCode::Down => Some(Self::Down),
            KeyCode::Enter => Some(Self::Enter),
            _ => None,
        }
    }
}

// ============================================================================
// Node Flags (bitflags)
// ============================================================================

bitflags! {
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        const DISABLED = 0b0000_0001;
        const GRID     = 0b0000_0010;
        const WRAPPING = 0b0000_0100;
    }
}

// ============================================================================
// Snapshots & Notifications
// ============================================================================

/// Owned copy of a node's state at the moment a notification fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: String,
    pub parent: Option<String>,
    pub children: Vec<String>,
    pub orientation: Orientation,
    pub active_child: Option<String>,
    pub disabled: bool,
    pub grid: bool,
    pub wrapping: bool,
}

/// A child of a container identified by id and position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub node: NodeSnapshot,
    pub offset: isize,
    pub enter: Position,
    pub leave: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Focus,
    Blur,
    Select,
    Move,
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LrudEvent {
    Focus(NodeSnapshot),
    Blur(NodeSnapshot),
    Select(NodeSnapshot),
    Move(MoveEvent),
    Active(NodeSnapshot),
    Inactive(NodeSnapshot),
}

impl LrudEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Focus(_) => EventKind::Focus,
            Self::Blur(_) => EventKind::Blur,
            Self::Select(_) => EventKind::Select,
            Self::Move(_) => EventKind::Move,
            Self::Active(_) => EventKind::Active,
            Self::Inactive(_) => EventKind::Inactive,
        }
    }

    /// Id of the node the event is about (the container, for moves).
    pub fn node_id(&self) -> &str {
        match self {
            Self::Move(m) => &m.node.id,
            Self::Focus(n)
            | Self::Blur(n)
            | Self::Select(n)
            | Self::Active(n)
            | Self::Inactive(n) => &n.id,
        }
    }
}
