//! Rooms and the doors between them.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::pos::Pos;

/// Role of a room slot in the layout.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display,
)]
pub enum NodeType {
    #[default]
    None,
    Start,
    MainPath,
    Path,
    End,
    FourTile,
    Center,
    Secret,
    Key,
    Treasure,
}

impl NodeType {
    /// Connection kind wired in when a room of this type lands next to
    /// existing rooms.
    pub const fn connection_kind(self) -> ConnectionType {
        match self {
            NodeType::None => ConnectionType::None,
            NodeType::Secret => ConnectionType::Hidden,
            NodeType::End => ConnectionType::NeedKey,
            _ => ConnectionType::Open,
        }
    }

    /// Plain corridor rooms, the only ones eligible for 2x2 fusion.
    pub const fn is_path(self) -> bool {
        matches!(self, NodeType::MainPath | NodeType::Path)
    }
}

/// Traversal requirement carried by a door.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display,
)]
pub enum ConnectionType {
    #[default]
    None,
    Open,
    NeedKey,
    Hidden,
}

/// A placed room slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub pos: Pos,
    pub kind: NodeType,
}

impl Node {
    pub const fn new(pos: Pos, kind: NodeType) -> Self {
        Self { pos, kind }
    }

    /// Grid cells occupied by this room. A `FourTile` room is anchored at
    /// its position and spreads one cell east, north, and north-east;
    /// every other room covers its own cell only.
    pub fn footprint(&self) -> Vec<Pos> {
        match self.kind {
            NodeType::FourTile => vec![
                self.pos,
                Pos::new(self.pos.x + 1, self.pos.y),
                Pos::new(self.pos.x, self.pos.y + 1),
                Pos::new(self.pos.x + 1, self.pos.y + 1),
            ],
            _ => vec![self.pos],
        }
    }

    /// True when the room's footprint includes `pos`.
    pub fn covers(&self, pos: Pos) -> bool {
        match self.kind {
            NodeType::FourTile => {
                (pos.x == self.pos.x || pos.x == self.pos.x + 1)
                    && (pos.y == self.pos.y || pos.y == self.pos.y + 1)
            }
            _ => pos == self.pos,
        }
    }
}

/// A door between two orthogonally adjacent room slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: Pos,
    pub to: Pos,
    pub kind: ConnectionType,
}

impl Connection {
    pub const fn new(from: Pos, to: Pos, kind: ConnectionType) -> Self {
        Self { from, to, kind }
    }

    /// True when either endpoint sits at `pos`.
    pub fn touches(&self, pos: Pos) -> bool {
        self.from == pos || self.to == pos
    }

    /// True when this door sits between `a` and `b`, in either order.
    pub fn joins(&self, a: Pos, b: Pos) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}
