//! Spatial graph model
//!
//! Rooms on an integer grid, the doors between them, and the graph the
//! generator assembles and consumers walk.

mod dungeon;
mod node;
mod pos;

pub use dungeon::DungeonGraph;
pub use node::{Connection, ConnectionType, Node, NodeType};
pub use pos::{Direction, Pos};
