//! dg-core: Graph-based dungeon layout generator
//!
//! Builds a connected layout of rooms on an integer grid: a critical path
//! from a start room to a locked end room, branching side paths, and
//! special rooms, with bounded retry on failure. The crate is pure logic
//! with no I/O: the finished node/connection graph is the whole contract,
//! handed to room spawners and minimaps that own all rendering concerns.

pub mod alter;
pub mod error;
pub mod events;
pub mod generator;
pub mod graph;
pub mod path;
pub mod preset;
pub mod rules;

mod rng;

pub use alter::{AlterHandle, Alterable};
pub use error::{GenerateError, ValidationError};
pub use events::{EventLog, GraphEvent};
pub use generator::{Generator, attempt_dungeon};
pub use graph::{Connection, ConnectionType, Direction, DungeonGraph, Node, NodeType, Pos};
pub use path::walk_path;
pub use preset::{GenerationPreset, GeneratorConfig, PRESETS};
pub use rng::GenRng;
pub use rules::{PathKind, dead_end_slots, empty_neighbors, is_slot_valid, open_slots, validate_dungeon};
