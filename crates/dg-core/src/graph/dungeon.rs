//! The spatial room graph built up during one generation attempt.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::node::{Connection, ConnectionType, Node, NodeType};
use super::pos::{Direction, Pos};

/// Room list plus door list, with a position index for slot lookups.
///
/// The graph is ephemeral: a fresh one is built on every generation attempt
/// and only the last successful graph survives to be handed to consumers.
#[derive(Debug, Clone, Default)]
pub struct DungeonGraph {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    index: HashMap<Pos, usize>,
}

// The index is derived state; only rooms and doors go over the wire.
#[derive(Serialize, Deserialize)]
struct GraphData {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
}

impl Serialize for DungeonGraph {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        GraphData {
            nodes: self.nodes.clone(),
            connections: self.connections.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DungeonGraph {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = GraphData::deserialize(deserializer)?;
        let mut graph = Self {
            nodes: data.nodes,
            connections: data.connections,
            index: HashMap::new(),
        };
        graph.rebuild_index();
        Ok(graph)
    }
}

impl PartialEq for DungeonGraph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.connections == other.connections
    }
}

impl DungeonGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Place a room and wire a door to every existing room sharing an edge
    /// with it, not just the one it was walked from. The door kind derives
    /// from the new room's type. Returns the doors created.
    ///
    /// Callers are expected to have validated the slot first.
    pub fn add_node(&mut self, pos: Pos, kind: NodeType) -> Vec<Connection> {
        debug_assert!(
            !self.index.contains_key(&pos),
            "room slot {pos} already occupied"
        );

        let door_kind = kind.connection_kind();
        let mut created = Vec::new();
        for direction in Direction::ALL {
            let neighbor = pos.step(direction);
            if self.index.contains_key(&neighbor) {
                let door = Connection::new(neighbor, pos, door_kind);
                self.connections.push(door);
                created.push(door);
            }
        }

        self.index.insert(pos, self.nodes.len());
        self.nodes.push(Node::new(pos, kind));
        created
    }

    /// The room whose anchor sits exactly at `pos`.
    pub fn node_at(&self, pos: Pos) -> Option<&Node> {
        self.index.get(&pos).map(|&i| &self.nodes[i])
    }

    /// The room whose footprint covers `pos`; resolves the cells a fused
    /// room spreads over, which the anchor index alone misses.
    pub fn node_covering(&self, pos: Pos) -> Option<&Node> {
        if let Some(room) = self.node_at(pos) {
            return Some(room);
        }
        self.nodes.iter().find(|room| room.covers(pos))
    }

    /// Number of occupied slots sharing an edge with `pos`.
    pub fn neighbor_count(&self, pos: Pos) -> usize {
        Direction::ALL
            .iter()
            .filter(|&&direction| self.index.contains_key(&pos.step(direction)))
            .count()
    }

    /// Number of occupied slots in the 3x3 block around `pos`, excluding
    /// `pos` itself.
    pub fn all_neighbor_count(&self, pos: Pos) -> usize {
        let mut count = 0;
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.index.contains_key(&Pos::new(pos.x + dx, pos.y + dy)) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Change the type of the room anchored at `pos`. Returns false when no
    /// room is anchored there.
    pub fn retype_node(&mut self, pos: Pos, kind: NodeType) -> bool {
        match self.index.get(&pos) {
            Some(&i) => {
                self.nodes[i].kind = kind;
                true
            }
            None => false,
        }
    }

    /// Change the kind of every door touching `pos`. Returns how many doors
    /// were retyped.
    pub fn retype_connections_at(&mut self, pos: Pos, kind: ConnectionType) -> usize {
        let mut retyped = 0;
        for door in &mut self.connections {
            if door.touches(pos) {
                door.kind = kind;
                retyped += 1;
            }
        }
        retyped
    }

    /// Drop the rooms at the given positions along with every door touching
    /// them.
    pub fn remove_nodes(&mut self, removed: &[Pos]) {
        if removed.is_empty() {
            return;
        }
        self.nodes.retain(|room| !removed.contains(&room.pos));
        self.connections
            .retain(|door| !removed.iter().any(|&pos| door.touches(pos)));
        self.rebuild_index();
    }

    /// Merge the 2x2 block anchored at `anchor` into a single `FourTile`
    /// room. The three covered rooms are dropped together with the doors
    /// internal to the block; doors crossing the block boundary keep their
    /// cell coordinates and resolve through the fused room's footprint.
    /// Returns the removed positions.
    pub fn fuse_quad(&mut self, anchor: Pos) -> [Pos; 3] {
        let east = anchor.step(Direction::East);
        let north = anchor.step(Direction::North);
        let corner = east.step(Direction::North);
        let removed = [east, north, corner];
        let block = [anchor, east, north, corner];

        self.retype_node(anchor, NodeType::FourTile);
        self.nodes.retain(|room| !removed.contains(&room.pos));
        self.connections
            .retain(|door| !(block.contains(&door.from) && block.contains(&door.to)));
        self.rebuild_index();
        removed
    }

    pub fn start_node(&self) -> Option<&Node> {
        self.nodes.iter().find(|room| room.kind == NodeType::Start)
    }

    pub fn end_node(&self) -> Option<&Node> {
        self.nodes.iter().find(|room| room.kind == NodeType::End)
    }

    /// Number of rooms of the given type.
    pub fn count_of(&self, kind: NodeType) -> usize {
        self.nodes.iter().filter(|room| room.kind == kind).count()
    }

    /// Door kind on the edge leaving `pos` in `direction`, or `None` when
    /// that edge has no door. This is the query room spawners use to pick
    /// wall/door visuals per tile edge.
    pub fn connection_from(&self, pos: Pos, direction: Direction) -> ConnectionType {
        let target = pos.step(direction);
        self.connections
            .iter()
            .find(|door| door.joins(pos, target))
            .map(|door| door.kind)
            .unwrap_or(ConnectionType::None)
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (i, room) in self.nodes.iter().enumerate() {
            self.index.insert(room.pos, i);
        }
    }
}
