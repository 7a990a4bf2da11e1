//! Slot validity rules and the final structural validation pass.

use hashbrown::HashSet;
use strum::Display;

use crate::error::ValidationError;
use crate::graph::{ConnectionType, Direction, DungeonGraph, NodeType, Pos};
use crate::preset::GenerationPreset;

/// What kind of path a slot is being probed for. The rules differ per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PathKind {
    Main,
    Secondary,
    Other,
}

/// Whether a room may be placed at `pos`, as a pure function of the current
/// room set. All of the following must hold:
///
/// - inside the preset bounds, except for `Other`-kind probes which may
///   reach past them;
/// - the slot is unoccupied;
/// - for `Main` only, at most one occupied edge-neighbor, so the main path
///   cannot touch itself or fork;
/// - not within one king move of the end room.
pub fn is_slot_valid(
    graph: &DungeonGraph,
    preset: &GenerationPreset,
    pos: Pos,
    kind: PathKind,
) -> bool {
    if kind != PathKind::Other && !preset.contains(pos) {
        return false;
    }

    if graph.node_at(pos).is_some() {
        return false;
    }

    if kind == PathKind::Main && graph.neighbor_count(pos) > 1 {
        return false;
    }

    if let Some(end) = graph.end_node()
        && end.pos.chebyshev(pos) <= 1
    {
        return false;
    }

    true
}

/// The empty slots around `pos` that pass validity for `kind`.
pub fn empty_neighbors(
    graph: &DungeonGraph,
    preset: &GenerationPreset,
    pos: Pos,
    kind: PathKind,
) -> Vec<Pos> {
    Direction::ALL
        .iter()
        .map(|&direction| pos.step(direction))
        .filter(|&slot| is_slot_valid(graph, preset, slot, kind))
        .collect()
}

/// Candidate slots for dead-end rooms: empty slots that pass `Main`-kind
/// validity next to any room, so each touches exactly one existing room.
/// Slots reachable from several rooms appear once per room, which weights
/// the random pick toward them.
pub fn dead_end_slots(graph: &DungeonGraph, preset: &GenerationPreset) -> Vec<Pos> {
    let mut slots = Vec::new();
    for room in graph.nodes() {
        slots.extend(empty_neighbors(graph, preset, room.pos, PathKind::Main));
    }
    slots
}

/// Every distinct empty slot adjacent to the layout, probed with
/// `Other`-kind validity (which skips the bounds check).
pub fn open_slots(graph: &DungeonGraph, preset: &GenerationPreset) -> Vec<Pos> {
    let mut seen = HashSet::new();
    let mut slots = Vec::new();
    for room in graph.nodes() {
        for slot in empty_neighbors(graph, preset, room.pos, PathKind::Other) {
            if seen.insert(slot) {
                slots.push(slot);
            }
        }
    }
    slots
}

/// Structural checks on a finished layout: footprint uniqueness, exactly
/// one start and one end room, no dangling doors, and a locked end room.
/// Reachability and key-before-lock ordering belong here once implemented.
pub fn validate_dungeon(graph: &DungeonGraph) -> Result<(), ValidationError> {
    let mut covered = HashSet::new();
    for room in graph.nodes() {
        for cell in room.footprint() {
            if !covered.insert(cell) {
                return Err(ValidationError::OverlappingRooms { pos: cell });
            }
        }
    }

    let starts = graph.count_of(NodeType::Start);
    let ends = graph.count_of(NodeType::End);
    if starts != 1 || ends != 1 {
        return Err(ValidationError::BadEndpoints { starts, ends });
    }

    for door in graph.connections() {
        if graph.node_covering(door.from).is_none() || graph.node_covering(door.to).is_none() {
            return Err(ValidationError::DanglingConnection {
                from: door.from,
                to: door.to,
            });
        }
    }

    if let Some(end) = graph.end_node() {
        let pos = end.pos;
        for door in graph.connections().iter().filter(|door| door.touches(pos)) {
            if door.kind != ConnectionType::NeedKey {
                return Err(ValidationError::EndNotLocked {
                    pos,
                    kind: door.kind,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32, y: i32) -> Pos {
        Pos::new(x, y)
    }

    fn preset() -> GenerationPreset {
        GenerationPreset::new(5, 7, 8, 8)
    }

    #[test]
    fn test_bounds_reject_main_and_secondary_but_not_other() {
        let graph = DungeonGraph::new();
        let outside = pos(5, 0);
        assert!(!is_slot_valid(&graph, &preset(), outside, PathKind::Main));
        assert!(!is_slot_valid(&graph, &preset(), outside, PathKind::Secondary));
        assert!(is_slot_valid(&graph, &preset(), outside, PathKind::Other));
    }

    #[test]
    fn test_occupied_slot_is_invalid() {
        let mut graph = DungeonGraph::new();
        graph.add_node(pos(0, 0), NodeType::Start);
        for kind in [PathKind::Main, PathKind::Secondary, PathKind::Other] {
            assert!(!is_slot_valid(&graph, &preset(), pos(0, 0), kind));
        }
    }

    #[test]
    fn test_main_path_cannot_touch_two_rooms() {
        let mut graph = DungeonGraph::new();
        graph.add_node(pos(0, 0), NodeType::MainPath);
        graph.add_node(pos(2, 0), NodeType::Path);

        // (1, 0) touches both rooms: fine for a branch, not for the main path.
        assert!(!is_slot_valid(&graph, &preset(), pos(1, 0), PathKind::Main));
        assert!(is_slot_valid(&graph, &preset(), pos(1, 0), PathKind::Secondary));
    }

    #[test]
    fn test_end_room_is_isolated_for_every_kind() {
        let mut graph = DungeonGraph::new();
        graph.add_node(pos(0, 0), NodeType::End);
        for kind in [PathKind::Main, PathKind::Secondary, PathKind::Other] {
            assert!(!is_slot_valid(&graph, &preset(), pos(1, 1), kind));
            assert!(!is_slot_valid(&graph, &preset(), pos(0, -1), kind));
        }
        assert!(is_slot_valid(&graph, &preset(), pos(2, 0), PathKind::Secondary));
    }

    #[test]
    fn test_slot_validity_is_idempotent() {
        let mut graph = DungeonGraph::new();
        graph.add_node(pos(0, 0), NodeType::Start);
        graph.add_node(pos(1, 0), NodeType::MainPath);

        let probe = pos(1, 1);
        let first = is_slot_valid(&graph, &preset(), probe, PathKind::Main);
        for _ in 0..10 {
            assert_eq!(is_slot_valid(&graph, &preset(), probe, PathKind::Main), first);
        }
    }

    #[test]
    fn test_dead_end_slots_touch_one_room() {
        let mut graph = DungeonGraph::new();
        graph.add_node(pos(0, 0), NodeType::Start);
        graph.add_node(pos(1, 0), NodeType::MainPath);

        for slot in dead_end_slots(&graph, &preset()) {
            assert_eq!(graph.neighbor_count(slot), 1);
        }
    }

    #[test]
    fn test_open_slots_are_distinct() {
        let mut graph = DungeonGraph::new();
        graph.add_node(pos(0, 0), NodeType::Path);
        graph.add_node(pos(1, 0), NodeType::Path);

        let slots = open_slots(&graph, &preset());
        let unique: HashSet<Pos> = slots.iter().copied().collect();
        assert_eq!(slots.len(), unique.len());
        // (0, 1) and (1, 1) are each adjacent to one room; no slot repeats.
        assert!(slots.contains(&pos(0, 1)));
        assert!(slots.contains(&pos(1, 1)));
    }

    #[test]
    fn test_validation_catches_bad_endpoints() {
        let mut graph = DungeonGraph::new();
        graph.add_node(pos(0, 0), NodeType::Start);
        assert_eq!(
            validate_dungeon(&graph),
            Err(ValidationError::BadEndpoints { starts: 1, ends: 0 })
        );
    }

    #[test]
    fn test_validation_catches_unlocked_end() {
        let mut graph = DungeonGraph::new();
        graph.add_node(pos(0, 0), NodeType::Start);
        graph.add_node(pos(1, 0), NodeType::MainPath);
        graph.add_node(pos(2, 0), NodeType::MainPath);
        graph.retype_node(pos(2, 0), NodeType::End);

        // The door into the end room was wired Open and never retyped.
        assert!(matches!(
            validate_dungeon(&graph),
            Err(ValidationError::EndNotLocked { .. })
        ));

        graph.retype_connections_at(pos(2, 0), ConnectionType::NeedKey);
        assert_eq!(validate_dungeon(&graph), Ok(()));
    }
}
