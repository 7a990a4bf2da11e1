//! Randomized path walking.

use crate::events::{EventLog, GraphEvent};
use crate::graph::{Direction, DungeonGraph, NodeType, Pos};
use crate::preset::GenerationPreset;
use crate::rng::GenRng;
use crate::rules::{PathKind, is_slot_valid};

/// Walk a path of up to `length` new rooms away from `origin`.
///
/// Keeps a current direction, random at the start. Each step proposes the
/// slot one step ahead; while the proposal is invalid and the per-step
/// budget lasts, there is a 50% chance to turn to a new random direction
/// before proposing again from the same room. A step whose budget runs out
/// is skipped, so the path may end short of the requested length; the
/// caller decides whether that matters.
///
/// Returns the positions placed, in walk order.
pub fn walk_path(
    graph: &mut DungeonGraph,
    preset: &GenerationPreset,
    rng: &mut GenRng,
    origin: Pos,
    kind: PathKind,
    length: usize,
    node_max_attempts: u32,
    log: &mut EventLog,
) -> Vec<Pos> {
    let room_kind = if kind == PathKind::Main {
        NodeType::MainPath
    } else {
        NodeType::Path
    };

    let mut direction = Direction::random(rng);
    let mut previous = origin;
    let mut walked = Vec::new();

    for _ in 0..length {
        let mut slot = previous.step(direction);
        let mut attempts = 0;
        while !is_slot_valid(graph, preset, slot, kind) && attempts < node_max_attempts {
            if rng.one_in(2) {
                direction = Direction::random(rng);
            }
            slot = previous.step(direction);
            attempts += 1;
        }

        if !is_slot_valid(graph, preset, slot, kind) {
            continue;
        }

        let created = graph.add_node(slot, room_kind);
        log.push(GraphEvent::NodeAdded {
            pos: slot,
            kind: room_kind,
        });
        for door in created {
            log.push(GraphEvent::ConnectionAdded {
                from: door.from,
                to: door.to,
                kind: door.kind,
            });
        }

        previous = slot;
        walked.push(slot);
    }

    walked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset() -> GenerationPreset {
        GenerationPreset::new(5, 7, 8, 8)
    }

    #[test]
    fn test_walk_is_reproducible() {
        let preset = preset();
        let mut log = EventLog::new();

        let mut build = |seed: u64| {
            let mut graph = DungeonGraph::new();
            let mut rng = GenRng::new(seed);
            graph.add_node(Pos::new(0, 0), NodeType::Start);
            let walked = walk_path(
                &mut graph,
                &preset,
                &mut rng,
                Pos::new(0, 0),
                PathKind::Main,
                6,
                8,
                &mut log,
            );
            (walked, graph)
        };

        let (walked1, graph1) = build(1234);
        let (walked2, graph2) = build(1234);
        assert_eq!(walked1, walked2);
        assert_eq!(graph1, graph2);
    }

    #[test]
    fn test_walked_rooms_form_a_chain() {
        let preset = preset();
        for seed in 0..20 {
            let mut graph = DungeonGraph::new();
            let mut rng = GenRng::new(seed);
            let mut log = EventLog::new();
            graph.add_node(Pos::new(0, 0), NodeType::Start);
            let walked = walk_path(
                &mut graph,
                &preset,
                &mut rng,
                Pos::new(0, 0),
                PathKind::Main,
                5,
                8,
                &mut log,
            );

            assert!(walked.len() <= 5);
            let mut previous = Pos::new(0, 0);
            for &pos in &walked {
                assert!(previous.is_orthogonal_neighbor(pos));
                assert!(preset.contains(pos));
                assert_eq!(graph.node_at(pos).map(|n| n.kind), Some(NodeType::MainPath));
                previous = pos;
            }
        }
    }

    #[test]
    fn test_secondary_walk_places_plain_path_rooms() {
        let preset = preset();
        let mut graph = DungeonGraph::new();
        let mut rng = GenRng::new(9);
        let mut log = EventLog::new();
        graph.add_node(Pos::new(0, 0), NodeType::MainPath);
        let walked = walk_path(
            &mut graph,
            &preset,
            &mut rng,
            Pos::new(0, 0),
            PathKind::Secondary,
            3,
            8,
            &mut log,
        );
        for &pos in &walked {
            assert_eq!(graph.node_at(pos).map(|n| n.kind), Some(NodeType::Path));
        }
    }

    #[test]
    fn test_boxed_in_walk_places_nothing() {
        // Start fully surrounded: every step is skipped.
        let preset = preset();
        let mut graph = DungeonGraph::new();
        let mut rng = GenRng::new(3);
        let mut log = EventLog::new();
        let origin = Pos::new(0, 0);
        graph.add_node(origin, NodeType::Start);
        for direction in Direction::ALL {
            graph.add_node(origin.step(direction), NodeType::Path);
        }

        let before = graph.nodes().len();
        let walked = walk_path(
            &mut graph,
            &preset,
            &mut rng,
            origin,
            PathKind::Main,
            4,
            8,
            &mut log,
        );
        assert!(walked.is_empty());
        assert_eq!(graph.nodes().len(), before);
    }
}
