//! Top-level layout assembly.
//!
//! Each attempt runs main path -> secondary paths -> post rules ->
//! validation over a fresh graph. Any failure discards the attempt and the
//! whole sequence restarts, bounded by `max_attempts`.

use log::debug;

use crate::error::GenerateError;
use crate::events::{EventLog, GraphEvent};
use crate::graph::{ConnectionType, Direction, DungeonGraph, NodeType, Pos};
use crate::path::walk_path;
use crate::preset::{GenerationPreset, GeneratorConfig};
use crate::rng::GenRng;
use crate::rules::{PathKind, dead_end_slots, open_slots, validate_dungeon};

/// Dungeon layout generator.
///
/// Owns its RNG so a run is reproducible from the seed, and an event log
/// that can record the construction for replay.
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    preset: GenerationPreset,
    rng: GenRng,
    log: EventLog,
}

impl Generator {
    /// Generator for the preset selected by the configured difficulty.
    pub fn new(config: GeneratorConfig) -> Self {
        let preset = GenerationPreset::for_difficulty(config.difficulty);
        Self::with_preset(config, preset)
    }

    /// Generator for an explicit preset, bypassing the difficulty table.
    pub fn with_preset(config: GeneratorConfig, preset: GenerationPreset) -> Self {
        let rng = match config.seed {
            Some(seed) => GenRng::new(seed),
            None => GenRng::from_entropy(),
        };
        Self {
            config,
            preset,
            rng,
            log: EventLog::new(),
        }
    }

    /// The seed this generator runs on; print it to make a run reproducible.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn preset(&self) -> &GenerationPreset {
        &self.preset
    }

    /// Record construction events for later replay.
    pub fn enable_tracing(&mut self) {
        self.log.enable();
    }

    pub fn events(&self) -> &[GraphEvent] {
        self.log.events()
    }

    /// Take the recorded construction trace.
    pub fn take_events(&mut self) -> Vec<GraphEvent> {
        self.log.take()
    }

    /// Generate a layout, retrying failed attempts up to `max_attempts`.
    pub fn generate(&mut self) -> Result<DungeonGraph, GenerateError> {
        for attempt in 1..=self.config.max_attempts {
            self.log.push(GraphEvent::AttemptStarted { attempt });
            match attempt_dungeon(&self.preset, &self.config, &mut self.rng, &mut self.log) {
                Ok(graph) => {
                    debug!(
                        "generated {} rooms on attempt {}/{}",
                        graph.nodes().len(),
                        attempt,
                        self.config.max_attempts
                    );
                    self.log.push(GraphEvent::Completed {
                        attempt,
                        rooms: graph.nodes().len(),
                    });
                    return Ok(graph);
                }
                Err(err) => {
                    debug!("attempt {}/{} failed: {}", attempt, self.config.max_attempts, err);
                    self.log.push(GraphEvent::AttemptFailed {
                        attempt,
                        reason: err.to_string(),
                    });
                }
            }
        }
        Err(GenerateError::AttemptsExhausted {
            attempts: self.config.max_attempts,
        })
    }
}

/// One full generation attempt over a fresh graph.
pub fn attempt_dungeon(
    preset: &GenerationPreset,
    config: &GeneratorConfig,
    rng: &mut GenRng,
    log: &mut EventLog,
) -> Result<DungeonGraph, GenerateError> {
    let mut graph = DungeonGraph::new();
    build_main_path(&mut graph, preset, config, rng, log)?;
    build_secondary_paths(&mut graph, preset, config, rng, log);
    apply_post_rules(&mut graph, preset, rng, log)?;
    validate_dungeon(&graph)?;
    Ok(graph)
}

/// Walk the critical path from a start room at the origin, then seal its
/// far end: the last room becomes the end room and the door into it needs
/// the key.
fn build_main_path(
    graph: &mut DungeonGraph,
    preset: &GenerationPreset,
    config: &GeneratorConfig,
    rng: &mut GenRng,
    log: &mut EventLog,
) -> Result<(), GenerateError> {
    let length = rng.range(preset.main_path_min, preset.main_path_max);
    let origin = Pos::new(0, 0);
    graph.add_node(origin, NodeType::Start);
    log.push(GraphEvent::NodeAdded {
        pos: origin,
        kind: NodeType::Start,
    });

    // The drawn length counts the start room.
    let walked = walk_path(
        graph,
        preset,
        rng,
        origin,
        PathKind::Main,
        length.saturating_sub(1),
        config.node_max_attempts,
        log,
    );

    let built = walked.len() + 1;
    // The start room never doubles as the end room.
    let Some(&end_pos) = walked.last() else {
        return Err(GenerateError::MainPathTooShort {
            built,
            required: preset.main_path_min,
        });
    };
    if built < preset.main_path_min {
        return Err(GenerateError::MainPathTooShort {
            built,
            required: preset.main_path_min,
        });
    }

    graph.retype_node(end_pos, NodeType::End);
    log.push(GraphEvent::NodeRetyped {
        pos: end_pos,
        kind: NodeType::End,
    });
    graph.retype_connections_at(end_pos, ConnectionType::NeedKey);
    log.push(GraphEvent::ConnectionsRetyped {
        pos: end_pos,
        kind: ConnectionType::NeedKey,
    });
    Ok(())
}

/// Branch secondary paths off the main path. Origins are drawn without
/// replacement from the main-path rooms; every branch is a soft attempt,
/// so a branch that finds no room simply adds nothing.
fn build_secondary_paths(
    graph: &mut DungeonGraph,
    preset: &GenerationPreset,
    config: &GeneratorConfig,
    rng: &mut GenRng,
    log: &mut EventLog,
) {
    let mut candidates: Vec<Pos> = graph
        .nodes()
        .iter()
        .filter(|room| matches!(room.kind, NodeType::MainPath | NodeType::End))
        .map(|room| room.pos)
        .collect();

    let target = candidates.len() / 2;
    let length_max = (candidates.len() / 3).max(4);

    let mut built = 0;
    // Stop once the branch quota is met or the origin pool drains.
    while built <= target && !candidates.is_empty() {
        // Half the branches are single dead-end rooms.
        let length = if rng.one_in(2) {
            1
        } else {
            rng.range(2, length_max)
        };
        let index = rng.rn2(candidates.len() as u32) as usize;
        let origin = candidates.remove(index);
        walk_path(
            graph,
            preset,
            rng,
            origin,
            PathKind::Secondary,
            length,
            config.node_max_attempts,
            log,
        );
        built += 1;
    }
}

/// Post-processing over the walked layout: prune fully enclosed rooms,
/// place the key, treasure, and secret rooms, then fuse 2x2 blocks.
fn apply_post_rules(
    graph: &mut DungeonGraph,
    preset: &GenerationPreset,
    rng: &mut GenRng,
    log: &mut EventLog,
) -> Result<(), GenerateError> {
    prune_enclosed_rooms(graph, log);
    place_dead_end_room(graph, preset, rng, log, NodeType::Key)?;
    place_dead_end_room(graph, preset, rng, log, NodeType::Treasure)?;
    place_secret_room(graph, preset, log)?;
    fuse_quads(graph, log);
    Ok(())
}

/// Remove every non-start room whose 3x3 neighborhood is fully occupied.
/// Dropping them opens pockets in dense clusters instead of leaving rooms
/// no door can reach.
fn prune_enclosed_rooms(graph: &mut DungeonGraph, log: &mut EventLog) {
    let enclosed: Vec<Pos> = graph
        .nodes()
        .iter()
        .filter(|room| room.kind != NodeType::Start && graph.all_neighbor_count(room.pos) == 8)
        .map(|room| room.pos)
        .collect();

    for &pos in &enclosed {
        graph.retype_node(pos, NodeType::Center);
        log.push(GraphEvent::NodeRetyped {
            pos,
            kind: NodeType::Center,
        });
    }
    graph.remove_nodes(&enclosed);
    for &pos in &enclosed {
        log.push(GraphEvent::NodeRemoved { pos });
    }
}

/// Place a special room at a random dead-end slot.
fn place_dead_end_room(
    graph: &mut DungeonGraph,
    preset: &GenerationPreset,
    rng: &mut GenRng,
    log: &mut EventLog,
    kind: NodeType,
) -> Result<(), GenerateError> {
    let slots = dead_end_slots(graph, preset);
    let Some(&pos) = rng.choose(&slots) else {
        return Err(GenerateError::NoSpecialRoomSlot { room: kind });
    };
    add_and_log(graph, log, pos, kind);
    Ok(())
}

/// Place the secret room at the empty slot with the most 8-way neighbors,
/// the best-hidden spot in the layout and deliberately the inverse of the
/// dead-end preference used for key and treasure rooms.
fn place_secret_room(
    graph: &mut DungeonGraph,
    preset: &GenerationPreset,
    log: &mut EventLog,
) -> Result<(), GenerateError> {
    let slots = open_slots(graph, preset);
    let Some(&pos) = slots.iter().max_by_key(|&&slot| graph.all_neighbor_count(slot)) else {
        return Err(GenerateError::NoSpecialRoomSlot {
            room: NodeType::Secret,
        });
    };
    add_and_log(graph, log, pos, NodeType::Secret);
    Ok(())
}

fn add_and_log(graph: &mut DungeonGraph, log: &mut EventLog, pos: Pos, kind: NodeType) {
    let created = graph.add_node(pos, kind);
    log.push(GraphEvent::NodeAdded { pos, kind });
    for door in created {
        log.push(GraphEvent::ConnectionAdded {
            from: door.from,
            to: door.to,
            kind: door.kind,
        });
    }
}

/// Fuse every 2x2 block of plain path rooms into a single big room. The
/// anchor must be a branch room; its east, north, and north-east neighbors
/// may belong to either path kind. Fusing removes rooms and never creates
/// new anchors, so one pass in placement order visits every candidate.
fn fuse_quads(graph: &mut DungeonGraph, log: &mut EventLog) {
    let anchors: Vec<Pos> = graph
        .nodes()
        .iter()
        .filter(|room| room.kind == NodeType::Path)
        .map(|room| room.pos)
        .collect();

    for anchor in anchors {
        if !is_fusable_quad(graph, anchor) {
            continue;
        }
        let removed = graph.fuse_quad(anchor);
        log.push(GraphEvent::QuadFused { anchor });
        for pos in removed {
            log.push(GraphEvent::NodeRemoved { pos });
        }
    }
}

fn is_fusable_quad(graph: &DungeonGraph, anchor: Pos) -> bool {
    let east = anchor.step(Direction::East);
    let north = anchor.step(Direction::North);
    let corner = east.step(Direction::North);

    graph
        .node_at(anchor)
        .is_some_and(|room| room.kind == NodeType::Path)
        && [east, north, corner].iter().all(|&pos| {
            graph
                .node_at(pos)
                .is_some_and(|room| room.kind.is_path())
        })
}
