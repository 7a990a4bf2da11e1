//! Dungeon layout generator CLI
//!
//! Runs the generator and prints the resulting room graph, either as an
//! ASCII map for eyeballing layouts or as JSON for downstream consumers.

use anyhow::Result;
use clap::Parser;

use dg_core::{ConnectionType, Direction, DungeonGraph, Generator, GeneratorConfig, NodeType, Pos};

/// Generate a dungeon room graph
#[derive(Parser, Debug)]
#[command(name = "dg")]
#[command(author, version, about = "Generate a dungeon room graph", long_about = None)]
struct Args {
    /// RNG seed (random when omitted; the seed used is always printed)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Difficulty preset index
    #[arg(short, long, default_value_t = 0)]
    difficulty: usize,

    /// Whole-layout attempts before giving up
    #[arg(long, default_value_t = 10)]
    max_attempts: usize,

    /// Per-step slot retries in the path builder
    #[arg(long, default_value_t = 8)]
    node_attempts: u32,

    /// Print the graph as JSON instead of the map view
    #[arg(long)]
    json: bool,

    /// Replay the construction event log
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = GeneratorConfig {
        difficulty: args.difficulty,
        max_attempts: args.max_attempts,
        node_max_attempts: args.node_attempts,
        seed: args.seed,
    };
    let mut generator = Generator::new(config);
    if args.trace {
        generator.enable_tracing();
    }

    eprintln!("seed: {}", generator.seed());
    let graph = generator.generate()?;

    if args.trace {
        for event in generator.take_events() {
            println!("{event}");
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&graph)?);
    } else {
        print!("{}", render_map(&graph));
    }

    Ok(())
}

/// Draw the graph as a character grid: one glyph per room cell, with door
/// glyphs on the edges between them. Fused rooms show as a 2x2 block.
fn render_map(graph: &DungeonGraph) -> String {
    let cells: Vec<Pos> = graph
        .nodes()
        .iter()
        .flat_map(|room| room.footprint())
        .collect();
    let Some(&first) = cells.first() else {
        return String::new();
    };

    let mut min = first;
    let mut max = first;
    for &cell in &cells {
        min.x = min.x.min(cell.x);
        min.y = min.y.min(cell.y);
        max.x = max.x.max(cell.x);
        max.y = max.y.max(cell.y);
    }

    let mut out = String::new();
    for y in (min.y..=max.y).rev() {
        let mut row = String::new();
        for x in min.x..=max.x {
            let pos = Pos::new(x, y);
            row.push(room_glyph(graph, pos));
            if x < max.x {
                row.push(door_glyph(graph.connection_from(pos, Direction::East), true));
            }
        }
        out.push_str(row.trim_end());
        out.push('\n');

        if y > min.y {
            let mut row = String::new();
            for x in min.x..=max.x {
                let pos = Pos::new(x, y);
                row.push(door_glyph(graph.connection_from(pos, Direction::South), false));
                if x < max.x {
                    row.push(' ');
                }
            }
            out.push_str(row.trim_end());
            out.push('\n');
        }
    }
    out
}

fn room_glyph(graph: &DungeonGraph, pos: Pos) -> char {
    match graph.node_covering(pos).map(|room| room.kind) {
        Some(NodeType::Start) => 'S',
        Some(NodeType::End) => 'E',
        Some(NodeType::MainPath) => '#',
        Some(NodeType::Path) => 'o',
        Some(NodeType::FourTile) => 'F',
        Some(NodeType::Key) => 'K',
        Some(NodeType::Treasure) => 'T',
        Some(NodeType::Secret) => '?',
        Some(NodeType::Center) | Some(NodeType::None) | None => ' ',
    }
}

fn door_glyph(kind: ConnectionType, horizontal: bool) -> char {
    match kind {
        ConnectionType::None => ' ',
        ConnectionType::Open => {
            if horizontal {
                '-'
            } else {
                '|'
            }
        }
        ConnectionType::NeedKey => '+',
        ConnectionType::Hidden => '~',
    }
}
