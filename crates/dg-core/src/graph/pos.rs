//! Grid positions and cardinal directions.

use core::fmt;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::rng::GenRng;

/// Integer grid position of a room slot.
///
/// The position is the unique spatial key of the layout: no two accepted
/// rooms may share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The slot one step away in the given direction.
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev distance: number of king moves between two slots.
    pub const fn chebyshev(self, other: Pos) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        if dx > dy { dx } else { dy }
    }

    /// True when `other` shares an edge with this slot.
    pub const fn is_orthogonal_neighbor(self, other: Pos) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }

    /// True when `other` is in the surrounding 3x3 block, excluding self.
    pub fn is_adjacent(self, other: Pos) -> bool {
        self != other && self.chebyshev(other) <= 1
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four cardinal unit vectors; also used as door orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Grid offset of one step in this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// Pick one of the four directions uniformly.
    pub fn random(rng: &mut GenRng) -> Self {
        Self::ALL[rng.rn2(4) as usize]
    }
}
