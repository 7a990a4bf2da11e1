//! Generation presets and generator configuration.

use serde::{Deserialize, Serialize};

use crate::graph::Pos;

/// Per-difficulty generation bounds.
///
/// `main_path_max` is exclusive; the drawn main-path length counts rooms on
/// the path including the start room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationPreset {
    pub main_path_min: usize,
    pub main_path_max: usize,
    pub width: i32,
    pub height: i32,
}

/// Built-in presets, indexed by difficulty.
pub const PRESETS: [GenerationPreset; 4] = [
    GenerationPreset::new(5, 7, 8, 8),
    GenerationPreset::new(7, 10, 10, 10),
    GenerationPreset::new(10, 14, 12, 12),
    GenerationPreset::new(14, 19, 16, 16),
];

impl GenerationPreset {
    pub const fn new(main_path_min: usize, main_path_max: usize, width: i32, height: i32) -> Self {
        Self {
            main_path_min,
            main_path_max,
            width,
            height,
        }
    }

    /// Preset for a difficulty index, clamped to the table so an
    /// out-of-range difficulty falls back to the hardest preset.
    pub fn for_difficulty(difficulty: usize) -> Self {
        PRESETS[difficulty.min(PRESETS.len() - 1)]
    }

    /// True when `pos` lies within the half-extent box around the origin.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x.abs() <= self.width / 2 && pos.y.abs() <= self.height / 2
    }
}

/// Knobs for one generator instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Index into the preset table, clamped to its length.
    pub difficulty: usize,
    /// Whole-layout retries before giving up.
    pub max_attempts: usize,
    /// Per-step slot retries inside the path builder.
    pub node_max_attempts: u32,
    /// Fixed seed; `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            difficulty: 0,
            max_attempts: 10,
            node_max_attempts: 8,
            seed: None,
        }
    }
}
