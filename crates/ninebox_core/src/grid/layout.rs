//! Grid layouts and their static cell score tables.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::CellId;

/// Axis components for one cell. Their sum is the placement score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellScore {
    pub cell: CellId,
    pub performance: u8,
    pub agility: u8,
}

impl CellScore {
    const fn new(cell: u8, performance: u8, agility: u8) -> Self {
        Self {
            cell: CellId::new(cell),
            performance,
            agility,
        }
    }

    pub fn placement_score(&self) -> u32 {
        self.performance as u32 + self.agility as u32
    }
}

/// Performance grows left to right, agility bottom to top.
pub const NINE_BOX_SCORES: [CellScore; 9] = [
    CellScore::new(1, 0, 0),
    CellScore::new(2, 1, 0),
    CellScore::new(3, 2, 0),
    CellScore::new(4, 0, 1),
    CellScore::new(5, 1, 1),
    CellScore::new(6, 2, 1),
    CellScore::new(7, 0, 2),
    CellScore::new(8, 1, 2),
    CellScore::new(9, 2, 2),
];

/// Single performance axis.
pub const THREE_BOX_SCORES: [CellScore; 3] = [
    CellScore::new(1, 0, 0),
    CellScore::new(2, 1, 0),
    CellScore::new(3, 2, 0),
];

/// Top row first, as the grid is drawn.
const NINE_BOX_DISPLAY: [CellId; 9] = [
    CellId::new(7),
    CellId::new(8),
    CellId::new(9),
    CellId::new(4),
    CellId::new(5),
    CellId::new(6),
    CellId::new(1),
    CellId::new(2),
    CellId::new(3),
];

const THREE_BOX_DISPLAY: [CellId; 3] = [CellId::new(1), CellId::new(2), CellId::new(3)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridLayout {
    #[default]
    NineBox,
    ThreeBox,
}

impl GridLayout {
    pub fn score_table(&self) -> &'static [CellScore] {
        match self {
            GridLayout::NineBox => &NINE_BOX_SCORES,
            GridLayout::ThreeBox => &THREE_BOX_SCORES,
        }
    }

    /// Cells in drawing order (row-major, top row first).
    pub fn display_order(&self) -> &'static [CellId] {
        match self {
            GridLayout::NineBox => &NINE_BOX_DISPLAY,
            GridLayout::ThreeBox => &THREE_BOX_DISPLAY,
        }
    }

    /// Number of columns when drawn.
    pub fn columns(&self) -> usize {
        3
    }

    /// Cells in ascending id order.
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        self.score_table().iter().map(|s| s.cell)
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.score_table().iter().any(|s| s.cell == cell)
    }

    pub fn name(&self) -> &'static str {
        match self {
            GridLayout::NineBox => "nine_box",
            GridLayout::ThreeBox => "three_box",
        }
    }

    /// Parse a layout name (case-insensitive, short forms accepted).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "nine" | "nine_box" | "ninebox" | "9" => Some(GridLayout::NineBox),
            "three" | "three_box" | "threebox" | "3" => Some(GridLayout::ThreeBox),
            _ => None,
        }
    }
}

impl fmt::Display for GridLayout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
