use super::layout::CellScore;
use crate::models::{CellId, Person};

/// Looks up placement scores in a static cell score table.
#[derive(Debug, Clone, Copy)]
pub struct PlacementScorer<'a> {
    table: &'a [CellScore],
}

impl<'a> PlacementScorer<'a> {
    pub fn new(table: &'a [CellScore]) -> Self {
        Self { table }
    }

    pub fn axes_for(&self, cell: CellId) -> Option<&'a CellScore> {
        self.table.iter().find(|s| s.cell == cell)
    }

    /// Sum of both axis components, `None` for a cell missing from the table.
    pub fn score_for(&self, cell: CellId) -> Option<u32> {
        self.axes_for(cell).map(CellScore::placement_score)
    }

    /// `None` for unplaced persons; they never enter correlation input.
    pub fn score_person(&self, person: &Person) -> Option<u32> {
        person.cell.and_then(|cell| self.score_for(cell))
    }
}
