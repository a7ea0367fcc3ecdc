//! Placement files
//!
//! CSV with header `name,cell`. An empty cell unplaces the person. Names are
//! resolved against the board's roster; unknown names are skipped.

use anyhow::{Context, Result};
use ninebox_core::{Board, CellId};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Placement {
    pub name: String,
    #[serde(default)]
    pub cell: Option<CellId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    pub applied: usize,
    pub unknown_names: usize,
}

pub fn load_placements(path: &Path) -> Result<Vec<Placement>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open placements file: {}", path.display()))?;

    reader
        .deserialize::<Placement>()
        .enumerate()
        .map(|(row, result)| {
            result.with_context(|| format!("Invalid placement on line {}", row + 2))
        })
        .collect()
}

/// Apply placements in order. A cell outside the board's layout aborts.
pub fn apply_placements(board: &mut Board, placements: &[Placement]) -> Result<ApplyStats> {
    let mut stats = ApplyStats::default();

    for placement in placements {
        let Some(id) = board.roster().find_by_name(&placement.name).map(|p| p.id) else {
            stats.unknown_names += 1;
            log::warn!("Placement for unknown person '{}' skipped", placement.name);
            continue;
        };

        board
            .assign_cell(id, placement.cell)
            .with_context(|| format!("Cannot place '{}'", placement.name))?;
        stats.applied += 1;
    }

    log::info!(
        "Applied {} placements ({} unknown names)",
        stats.applied,
        stats.unknown_names
    );
    Ok(stats)
}
