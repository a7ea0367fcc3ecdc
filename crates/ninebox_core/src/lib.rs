//! # ninebox_core - Talent Grid Placement Analytics
//!
//! Core state and statistics behind a 9-box (or 3-box) talent grid: a roster
//! of persons placed into cells, a per-team visibility filter, threshold
//! checks on how the visible population is distributed, and a Pearson
//! correlation test between placement and tracked attributes.
//!
//! ## Features
//! - Copy-on-write roster snapshots
//! - Per-cell and per-group ratio thresholds
//! - Placement bias report with two-tailed significance
//! - JSON API for UI hosts

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod grid;
pub mod models;
pub mod roster;
pub mod session;

#[cfg(test)]
mod test_fixtures;

// Re-export main API functions
pub use api::{correlate_json, evaluate_board_json, ApiError, ApiResponse};
pub use error::{ConfigError, GridError, Result, RosterError};

// Re-export domain types
pub use analysis::{correlate, BiasAttribute, BiasReport, CorrelationResult, Significance};
pub use config::GridConfig;
pub use grid::{GridLayout, GridReport, PlacementScorer};
pub use models::{CellId, Person, PersonId, PersonRecord};
pub use roster::{Roster, RosterStore, TeamFilter, TeamToggle};
pub use session::{BiasSummary, Board, BoardSummary, CellSummary};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_end_to_end_board() {
        let records: Vec<PersonRecord> = (0..12)
            .map(|i| {
                let team = if i % 3 == 0 { None } else { Some("Platform") };
                PersonRecord::new(&format!("Person {:02}", i), team, i % 4 + 1, (i % 2) as u8, 0)
            })
            .collect();
        let mut board = Board::new(records, GridConfig::nine_box().into()).unwrap();

        for (id, cell) in [(0, 9), (1, 8), (2, 6), (3, 5), (4, 1), (5, 2)] {
            board.assign_cell(PersonId(id), Some(CellId(cell))).unwrap();
        }

        let summary = board.summary();
        assert_eq!(summary.total_visible, 12);
        assert_eq!(summary.unplotted.count, 6);
        // 3/12 = 0.25 is inside the elbow bound
        assert!(!summary.groups[0].out_of_range);

        board.toggle_team(None);
        let summary = board.summary();
        assert_eq!(summary.total_visible, 8);
        assert!(summary.teams.iter().any(|t| t.team.is_none() && !t.included));
    }

    #[test]
    fn test_json_entry_points_share_envelope() {
        let board = evaluate_board_json(&json!({"roster": []}).to_string());
        let corr = correlate_json(&json!({"samples": []}).to_string());

        for response in [board, corr] {
            let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
            assert_eq!(parsed["schema_version"], api::API_VERSION);
            assert_eq!(parsed["success"], true);
            assert!(parsed["timestamp"].is_string());
        }
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
