//! # Board Session
//!
//! A `Board` owns the roster store, the team filter and the active grid
//! configuration. Every mutation runs to completion before a report is
//! read; reports are derived fresh from the current snapshot.
//!
//! ```rust
//! use ninebox_core::{Board, CellId, GridConfig, PersonId, PersonRecord};
//!
//! let records = vec![
//!     PersonRecord::new("Ada", Some("Core"), 3, 0, 1),
//!     PersonRecord::new("Grace", Some("Core"), 4, 0, 0),
//! ];
//! let mut board = Board::new(records, GridConfig::nine_box().into()).unwrap();
//! board.assign_cell(PersonId(0), Some(CellId(9))).unwrap();
//!
//! let report = board.grid_report();
//! assert_eq!(report.cell(CellId(9)).unwrap().count, 1);
//! assert_eq!(report.unplotted.count, 1);
//! ```

use serde::Serialize;
use std::sync::Arc;

use crate::analysis::{BiasAttribute, BiasEntry, BiasReport, Significance};
use crate::config::{GridConfig, DEFAULT_CONFIG};
use crate::error::{GridError, Result};
use crate::grid::{
    format_percent, GridLayout, GridReport, GroupReport, PlacementScorer, ThresholdEvaluator,
    UnplottedReport,
};
use crate::models::{CellId, Person, PersonId, PersonRecord};
use crate::roster::{Roster, RosterStore, TeamFilter, TeamToggle};

#[derive(Debug, Clone)]
pub struct Board {
    store: RosterStore,
    filter: TeamFilter,
    config: Arc<GridConfig>,
}

impl Board {
    pub fn new(records: Vec<PersonRecord>, config: Arc<GridConfig>) -> Result<Self> {
        config.validate()?;
        let store = RosterStore::from_records(records)?;
        let filter = TeamFilter::for_roster(store.roster());
        log::info!(
            "Board ready: {} persons, {} teams, {} layout",
            store.roster().len(),
            filter.entries(store.roster()).len(),
            config.layout
        );
        Ok(Self { store, filter, config })
    }

    /// Board using the process-wide default configuration.
    pub fn with_default_config(records: Vec<PersonRecord>) -> Result<Self> {
        Self::new(records, Arc::clone(&*DEFAULT_CONFIG))
    }

    pub fn layout(&self) -> GridLayout {
        self.config.layout
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        self.store.roster()
    }

    pub fn snapshot(&self) -> Arc<Roster> {
        self.store.snapshot()
    }

    /// Place or unplace a person.
    ///
    /// Unknown ids are a no-op (`Ok(false)`); a cell the active layout does
    /// not contain is rejected.
    pub fn assign_cell(&mut self, person_id: PersonId, cell: Option<CellId>) -> Result<bool> {
        if let Some(cell) = cell {
            if !self.config.layout.contains(cell) {
                return Err(GridError::CellOutsideLayout {
                    cell,
                    layout: self.config.layout,
                });
            }
        }
        Ok(self.store.assign_cell(person_id, cell))
    }

    pub fn reset_all_cells(&mut self) {
        self.store.reset_all_cells();
    }

    pub fn toggle_team(&mut self, team: Option<&str>) {
        self.filter.toggle(team);
    }

    pub fn is_team_visible(&self, team: Option<&str>) -> bool {
        self.filter.is_visible(team)
    }

    pub fn teams(&self) -> Vec<Option<&str>> {
        crate::roster::teams(self.store.roster())
    }

    pub fn team_filters(&self) -> Vec<TeamToggle> {
        self.filter.entries(self.store.roster())
    }

    pub fn visible_persons(&self) -> Vec<&Person> {
        self.filter.visible_persons(self.store.roster())
    }

    pub fn scorer(&self) -> PlacementScorer<'static> {
        PlacementScorer::new(self.config.layout.score_table())
    }

    pub fn grid_report(&self) -> GridReport {
        let cells: Vec<CellId> = self.config.layout.cells().collect();
        ThresholdEvaluator::new(
            &cells,
            &self.config.cell_thresholds,
            &self.config.group_thresholds,
        )
        .evaluate(&self.visible_persons())
    }

    pub fn bias_report(&self) -> BiasReport {
        BiasReport::compute(
            &self.visible_persons(),
            &self.scorer(),
            self.config.significance_level,
        )
    }

    /// Install a new configuration. Placements are cleared so they are never
    /// read against another layout's cells.
    pub fn switch_layout(&mut self, config: Arc<GridConfig>) -> Result<()> {
        config.validate()?;
        log::info!("Switching layout {} -> {}", self.config.layout, config.layout);
        self.config = config;
        self.store.reset_all_cells();
        Ok(())
    }

    /// Everything a renderer needs, cells in drawing order.
    pub fn summary(&self) -> BoardSummary {
        let report = self.grid_report();
        let cells = self
            .config
            .layout
            .display_order()
            .iter()
            .filter_map(|&cell| report.cell(cell))
            .map(|c| CellSummary {
                cell: c.cell,
                count: c.count,
                ratio: c.ratio,
                percent: format_percent(c.ratio),
                out_of_range: c.out_of_range,
            })
            .collect();

        BoardSummary {
            layout: self.config.layout,
            columns: self.config.layout.columns(),
            total_persons: self.store.roster().len(),
            total_visible: report.total_visible,
            teams: self.team_filters(),
            cells,
            groups: report.groups,
            unplotted: report.unplotted,
            biases: self
                .bias_report()
                .entries
                .iter()
                .map(BiasSummary::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellSummary {
    pub cell: CellId,
    pub count: usize,
    pub ratio: f64,
    pub percent: String,
    pub out_of_range: bool,
}

/// Bias entry with undefined statistics as `None` (JSON `null`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiasSummary {
    pub attribute: BiasAttribute,
    pub title: String,
    pub sample_size: usize,
    pub coefficient: Option<f64>,
    pub p_value: Option<f64>,
    pub significance: Significance,
    pub text: String,
}

impl From<&BiasEntry> for BiasSummary {
    fn from(entry: &BiasEntry) -> Self {
        let finite = |v: f64| if v.is_nan() { None } else { Some(v) };
        Self {
            attribute: entry.attribute,
            title: entry.attribute.title().to_string(),
            sample_size: entry.sample_size,
            coefficient: finite(entry.result.coefficient),
            p_value: finite(entry.result.p_value),
            significance: entry.significance,
            text: entry.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSummary {
    pub layout: GridLayout,
    pub columns: usize,
    pub total_persons: usize,
    pub total_visible: usize,
    pub teams: Vec<TeamToggle>,
    pub cells: Vec<CellSummary>,
    pub groups: Vec<GroupReport>,
    pub unplotted: UnplottedReport,
    pub biases: Vec<BiasSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::*;

    fn nine_box_board() -> Board {
        Board::new(house_roster(), Arc::new(GridConfig::nine_box())).unwrap()
    }

    fn id_of(board: &Board, name: &str) -> PersonId {
        board.roster().find_by_name(name).unwrap().id
    }

    #[test]
    fn test_assign_and_report() {
        let mut board = nine_box_board();
        let arya = id_of(&board, ARYA_STARK);
        assert!(board.assign_cell(arya, Some(CellId(5))).unwrap());

        let report = board.grid_report();
        assert_eq!(report.total_visible, 5);
        assert_eq!(report.cell(CellId(5)).unwrap().count, 1);
        assert_eq!(report.unplotted.count, 4);
    }

    #[test]
    fn test_unknown_person_is_noop() {
        let mut board = nine_box_board();
        let before = board.snapshot();
        assert!(!board.assign_cell(PersonId(99), Some(CellId(1))).unwrap());
        assert_eq!(*before, *board.snapshot());
    }

    #[test]
    fn test_rejects_cell_outside_layout() {
        let mut board = Board::new(house_roster(), Arc::new(GridConfig::three_box())).unwrap();
        let err = board.assign_cell(PersonId(0), Some(CellId(7))).unwrap_err();
        assert_eq!(err.code(), "CELL_OUTSIDE_LAYOUT");
        assert!(board.assign_cell(PersonId(0), Some(CellId(0))).is_err());
        assert!(board.roster().persons().iter().all(|p| !p.is_placed()));
    }

    #[test]
    fn test_unplace_is_allowed_in_any_layout() {
        let mut board = Board::new(house_roster(), Arc::new(GridConfig::three_box())).unwrap();
        board.assign_cell(PersonId(1), Some(CellId(3))).unwrap();
        board.assign_cell(PersonId(1), None).unwrap();
        assert!(!board.roster().get(PersonId(1)).unwrap().is_placed());
    }

    #[test]
    fn test_switch_layout_resets_placements() {
        let mut board = nine_box_board();
        for id in 0..3 {
            board.assign_cell(PersonId(id), Some(CellId(9))).unwrap();
        }
        board
            .switch_layout(Arc::new(GridConfig::three_box()))
            .unwrap();

        assert_eq!(board.layout(), GridLayout::ThreeBox);
        assert!(board.roster().iter().all(|p| p.cell.is_none()));
        assert_eq!(board.grid_report().unplotted.count, 5);
    }

    #[test]
    fn test_switch_layout_rejects_invalid_config() {
        let mut board = nine_box_board();
        board.assign_cell(PersonId(0), Some(CellId(9))).unwrap();
        let mut config = GridConfig::three_box();
        config.significance_level = 0.0;

        assert!(board.switch_layout(Arc::new(config)).is_err());
        assert_eq!(board.layout(), GridLayout::NineBox);
        assert!(board.roster().get(PersonId(0)).unwrap().is_placed());
    }

    #[test]
    fn test_hidden_team_leaves_reports() {
        let mut board = nine_box_board();
        let tyrion = id_of(&board, TYRION_LANNISTER);
        board.assign_cell(tyrion, Some(CellId(9))).unwrap();
        board.toggle_team(Some(HOUSE_LANNISTER));

        assert_eq!(board.visible_persons().len(), 4);
        let report = board.grid_report();
        assert_eq!(report.cell(CellId(9)).unwrap().count, 0);
        assert_eq!(report.unplotted.count, 4);

        let filters = board.team_filters();
        let lannister = filters
            .iter()
            .find(|t| t.team.as_deref() == Some(HOUSE_LANNISTER))
            .unwrap();
        assert!(!lannister.included);
    }

    #[test]
    fn test_three_box_high_performers_breach() {
        let mut board = Board::new(house_roster(), Arc::new(GridConfig::three_box())).unwrap();
        board.assign_cell(PersonId(0), Some(CellId(3))).unwrap();
        board.assign_cell(PersonId(1), Some(CellId(3))).unwrap();
        board.assign_cell(PersonId(2), Some(CellId(1))).unwrap();

        // 2/5 = 0.4 > 0.33
        let report = board.grid_report();
        assert!(report.groups[0].out_of_range);
        assert!(report.cell(CellId(3)).unwrap().out_of_range);
        assert!(!report.cell(CellId(1)).unwrap().out_of_range);
    }

    #[test]
    fn test_summary_in_display_order() {
        let mut board = nine_box_board();
        board.assign_cell(PersonId(0), Some(CellId(7))).unwrap();
        let summary = board.summary();

        let order: Vec<u8> = summary.cells.iter().map(|c| c.cell.get()).collect();
        assert_eq!(order, vec![7, 8, 9, 4, 5, 6, 1, 2, 3]);
        assert_eq!(summary.cells[0].percent, "20%");
        assert_eq!(summary.total_persons, 5);
        assert_eq!(summary.teams.len(), 3);
        assert_eq!(summary.biases.len(), 3);
        assert!(summary.biases.iter().all(|b| b.coefficient.is_none()));
        assert_eq!(summary.biases[0].text, "Job level bias: Not enough data");
    }

    #[test]
    fn test_default_config_board() {
        let board = Board::with_default_config(small_roster()).unwrap();
        assert!(board.config().validate().is_ok());
        assert_eq!(board.grid_report().cells.len(), board.layout().cells().count());
    }

    #[test]
    fn test_invalid_roster_is_rejected() {
        let mut records = house_roster();
        records[2].gender = 2;
        let err = Board::new(records, Arc::new(GridConfig::nine_box())).unwrap_err();
        assert_eq!(err.code(), "INVALID_FLAG");
    }
}
