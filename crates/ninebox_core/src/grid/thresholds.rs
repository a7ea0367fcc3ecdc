//! # Threshold Evaluator
//!
//! Turns the visible population into per-cell and per-group ratios and flags
//! cells whose share leaves the configured band.
//!
//! - ratio = count in scope / total visible (0 for an empty population)
//! - a rule is breached when `min` is set and ratio < min, or `max` is set
//!   and ratio > max
//! - a cell is out of range when its own rule OR any group containing it is
//!   breached

use serde::{Deserialize, Serialize};

use crate::models::{CellId, Person};

/// Optional lower and upper bound on a ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Bounds {
    pub fn max(max: f64) -> Self {
        Self { min: None, max: Some(max) }
    }

    pub fn min(min: f64) -> Self {
        Self { min: Some(min), max: None }
    }

    pub fn is_breached(&self, ratio: f64) -> bool {
        self.min.is_some_and(|min| ratio < min) || self.max.is_some_and(|max| ratio > max)
    }
}

/// Bound on a single cell's share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellThreshold {
    pub cell: CellId,
    #[serde(flatten)]
    pub bounds: Bounds,
}

/// Bound on the combined share of a named set of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupThreshold {
    pub name: String,
    pub cells: Vec<CellId>,
    #[serde(flatten)]
    pub bounds: Bounds,
}

impl GroupThreshold {
    pub fn new(name: &str, cells: &[u8], bounds: Bounds) -> Self {
        Self {
            name: name.to_string(),
            cells: cells.iter().copied().map(CellId::new).collect(),
            bounds,
        }
    }
}

/// `count / total`, defined as 0 for an empty population.
pub fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Whole-percent display of a ratio, e.g. `0.666 -> "67%"`.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellReport {
    pub cell: CellId,
    pub count: usize,
    pub ratio: f64,
    /// The cell's own rule is breached
    pub threshold_breached: bool,
    /// Some group containing the cell is breached
    pub group_breached: bool,
    pub out_of_range: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub name: String,
    pub cells: Vec<CellId>,
    pub count: usize,
    pub ratio: f64,
    pub out_of_range: bool,
}

/// Visible persons with no placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnplottedReport {
    pub count: usize,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridReport {
    pub total_visible: usize,
    /// One entry per layout cell, in the order the evaluator was given
    pub cells: Vec<CellReport>,
    pub groups: Vec<GroupReport>,
    pub unplotted: UnplottedReport,
}

impl GridReport {
    pub fn cell(&self, cell: CellId) -> Option<&CellReport> {
        self.cells.iter().find(|c| c.cell == cell)
    }

    /// Ratio for `cell`, 0 for cells outside the report.
    pub fn ratio(&self, cell: CellId) -> f64 {
        self.cell(cell).map_or(0.0, |c| c.ratio)
    }

    pub fn any_out_of_range(&self) -> bool {
        self.cells.iter().any(|c| c.out_of_range) || self.groups.iter().any(|g| g.out_of_range)
    }
}

/// Evaluates threshold tables against a population.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdEvaluator<'a> {
    cells: &'a [CellId],
    cell_rules: &'a [CellThreshold],
    group_rules: &'a [GroupThreshold],
}

impl<'a> ThresholdEvaluator<'a> {
    pub fn new(
        cells: &'a [CellId],
        cell_rules: &'a [CellThreshold],
        group_rules: &'a [GroupThreshold],
    ) -> Self {
        Self {
            cells,
            cell_rules,
            group_rules,
        }
    }

    pub fn evaluate(&self, visible: &[&Person]) -> GridReport {
        let total = visible.len();
        let count_in = |scope: &[CellId]| {
            visible
                .iter()
                .filter(|p| p.cell.is_some_and(|c| scope.contains(&c)))
                .count()
        };

        let groups: Vec<GroupReport> = self
            .group_rules
            .iter()
            .map(|rule| {
                let count = count_in(&rule.cells);
                let ratio = ratio(count, total);
                GroupReport {
                    name: rule.name.clone(),
                    cells: rule.cells.clone(),
                    count,
                    ratio,
                    out_of_range: rule.bounds.is_breached(ratio),
                }
            })
            .collect();

        let cells = self
            .cells
            .iter()
            .map(|&cell| {
                let count = count_in(std::slice::from_ref(&cell));
                let ratio = ratio(count, total);
                let threshold_breached = self
                    .cell_rules
                    .iter()
                    .filter(|rule| rule.cell == cell)
                    .any(|rule| rule.bounds.is_breached(ratio));
                let group_breached = groups
                    .iter()
                    .any(|group| group.out_of_range && group.cells.contains(&cell));
                CellReport {
                    cell,
                    count,
                    ratio,
                    threshold_breached,
                    group_breached,
                    out_of_range: threshold_breached || group_breached,
                }
            })
            .collect();

        let unplotted = visible.iter().filter(|p| !p.is_placed()).count();

        GridReport {
            total_visible: total,
            cells,
            groups,
            unplotted: UnplottedReport {
                count: unplotted,
                ratio: ratio(unplotted, total),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridLayout;
    use crate::models::{PersonId, PersonRecord};

    fn person(id: u32, cell: Option<u8>) -> Person {
        let mut p = Person::from_record(
            PersonId(id),
            PersonRecord::new(&format!("P{}", id), Some("Team"), 1, 0, 0),
        );
        p.cell = cell.map(CellId);
        p
    }

    fn nine_cells() -> Vec<CellId> {
        GridLayout::NineBox.cells().collect()
    }

    #[test]
    fn test_bounds_breach_policy() {
        let band = Bounds { min: Some(0.1), max: Some(0.3) };
        assert!(band.is_breached(0.05));
        assert!(!band.is_breached(0.1));
        assert!(!band.is_breached(0.3));
        assert!(band.is_breached(0.31));
        assert!(!Bounds::default().is_breached(1.0));
    }

    #[test]
    fn test_zero_min_is_a_real_bound() {
        // A min of 0 can never be undercut, but it is still configured.
        assert!(!Bounds::min(0.0).is_breached(0.0));
        assert!(Bounds::max(0.0).is_breached(0.01));
    }

    #[test]
    fn test_ratio_two_thirds() {
        let people = [person(0, Some(7)), person(1, Some(7)), person(2, None)];
        let visible: Vec<&Person> = people.iter().collect();
        let cells = nine_cells();
        let report = ThresholdEvaluator::new(&cells, &[], &[]).evaluate(&visible);

        assert_eq!(report.total_visible, 3);
        assert_eq!(report.cell(CellId(7)).unwrap().count, 2);
        assert!((report.ratio(CellId(7)) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(report.ratio(CellId(1)), 0.0);
        assert_eq!(report.unplotted.count, 1);
        assert!((report.unplotted.ratio - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_population_ratios_are_zero() {
        let cells = nine_cells();
        let groups = [GroupThreshold::new("top-right elbow", &[6, 8, 9], Bounds::max(0.33))];
        let report = ThresholdEvaluator::new(&cells, &[], &groups).evaluate(&[]);

        assert!(report.cells.iter().all(|c| c.ratio == 0.0 && !c.out_of_range));
        assert_eq!(report.groups[0].ratio, 0.0);
        assert_eq!(report.unplotted.ratio, 0.0);
    }

    #[test]
    fn test_group_breach_flags_member_cells() {
        let people = [
            person(0, Some(9)),
            person(1, Some(8)),
            person(2, Some(5)),
            person(3, None),
        ];
        let visible: Vec<&Person> = people.iter().collect();
        let cells = nine_cells();
        let groups = [GroupThreshold::new("top-right elbow", &[6, 8, 9], Bounds::max(0.33))];
        let report = ThresholdEvaluator::new(&cells, &[], &groups).evaluate(&visible);

        assert_eq!(report.groups[0].count, 2);
        assert!(report.groups[0].out_of_range);
        // Cell 6 is empty but still belongs to the breached group.
        for id in [6, 8, 9] {
            let cell = report.cell(CellId(id)).unwrap();
            assert!(cell.group_breached && cell.out_of_range);
            assert!(!cell.threshold_breached);
        }
        assert!(!report.cell(CellId(5)).unwrap().out_of_range);
        assert!(report.any_out_of_range());
    }

    #[test]
    fn test_cell_rule_or_group_rule() {
        let people = [person(0, Some(1)), person(1, Some(2)), person(2, Some(2)), person(3, Some(3))];
        let visible: Vec<&Person> = people.iter().collect();
        let cells = nine_cells();
        let cell_rules = [CellThreshold { cell: CellId(1), bounds: Bounds::min(0.5) }];
        let groups = [
            GroupThreshold::new("top row", &[7, 8, 9], Bounds::max(0.9)),
            GroupThreshold::new("middle", &[2], Bounds::max(0.25)),
        ];
        let report = ThresholdEvaluator::new(&cells, &cell_rules, &groups).evaluate(&visible);

        // 1/4 < 0.5
        let one = report.cell(CellId(1)).unwrap();
        assert!(one.threshold_breached && !one.group_breached && one.out_of_range);

        // 2/4 > 0.25
        let two = report.cell(CellId(2)).unwrap();
        assert!(!two.threshold_breached && two.group_breached && two.out_of_range);

        let three = report.cell(CellId(3)).unwrap();
        assert!(!three.out_of_range);
        assert!(!report.groups[0].out_of_range);
        assert!(report.groups[1].out_of_range);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(2.0 / 3.0), "67%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(1.0), "100%");
    }
}
