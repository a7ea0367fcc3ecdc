//! # Placement Bias
//!
//! Correlates the placement score of every placed, visible person with each
//! tracked attribute. A significant correlation means placement tracks the
//! attribute more than chance would explain.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::correlation::{correlate, CorrelationResult};
use crate::grid::PlacementScorer;
use crate::models::Person;

/// Conventional two-tailed significance level.
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasAttribute {
    JobLevel,
    Gender,
    Ethnicity,
}

impl BiasAttribute {
    pub const ALL: [BiasAttribute; 3] = [
        BiasAttribute::JobLevel,
        BiasAttribute::Gender,
        BiasAttribute::Ethnicity,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            BiasAttribute::JobLevel => "Job level bias",
            BiasAttribute::Gender => "Gender bias",
            BiasAttribute::Ethnicity => "Ethnicity bias",
        }
    }

    pub fn value_of(&self, person: &Person) -> f64 {
        match self {
            BiasAttribute::JobLevel => person.job_level as f64,
            BiasAttribute::Gender => person.gender_flag as f64,
            BiasAttribute::Ethnicity => person.ethnicity_flag as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    NotEnoughData,
    Significant,
    Insignificant,
}

impl Significance {
    pub fn classify(p_value: f64, level: f64) -> Self {
        if p_value.is_nan() {
            Significance::NotEnoughData
        } else if p_value < level {
            Significance::Significant
        } else {
            Significance::Insignificant
        }
    }
}

/// (placement score, attribute value) for every person with a scoreable cell.
pub fn placement_samples(
    persons: &[&Person],
    scorer: &PlacementScorer<'_>,
    attribute: BiasAttribute,
) -> Vec<(f64, f64)> {
    persons
        .iter()
        .filter_map(|p| {
            scorer
                .score_person(p)
                .map(|score| (score as f64, attribute.value_of(p)))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BiasEntry {
    pub attribute: BiasAttribute,
    pub sample_size: usize,
    pub result: CorrelationResult,
    pub significance: Significance,
}

impl fmt::Display for BiasEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: ", self.attribute.title())?;
        if !self.result.is_defined() {
            return f.write_str("Not enough data");
        }
        let verdict = match self.significance {
            Significance::Significant => "Significant",
            _ => "Insignificant",
        };
        write!(
            f,
            "{} (C = {:.2}, p = {:.4})",
            verdict, self.result.coefficient, self.result.p_value
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiasReport {
    pub significance_level: f64,
    pub entries: Vec<BiasEntry>,
}

impl BiasReport {
    pub fn compute(persons: &[&Person], scorer: &PlacementScorer<'_>, level: f64) -> Self {
        let entries = BiasAttribute::ALL
            .iter()
            .map(|&attribute| {
                let samples = placement_samples(persons, scorer, attribute);
                let result = correlate(&samples);
                BiasEntry {
                    attribute,
                    sample_size: samples.len(),
                    result,
                    significance: Significance::classify(result.p_value, level),
                }
            })
            .collect();

        Self {
            significance_level: level,
            entries,
        }
    }

    pub fn entry(&self, attribute: BiasAttribute) -> Option<&BiasEntry> {
        self.entries.iter().find(|e| e.attribute == attribute)
    }
}
