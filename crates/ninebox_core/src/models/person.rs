use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RosterError;

/// Stable person identifier, assigned by sorted roster position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u32);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Grid cell identifier.
///
/// "Not placed" is always `Option::None`; a numeric 0 is an ordinary id
/// that none of the built-in layouts contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(pub u8);

impl CellId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the static input roster.
///
/// `team: None` is the "no team" marker and is distinct from `Some("")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(alias = "jobLevel")]
    pub job_level: i32,
    /// 1 for male, 0 for non-male
    pub gender: u8,
    /// 1 for European, 0 for non-European
    pub ethnicity: u8,
}

impl PersonRecord {
    pub fn new(name: &str, team: Option<&str>, job_level: i32, gender: u8, ethnicity: u8) -> Self {
        Self {
            name: name.to_string(),
            team: team.map(str::to_string),
            job_level,
            gender,
            ethnicity,
        }
    }

    /// Check the record before it enters the roster.
    pub fn validate(&self, index: usize) -> Result<(), RosterError> {
        if self.name.trim().is_empty() {
            return Err(RosterError::EmptyName { index });
        }
        for (field, value) in [("gender", self.gender), ("ethnicity", self.ethnicity)] {
            if value > 1 {
                return Err(RosterError::InvalidFlag {
                    name: self.name.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// A roster member with its current grid placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub job_level: i32,
    pub gender_flag: u8,
    pub ethnicity_flag: u8,
    pub team: Option<String>,
    pub cell: Option<CellId>,
}

impl Person {
    /// Build an unplaced person from a validated record.
    pub fn from_record(id: PersonId, record: PersonRecord) -> Self {
        Self {
            id,
            name: record.name,
            job_level: record.job_level,
            gender_flag: record.gender,
            ethnicity_flag: record.ethnicity,
            team: record.team,
            cell: None,
        }
    }

    pub fn team(&self) -> Option<&str> {
        self.team.as_deref()
    }

    pub fn is_placed(&self) -> bool {
        self.cell.is_some()
    }
}
