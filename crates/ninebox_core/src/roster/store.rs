//! Dataset store
//!
//! Holds the canonical roster. Every change goes through `Arc::make_mut`, so a
//! snapshot handed out earlier keeps its contents; the store only ever swaps
//! in a complete new roster.

use serde::Serialize;
use std::sync::Arc;

use crate::error::RosterError;
use crate::models::{CellId, Person, PersonId, PersonRecord};

/// Immutable view of the roster at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Roster {
    persons: Vec<Person>,
}

impl Roster {
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.persons.iter().find(|p| p.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Person> {
        self.persons.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Person> {
        self.persons.iter()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Person;
    type IntoIter = std::slice::Iter<'a, Person>;

    fn into_iter(self) -> Self::IntoIter {
        self.persons.iter()
    }
}

/// Owner of the current roster snapshot.
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    current: Arc<Roster>,
}

impl RosterStore {
    /// Load records, sort them by name and assign ids by sorted position.
    pub fn from_records(records: Vec<PersonRecord>) -> Result<Self, RosterError> {
        for (index, record) in records.iter().enumerate() {
            record.validate(index)?;
        }

        let mut records = records;
        records.sort_by(|a, b| a.name.cmp(&b.name));

        let persons = records
            .into_iter()
            .enumerate()
            .map(|(idx, record)| Person::from_record(PersonId(idx as u32), record))
            .collect();

        Ok(Self {
            current: Arc::new(Roster { persons }),
        })
    }

    /// Current snapshot. Stays valid after later updates.
    pub fn snapshot(&self) -> Arc<Roster> {
        Arc::clone(&self.current)
    }

    pub fn roster(&self) -> &Roster {
        &self.current
    }

    /// Place (or unplace) one person.
    ///
    /// Unknown ids are ignored. Returns whether a person matched.
    pub fn assign_cell(&mut self, person_id: PersonId, cell: Option<CellId>) -> bool {
        let Some(idx) = self.current.persons.iter().position(|p| p.id == person_id) else {
            log::debug!("assign_cell ignored: no person with id {}", person_id);
            return false;
        };

        let roster = Arc::make_mut(&mut self.current);
        roster.persons[idx].cell = cell;
        log::debug!(
            "Person {} ({}) -> {}",
            person_id,
            roster.persons[idx].name,
            cell.map_or_else(|| "unplotted".to_string(), |c| format!("cell {}", c))
        );
        true
    }

    /// Unset every placement, keeping all other fields and ordering.
    pub fn reset_all_cells(&mut self) {
        let roster = Arc::make_mut(&mut self.current);
        for person in &mut roster.persons {
            person.cell = None;
        }
        log::info!("Reset placements for {} persons", roster.persons.len());
    }
}
