//! Team filter
//!
//! Teams are keyed by `Option<&str>`: `None` is the "no team" marker and the
//! empty string is a team of its own. A team without an entry is visible.

use fxhash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::sync::Arc;

use super::store::Roster;
use crate::models::Person;

/// Distinct team values in first-seen order.
pub fn teams(roster: &Roster) -> Vec<Option<&str>> {
    let mut seen: FxHashSet<Option<&str>> = FxHashSet::default();
    roster
        .iter()
        .map(Person::team)
        .filter(|team| seen.insert(*team))
        .collect()
}

/// One row of the filter panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamToggle {
    pub team: Option<String>,
    pub included: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct TeamFlags {
    named: FxHashMap<String, bool>,
    unassigned: Option<bool>,
}

impl TeamFlags {
    fn get(&self, team: Option<&str>) -> Option<bool> {
        match team {
            Some(name) => self.named.get(name).copied(),
            None => self.unassigned,
        }
    }

    fn set(&mut self, team: Option<&str>, included: bool) {
        match team {
            Some(name) => {
                self.named.insert(name.to_string(), included);
            }
            None => self.unassigned = Some(included),
        }
    }
}

/// Inclusion flag per team.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamFilter {
    flags: Arc<TeamFlags>,
}

impl TeamFilter {
    /// Filter with every team of `roster` included.
    pub fn for_roster(roster: &Roster) -> Self {
        let mut filter = Self::default();
        filter.observe(roster);
        filter
    }

    /// Add an included entry for every team not seen before.
    pub fn observe(&mut self, roster: &Roster) {
        let unseen: Vec<Option<&str>> = teams(roster)
            .into_iter()
            .filter(|team| self.flags.get(*team).is_none())
            .collect();
        if unseen.is_empty() {
            return;
        }
        let flags = Arc::make_mut(&mut self.flags);
        for team in unseen {
            flags.set(team, true);
        }
    }

    /// `flags.get(team) ?? true`
    pub fn is_visible(&self, team: Option<&str>) -> bool {
        self.flags.get(team).unwrap_or(true)
    }

    /// Explicit entry for `team`, if one exists.
    pub fn flag(&self, team: Option<&str>) -> Option<bool> {
        self.flags.get(team)
    }

    /// Flip a team's flag. An absent team starts from visible.
    pub fn toggle(&mut self, team: Option<&str>) {
        let included = !self.is_visible(team);
        Arc::make_mut(&mut self.flags).set(team, included);
        log::debug!("Team {:?} included: {}", team, included);
    }

    /// Filter rows for the roster's teams, in first-seen order.
    pub fn entries(&self, roster: &Roster) -> Vec<TeamToggle> {
        teams(roster)
            .into_iter()
            .map(|team| TeamToggle {
                team: team.map(str::to_string),
                included: self.is_visible(team),
            })
            .collect()
    }

    /// Persons whose team is currently visible, in roster order.
    pub fn visible_persons<'a>(&self, roster: &'a Roster) -> Vec<&'a Person> {
        roster.iter().filter(|p| self.is_visible(p.team())).collect()
    }
}
