//! # Roster Module
//!
//! - `store` - canonical roster with copy-on-write snapshots
//! - `team_filter` - per-team inclusion flags and the visible population

pub mod store;
pub mod team_filter;

pub use store::{Roster, RosterStore};
pub use team_filter::{teams, TeamFilter, TeamToggle};
