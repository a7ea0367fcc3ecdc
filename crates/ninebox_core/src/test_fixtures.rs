//! Shared roster fixtures for unit tests.

use crate::models::PersonRecord;

pub const ARYA_STARK: &str = "Arya Stark";
pub const NED_STARK: &str = "Ned Stark";
pub const SANSA_STARK: &str = "Sansa Stark";
pub const JON_SNOW: &str = "Jon Snow";
pub const TYRION_LANNISTER: &str = "Tyrion Lannister";

pub const HOUSE_STARK: &str = "House Stark";
pub const HOUSE_LANNISTER: &str = "House Lannister";
pub const NIGHTS_WATCH: &str = "Night's Watch";

/// Three people, deliberately out of name order.
pub fn small_roster() -> Vec<PersonRecord> {
    vec![
        PersonRecord::new(TYRION_LANNISTER, Some(HOUSE_LANNISTER), 5, 1, 1),
        PersonRecord::new(ARYA_STARK, Some(HOUSE_STARK), 5, 0, 1),
        PersonRecord::new(JON_SNOW, Some(NIGHTS_WATCH), 5, 1, 0),
    ]
}

/// Five people across three teams (sorted: Arya, Jon, Ned, Sansa, Tyrion).
pub fn house_roster() -> Vec<PersonRecord> {
    vec![
        PersonRecord::new(ARYA_STARK, Some(HOUSE_STARK), 5, 0, 1),
        PersonRecord::new(NED_STARK, Some(HOUSE_STARK), 3, 1, 1),
        PersonRecord::new(TYRION_LANNISTER, Some(HOUSE_LANNISTER), 5, 1, 1),
        PersonRecord::new(JON_SNOW, Some(NIGHTS_WATCH), 5, 1, 0),
        PersonRecord::new(SANSA_STARK, Some(HOUSE_STARK), 4, 0, 1),
    ]
}

/// `n` people spread over `teams` teams, with alternating flags.
pub fn generated_roster(n: usize, teams: usize) -> Vec<PersonRecord> {
    (0..n)
        .map(|i| PersonRecord {
            name: format!("Employee {:04}", i),
            team: Some(format!("Team {}", i % teams)),
            job_level: (i % 5) as i32 + 1,
            gender: (i % 2) as u8,
            ethnicity: ((i / 2) % 2) as u8,
        })
        .collect()
}
