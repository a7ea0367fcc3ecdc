pub mod person;

pub use person::{CellId, Person, PersonId, PersonRecord};
