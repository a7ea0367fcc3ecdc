use thiserror::Error;

use crate::grid::GridLayout;
use crate::models::CellId;

/// Errors raised while loading roster records.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    #[error("Record {index} has an empty name")]
    EmptyName { index: usize },

    #[error("Invalid {field} flag for '{name}': {value} (expected 0 or 1)")]
    InvalidFlag {
        name: String,
        field: &'static str,
        value: u8,
    },
}

/// Errors raised while loading or validating a grid configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Rule '{rule}' references cell {cell} which is not part of the {layout} layout")]
    UnknownCell {
        rule: String,
        cell: CellId,
        layout: GridLayout,
    },

    #[error("Rule '{rule}' has an empty cell set")]
    EmptyGroup { rule: String },

    #[error("Rule '{rule}' bound {value} is outside [0, 1]")]
    BoundOutOfRange { rule: String, value: f64 },

    #[error("Rule '{rule}' has min {min} greater than max {max}")]
    InvertedBounds { rule: String, min: f64, max: f64 },

    #[error("Significance level {0} must be in (0, 1)")]
    InvalidSignificance(f64),
}

/// Top-level error for board operations.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Cell {cell} is not part of the {layout} layout")]
    CellOutsideLayout { cell: CellId, layout: GridLayout },

    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl GridError {
    /// Stable machine-readable code, used by the JSON API envelope.
    pub fn code(&self) -> &'static str {
        match self {
            GridError::CellOutsideLayout { .. } => "CELL_OUTSIDE_LAYOUT",
            GridError::Roster(RosterError::EmptyName { .. }) => "EMPTY_NAME",
            GridError::Roster(RosterError::InvalidFlag { .. }) => "INVALID_FLAG",
            GridError::Config(_) => "INVALID_CONFIG",
        }
    }
}

pub type Result<T> = std::result::Result<T, GridError>;
