//! # Grid Module
//!
//! - `layout` - 9-box and 3-box layouts with their static score tables
//! - `scorer` - cell id to placement score lookup
//! - `thresholds` - per-cell and per-group ratio evaluation

pub mod layout;
pub mod scorer;
pub mod thresholds;

pub use layout::{CellScore, GridLayout, NINE_BOX_SCORES, THREE_BOX_SCORES};
pub use scorer::PlacementScorer;
pub use thresholds::{
    format_percent, ratio, Bounds, CellReport, CellThreshold, GridReport, GroupReport,
    GroupThreshold, ThresholdEvaluator, UnplottedReport,
};
