//! # Analysis Module
//!
//! Statistical analysis of grid placements.
//!
//! - `correlation` - Pearson correlation with two-tailed significance
//! - `bias` - placement score vs. tracked attribute report

pub mod bias;
pub mod correlation;

pub use bias::{
    placement_samples, BiasAttribute, BiasEntry, BiasReport, Significance,
    DEFAULT_SIGNIFICANCE_LEVEL,
};
pub use correlation::{correlate, pearson, two_tailed_p_value, CorrelationResult, MIN_SAMPLES};
