//! # Correlation Module
//!
//! Pearson correlation with a two-tailed significance test.
//!
//! ## Edge policy
//!
//! | Condition | coefficient | p_value |
//! |-----------|-------------|---------|
//! | n < 3 | NaN | NaN |
//! | zero variance in x or y | 0 | t-test with r = 0 (= 1) |
//! | r = ±1 | ±1 | 0 |
//! | otherwise | r | 2·(1 − CDF_t(\|t\|, n − 2)) |

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Fewest samples with a positive number of degrees of freedom.
pub const MIN_SAMPLES: usize = 3;

/// Coefficient and two-tailed p-value. Both are NaN when there is not enough data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub coefficient: f64,
    pub p_value: f64,
}

impl CorrelationResult {
    pub const NOT_ENOUGH_DATA: Self = Self {
        coefficient: f64::NAN,
        p_value: f64::NAN,
    };

    /// False for the not-enough-data sentinel.
    pub fn is_defined(&self) -> bool {
        !self.coefficient.is_nan()
    }
}

/// Correlate paired samples.
///
/// # Examples
/// ```
/// use ninebox_core::analysis::correlation::correlate;
///
/// let perfect = [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0), (4.0, 8.0), (5.0, 10.0)];
/// let result = correlate(&perfect);
/// assert!((result.coefficient - 1.0).abs() < 1e-9);
/// assert_eq!(result.p_value, 0.0);
///
/// // Two points carry no degrees of freedom
/// assert!(correlate(&[(1.0, 2.0), (3.0, 4.0)]).coefficient.is_nan());
/// ```
pub fn correlate(samples: &[(f64, f64)]) -> CorrelationResult {
    let n = samples.len();
    if n < MIN_SAMPLES {
        return CorrelationResult::NOT_ENOUGH_DATA;
    }

    let r = pearson(samples);
    if r == 1.0 || r == -1.0 {
        return CorrelationResult {
            coefficient: r,
            p_value: 0.0,
        };
    }

    CorrelationResult {
        coefficient: r,
        p_value: two_tailed_p_value(r, n),
    }
}

/// Pearson's r from running sums.
///
/// Zero variance on either axis yields 0. The result is clamped to [-1, 1].
pub fn pearson(samples: &[(f64, f64)]) -> f64 {
    let n = samples.len() as f64;
    let (sum_x, sum_y, sum_xy, sum_x2, sum_y2) = samples.iter().fold(
        (0.0, 0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sx2, sy2), &(x, y)| (sx + x, sy + y, sxy + x * y, sx2 + x * x, sy2 + y * y),
    );

    let numerator = n * sum_xy - sum_x * sum_y;
    let spread = (n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y);

    // Rounding can push a zero spread slightly negative.
    if spread <= 0.0 {
        return 0.0;
    }

    (numerator / spread.sqrt()).clamp(-1.0, 1.0)
}

/// Two-tailed p-value of r under H0: ρ = 0, with n − 2 degrees of freedom.
pub fn two_tailed_p_value(r: f64, n: usize) -> f64 {
    let df = n as f64 - 2.0;
    if df <= 0.0 {
        return f64::NAN;
    }

    let t = r * df.sqrt() / (1.0 - r * r).sqrt();
    if t.is_nan() {
        return f64::NAN;
    }

    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => 2.0 * (1.0 - dist.cdf(t.abs())),
        Err(_) => f64::NAN,
    }
}
