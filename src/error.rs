//! Structured error handling for fuzzkit
//!
//! All validation happens at configuration time: malformed membership-function
//! shapes, inverted variable domains, and degenerate discretization settings
//! fail construction with a [`FuzzyError`]. Runtime inference never returns an
//! error — out-of-range inputs are clamped and degenerate aggregations resolve
//! to the domain midpoint.

use thiserror::Error;

/// Errors raised while constructing fuzzy-system components
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    /// Triangular shape parameters out of order
    #[error("invalid triangular shape (a={a}, b={b}, c={c}): a <= b <= c required")]
    InvalidTriangle { a: f64, b: f64, c: f64 },

    /// Trapezoidal shape parameters out of order
    #[error("invalid trapezoidal shape (a={a}, b={b}, c={c}, d={d}): a <= b <= c <= d with a < d required")]
    InvalidTrapezoid { a: f64, b: f64, c: f64, d: f64 },

    /// Gaussian width must be positive
    #[error("invalid gaussian shape: sigma={sigma} must be positive")]
    InvalidSigma { sigma: f64 },

    /// A linguistic variable's domain must satisfy min < max
    #[error("invalid domain for variable '{name}': min={min}, max={max}")]
    InvalidDomain { name: String, min: f64, max: f64 },

    /// Discretization needs at least two sample points
    #[error("discretization resolution must be at least 2 sample points, got {0}")]
    InvalidResolution(usize),
}

/// Result type alias for fuzzkit operations
pub type FuzzyResult<T> = Result<T, FuzzyError>;
