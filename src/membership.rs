//! Membership function shapes
//!
//! A membership function maps a crisp value to a degree in [0, 1]. Shape
//! parameters are validated once at construction; evaluation is pure and
//! defined for every input.
//!
//! # Shapes
//!
//! - `Triangular(a, b, c)`: linear rise on [a, b], linear fall on [b, c]
//! - `Trapezoidal(a, b, c, d)`: ramps on [a, b] and [c, d], flat top on [b, c]
//! - `Gaussian(mean, sigma)`: `exp(-(x - mean)^2 / (2 sigma^2))`

use crate::error::{FuzzyError, FuzzyResult};

/// A membership-degree curve over the real line
///
/// Construct through [`triangular`](MembershipFunction::triangular),
/// [`trapezoidal`](MembershipFunction::trapezoidal), or
/// [`gaussian`](MembershipFunction::gaussian) so that shape invariants are
/// checked up front.
#[derive(Debug, Clone, PartialEq)]
pub enum MembershipFunction {
    /// Triangular: zero outside [a, c], peak of exactly 1 at b
    Triangular { a: f64, b: f64, c: f64 },
    /// Trapezoidal: zero at and beyond the outer edges, 1 on [b, c]
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    /// Gaussian bell around `mean` with width `sigma`
    Gaussian { mean: f64, sigma: f64 },
}

impl MembershipFunction {
    /// Create a triangular shape; requires a <= b <= c
    pub fn triangular(a: f64, b: f64, c: f64) -> FuzzyResult<Self> {
        if a > b || b > c {
            return Err(FuzzyError::InvalidTriangle { a, b, c });
        }
        Ok(MembershipFunction::Triangular { a, b, c })
    }

    /// Create a trapezoidal shape; requires a <= b <= c <= d with a < d
    ///
    /// Equal shoulders (a == b or c == d) are accepted so that saturated
    /// shoulder sets at a domain edge can be expressed.
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> FuzzyResult<Self> {
        if a > b || b > c || c > d || a >= d {
            return Err(FuzzyError::InvalidTrapezoid { a, b, c, d });
        }
        Ok(MembershipFunction::Trapezoidal { a, b, c, d })
    }

    /// Create a gaussian shape; requires sigma > 0
    pub fn gaussian(mean: f64, sigma: f64) -> FuzzyResult<Self> {
        if sigma <= 0.0 {
            return Err(FuzzyError::InvalidSigma { sigma });
        }
        Ok(MembershipFunction::Gaussian { mean, sigma })
    }

    /// Membership degree at `x`, always in [0, 1]
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            MembershipFunction::Triangular { a, b, c } => {
                if x < *a || x > *c {
                    0.0
                } else if x == *b {
                    1.0
                } else if x < *b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            }
            MembershipFunction::Trapezoidal { a, b, c, d } => {
                if x <= *a || x >= *d {
                    0.0
                } else if x >= *b && x <= *c {
                    1.0
                } else if x < *b {
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            }
            MembershipFunction::Gaussian { mean, sigma } => {
                (-((x - mean).powi(2)) / (2.0 * sigma * sigma)).exp()
            }
        }
    }

    /// The interval where membership is (effectively) non-zero
    ///
    /// The gaussian shape is defined everywhere; its support is reported as
    /// [mean - 3 sigma, mean + 3 sigma] for display and range purposes only.
    pub fn support(&self) -> (f64, f64) {
        match self {
            MembershipFunction::Triangular { a, c, .. } => (*a, *c),
            MembershipFunction::Trapezoidal { a, d, .. } => (*a, *d),
            MembershipFunction::Gaussian { mean, sigma } => (mean - 3.0 * sigma, mean + 3.0 * sigma),
        }
    }
}
