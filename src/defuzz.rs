//! Defuzzification strategies
//!
//! Reduces a discretized membership curve over [min_value, max_value] to a
//! single crisp number. Strategies are substitutable without touching engine
//! code.

use serde::{Deserialize, Serialize};

/// Tolerance for treating a sample as belonging to the maximum plateau
const MAXIMUM_TOLERANCE: f64 = 1e-7;

/// Strategy for collapsing an aggregated membership curve to a crisp value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Defuzzifier {
    /// Center of gravity: `sum(x_i * mu_i) / sum(mu_i)`
    #[default]
    Centroid,
    /// Mean x-coordinate of the samples at the curve's maximum
    MeanOfMaximum,
}

impl Defuzzifier {
    /// Defuzzify a sample curve spanning [min_value, max_value]
    ///
    /// Samples are assumed evenly spaced with the first at `min_value` and
    /// the last at `max_value`. A curve with zero total membership (no rule
    /// fired) resolves to the domain midpoint.
    pub fn defuzzify(&self, curve: &[f64], min_value: f64, max_value: f64) -> f64 {
        let midpoint = (min_value + max_value) / 2.0;
        if curve.len() < 2 {
            return midpoint;
        }
        let step = (max_value - min_value) / (curve.len() - 1) as f64;

        match self {
            Defuzzifier::Centroid => {
                let mut numerator = 0.0;
                let mut denominator = 0.0;
                for (i, mu) in curve.iter().enumerate() {
                    let x = min_value + i as f64 * step;
                    numerator += x * mu;
                    denominator += mu;
                }
                if denominator > 0.0 {
                    numerator / denominator
                } else {
                    midpoint
                }
            }
            Defuzzifier::MeanOfMaximum => {
                let max_membership = curve.iter().copied().fold(0.0, f64::max);
                if max_membership == 0.0 {
                    return midpoint;
                }

                let mut sum = 0.0;
                let mut count = 0usize;
                for (i, mu) in curve.iter().enumerate() {
                    if (mu - max_membership).abs() < MAXIMUM_TOLERANCE {
                        sum += min_value + i as f64 * step;
                        count += 1;
                    }
                }
                if count > 0 {
                    sum / count as f64
                } else {
                    midpoint
                }
            }
        }
    }
}
