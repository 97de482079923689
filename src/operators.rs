//! Pluggable fuzzy-logic operators
//!
//! Each operator is a pure, stateless function over degrees in [0, 1],
//! represented as a tagged enum so that choices can be selected at
//! construction and swapped independently. Engines never hard-code a
//! specific pairing.
//!
//! - [`TNorm`]: conjunction (AND), satisfies `and(a, 1) = a`, `and(a, 0) = 0`
//! - [`TConorm`]: disjunction (OR), satisfies `or(a, 0) = a`, `or(a, 1) = 1`
//! - [`Negation`]: complement (NOT)
//! - [`Implication`]: rule strength x output membership (Mamdani only)
//! - [`Aggregation`]: combines implied degrees across rules (Mamdani only)

use serde::{Deserialize, Serialize};

/// Conjunction operator (t-norm)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TNorm {
    /// `min(a, b)` — the reference choice
    #[default]
    Min,
    /// `a * b`
    Product,
}

impl TNorm {
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            TNorm::Min => a.min(b),
            TNorm::Product => a * b,
        }
    }
}

/// Disjunction operator (t-conorm)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TConorm {
    /// `max(a, b)` — the reference choice
    #[default]
    Max,
    /// `a + b - a*b`
    ProbabilisticSum,
}

impl TConorm {
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            TConorm::Max => a.max(b),
            TConorm::ProbabilisticSum => a + b - a * b,
        }
    }
}

/// Negation operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Negation {
    /// `1 - x`
    #[default]
    Complement,
}

impl Negation {
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Negation::Complement => 1.0 - x,
        }
    }
}

/// Implication operator: maps (rule strength, output membership at a sample
/// point) to that point's implied degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Implication {
    /// `min(strength, membership)` (Mamdani)
    #[default]
    Min,
    /// `strength * membership` (Larsen)
    Product,
}

impl Implication {
    pub fn apply(&self, strength: f64, membership: f64) -> f64 {
        match self {
            Implication::Min => strength.min(membership),
            Implication::Product => strength * membership,
        }
    }
}

/// Aggregation operator: folds implied degrees from multiple firing rules
/// at the same sample point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// `max(a, b)` — keep the strongest contribution
    #[default]
    Max,
    /// `min(1, a + b)`
    BoundedSum,
}

impl Aggregation {
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Aggregation::Max => a.max(b),
            Aggregation::BoundedSum => (a + b).min(1.0),
        }
    }
}
