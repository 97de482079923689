//! Fuzzy sets and linguistic variables
//!
//! A linguistic variable partitions a numeric domain into named, usually
//! overlapping fuzzy sets ("low", "medium", "high"). Fuzzification maps a
//! crisp value to its membership degree in every set of the variable.

use indexmap::IndexMap;

use crate::error::{FuzzyError, FuzzyResult};
use crate::membership::MembershipFunction;

/// A named fuzzy category with a membership curve
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzySet {
    name: String,
    membership: MembershipFunction,
}

impl FuzzySet {
    pub fn new(name: impl Into<String>, membership: MembershipFunction) -> Self {
        Self {
            name: name.into(),
            membership,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Membership degree for a crisp value
    pub fn membership(&self, x: f64) -> f64 {
        self.membership.evaluate(x)
    }

    pub fn function(&self) -> &MembershipFunction {
        &self.membership
    }
}

/// A named quantity partitioned into fuzzy sets over [min_value, max_value]
///
/// Sets are kept in insertion order; adding a set under an existing name
/// replaces that set in place. Overlap between sets is expected and no
/// uniqueness-of-peak constraint is enforced.
#[derive(Debug, Clone)]
pub struct LinguisticVariable {
    name: String,
    min_value: f64,
    max_value: f64,
    sets: IndexMap<String, FuzzySet>,
}

impl LinguisticVariable {
    /// Create a variable over the domain [min_value, max_value]
    pub fn new(name: impl Into<String>, min_value: f64, max_value: f64) -> FuzzyResult<Self> {
        let name = name.into();
        if min_value >= max_value {
            return Err(FuzzyError::InvalidDomain {
                name,
                min: min_value,
                max: max_value,
            });
        }
        Ok(Self {
            name,
            min_value,
            max_value,
            sets: IndexMap::new(),
        })
    }

    /// Add a fuzzy set, replacing any previous set with the same name
    pub fn add_set(&mut self, set: FuzzySet) {
        self.sets.insert(set.name().to_string(), set);
    }

    /// Builder-style [`add_set`](Self::add_set)
    pub fn with_set(mut self, set: FuzzySet) -> Self {
        self.add_set(set);
        self
    }

    /// Fuzzify a crisp value into a degree for every owned set
    ///
    /// The value is clamped into the domain first. Sets with zero membership
    /// are included; filtering near-zero degrees is a display concern, not a
    /// contract of this method.
    pub fn fuzzify(&self, crisp_value: f64) -> IndexMap<String, f64> {
        let clamped = self.clamp(crisp_value);
        self.sets
            .iter()
            .map(|(name, set)| (name.clone(), set.membership(clamped)))
            .collect()
    }

    /// Clamp a value into the variable's domain
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min_value, self.max_value)
    }

    /// Midpoint of the domain, used as the fallback crisp value
    pub fn midpoint(&self) -> f64 {
        (self.min_value + self.max_value) / 2.0
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// All sets in insertion order
    pub fn sets(&self) -> &IndexMap<String, FuzzySet> {
        &self.sets
    }

    /// Look up a set by name
    pub fn set(&self, name: &str) -> Option<&FuzzySet> {
        self.sets.get(name)
    }
}
