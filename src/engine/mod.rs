//! Pluggable inference engines
//!
//! Each engine orchestrates the same pipeline — fuzzify crisp inputs,
//! evaluate every rule's firing strength, combine rule outputs — and differs
//! in how consequents are represented and reduced:
//!
//! - [`MamdaniEngine`]: consequents are fuzzy sets; contributions are implied
//!   onto a discretized curve per output variable, aggregated, then
//!   defuzzified
//! - [`SugenoEngine`]: zero-order consequents are registered constants,
//!   combined as a firing-strength-weighted average
//!
//! Engines implement [`InferenceEngine`] and are swappable on a
//! [`FuzzySystem`](crate::FuzzySystem) at any time without touching variable
//! or rule definitions.

mod mamdani;
mod sugeno;

pub use mamdani::{MamdaniEngine, DEFAULT_RESOLUTION};
pub use sugeno::{SugenoEngine, DEFAULT_CONSEQUENT};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::rules::FuzzyRule;
use crate::variable::LinguisticVariable;

/// Counters describing one inference run
///
/// `consequents_skipped` counts enabled, firing rules whose consequent could
/// not be resolved (missing consequent, unknown output variable or set) and
/// therefore contributed nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceStats {
    /// Enabled rules whose strength was evaluated
    pub rules_evaluated: usize,
    /// Rules that fired with strength > 0
    pub rules_fired: usize,
    /// Firing rules dropped for an unresolvable consequent
    pub consequents_skipped: usize,
}

/// Everything one inference run produces
#[derive(Debug, Clone)]
pub struct InferenceOutcome {
    /// Crisp value per output variable, in declaration order
    pub outputs: IndexMap<String, f64>,
    /// Membership degrees per input variable and set
    pub fuzzified_inputs: IndexMap<String, IndexMap<String, f64>>,
    /// Run counters
    pub stats: InferenceStats,
}

/// An inference strategy over a fixed variable and rule configuration
pub trait InferenceEngine: Send + Sync {
    /// Name of this engine
    fn name(&self) -> &str;

    /// Run the pipeline for one set of validated crisp inputs
    ///
    /// Inputs are assumed already clamped into each variable's domain; the
    /// caller fuzzifies nothing up front — engines fuzzify through the
    /// supplied input variables so that every variable referenced by a rule
    /// antecedent has a degree entry.
    fn infer(
        &self,
        crisp_inputs: &IndexMap<String, f64>,
        input_variables: &IndexMap<String, LinguisticVariable>,
        output_variables: &IndexMap<String, LinguisticVariable>,
        rules: &[FuzzyRule],
    ) -> InferenceOutcome;
}

/// Fuzzify every crisp input through its declared variable
pub(crate) fn fuzzify_inputs(
    crisp_inputs: &IndexMap<String, f64>,
    input_variables: &IndexMap<String, LinguisticVariable>,
) -> IndexMap<String, IndexMap<String, f64>> {
    let mut fuzzified = IndexMap::new();
    for (name, value) in crisp_inputs {
        if let Some(variable) = input_variables.get(name) {
            fuzzified.insert(name.clone(), variable.fuzzify(*value));
        }
    }
    fuzzified
}
