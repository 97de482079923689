//! Zero-order Sugeno inference
//!
//! Rule consequents are constants registered per (output variable, fuzzy
//! set) pair. Each firing rule contributes `strength * constant` to its
//! output's numerator and `strength` to the denominator; the crisp result is
//! the weighted average. No discretization or defuzzification is involved.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::operators::{Negation, TConorm, TNorm};
use crate::rules::FuzzyRule;
use crate::variable::LinguisticVariable;

use super::{fuzzify_inputs, InferenceEngine, InferenceOutcome, InferenceStats};

/// Consequent value used when no constant is registered for a pair
pub const DEFAULT_CONSEQUENT: f64 = 0.5;

/// Zero-order Sugeno inference engine
#[derive(Debug, Clone, Default)]
pub struct SugenoEngine {
    and_op: TNorm,
    or_op: TConorm,
    not_op: Negation,
    consequents: IndexMap<String, IndexMap<String, f64>>,
}

impl SugenoEngine {
    /// Create an engine with reference operators (min AND, max OR,
    /// complement NOT) and an empty consequent table
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the logical operators
    pub fn with_operators(mut self, and_op: TNorm, or_op: TConorm, not_op: Negation) -> Self {
        self.and_op = and_op;
        self.or_op = or_op;
        self.not_op = not_op;
        self
    }

    /// Register the constant consequent for an (output variable, set) pair
    pub fn set_consequent(
        &mut self,
        variable: impl Into<String>,
        set: impl Into<String>,
        value: f64,
    ) {
        self.consequents
            .entry(variable.into())
            .or_insert_with(IndexMap::new)
            .insert(set.into(), value);
    }

    /// Builder-style [`set_consequent`](Self::set_consequent)
    pub fn with_consequent(
        mut self,
        variable: impl Into<String>,
        set: impl Into<String>,
        value: f64,
    ) -> Self {
        self.set_consequent(variable, set, value);
        self
    }

    /// Registered constant for a pair, if any
    pub fn consequent(&self, variable: &str, set: &str) -> Option<f64> {
        self.consequents.get(variable).and_then(|sets| sets.get(set)).copied()
    }
}

impl InferenceEngine for SugenoEngine {
    fn name(&self) -> &str {
        "sugeno"
    }

    fn infer(
        &self,
        crisp_inputs: &IndexMap<String, f64>,
        input_variables: &IndexMap<String, LinguisticVariable>,
        output_variables: &IndexMap<String, LinguisticVariable>,
        rules: &[FuzzyRule],
    ) -> InferenceOutcome {
        debug!(rules = rules.len(), "running sugeno inference");

        let fuzzified = fuzzify_inputs(crisp_inputs, input_variables);
        let mut stats = InferenceStats::default();

        let mut numerators: IndexMap<String, f64> =
            output_variables.keys().map(|name| (name.clone(), 0.0)).collect();
        let mut denominators: IndexMap<String, f64> =
            output_variables.keys().map(|name| (name.clone(), 0.0)).collect();

        for rule in rules {
            if !rule.is_enabled() {
                continue;
            }
            stats.rules_evaluated += 1;

            let strength = rule.evaluate_strength(&fuzzified, self.and_op, self.or_op, self.not_op);
            if strength <= 0.0 {
                continue;
            }
            stats.rules_fired += 1;
            trace!(rule = rule.name(), strength, "rule fired");

            let consequent = match rule.consequent() {
                Some(c) => c,
                None => {
                    stats.consequents_skipped += 1;
                    continue;
                }
            };
            if !numerators.contains_key(&consequent.variable) {
                stats.consequents_skipped += 1;
                continue;
            }

            let value = self
                .consequent(&consequent.variable, &consequent.set)
                .unwrap_or(DEFAULT_CONSEQUENT);

            numerators[&consequent.variable] += strength * value;
            denominators[&consequent.variable] += strength;
        }

        let mut outputs = IndexMap::new();
        for (name, variable) in output_variables {
            let denominator = denominators[name];
            let crisp = if denominator > 0.0 {
                numerators[name] / denominator
            } else {
                variable.midpoint()
            };
            outputs.insert(name.clone(), crisp);
        }

        InferenceOutcome {
            outputs,
            fuzzified_inputs: fuzzified,
            stats,
        }
    }
}
