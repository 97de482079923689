//! Mamdani inference
//!
//! Rule consequents are fuzzy sets. Each firing rule's strength is implied
//! onto the consequent set's membership curve, sampled at a fixed resolution
//! over the output variable's domain; contributions from all rules are
//! aggregated pointwise and the final curve is defuzzified to one crisp
//! value per output variable.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::defuzz::Defuzzifier;
use crate::error::{FuzzyError, FuzzyResult};
use crate::operators::{Aggregation, Implication, Negation, TConorm, TNorm};
use crate::rules::FuzzyRule;
use crate::variable::LinguisticVariable;

use super::{fuzzify_inputs, InferenceEngine, InferenceOutcome, InferenceStats};

/// Default number of sample points per output curve
pub const DEFAULT_RESOLUTION: usize = 100;

/// Mamdani-style inference engine
///
/// Operator choices, the defuzzifier, and the discretization resolution are
/// all independently configurable. Higher resolution reduces the
/// quantization error of centroid-style integrals at linear cost.
#[derive(Debug, Clone)]
pub struct MamdaniEngine {
    and_op: TNorm,
    or_op: TConorm,
    not_op: Negation,
    implication: Implication,
    aggregation: Aggregation,
    defuzzifier: Defuzzifier,
    resolution: usize,
}

impl MamdaniEngine {
    /// Create an engine with reference operators (min AND, max OR,
    /// complement NOT, min implication, max aggregation, centroid
    /// defuzzification) at the given resolution
    pub fn new(resolution: usize) -> FuzzyResult<Self> {
        if resolution < 2 {
            return Err(FuzzyError::InvalidResolution(resolution));
        }
        Ok(Self {
            and_op: TNorm::default(),
            or_op: TConorm::default(),
            not_op: Negation::default(),
            implication: Implication::default(),
            aggregation: Aggregation::default(),
            defuzzifier: Defuzzifier::default(),
            resolution,
        })
    }

    /// Replace the logical operators
    pub fn with_operators(mut self, and_op: TNorm, or_op: TConorm, not_op: Negation) -> Self {
        self.and_op = and_op;
        self.or_op = or_op;
        self.not_op = not_op;
        self
    }

    pub fn with_implication(mut self, implication: Implication) -> Self {
        self.implication = implication;
        self
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn with_defuzzifier(mut self, defuzzifier: Defuzzifier) -> Self {
        self.defuzzifier = defuzzifier;
        self
    }

    /// Change the discretization resolution (>= 2 sample points)
    pub fn set_resolution(&mut self, resolution: usize) -> FuzzyResult<()> {
        if resolution < 2 {
            return Err(FuzzyError::InvalidResolution(resolution));
        }
        self.resolution = resolution;
        Ok(())
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn defuzzifier(&self) -> Defuzzifier {
        self.defuzzifier
    }
}

impl Default for MamdaniEngine {
    fn default() -> Self {
        Self {
            and_op: TNorm::default(),
            or_op: TConorm::default(),
            not_op: Negation::default(),
            implication: Implication::default(),
            aggregation: Aggregation::default(),
            defuzzifier: Defuzzifier::default(),
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl InferenceEngine for MamdaniEngine {
    fn name(&self) -> &str {
        "mamdani"
    }

    fn infer(
        &self,
        crisp_inputs: &IndexMap<String, f64>,
        input_variables: &IndexMap<String, LinguisticVariable>,
        output_variables: &IndexMap<String, LinguisticVariable>,
        rules: &[FuzzyRule],
    ) -> InferenceOutcome {
        debug!(rules = rules.len(), resolution = self.resolution, "running mamdani inference");

        let fuzzified = fuzzify_inputs(crisp_inputs, input_variables);
        let mut stats = InferenceStats::default();

        let mut curves: IndexMap<String, Vec<f64>> = output_variables
            .keys()
            .map(|name| (name.clone(), vec![0.0; self.resolution]))
            .collect();

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

            // a firing rule without a resolvable consequent contributes nothing
            let consequent = match rule.consequent() {
                Some(c) => c,
                None => {
                    stats.consequents_skipped += 1;
                    continue;
                }
            };
            let output_var = match output_variables.get(&consequent.variable) {
                Some(v) => v,
                None => {
                    stats.consequents_skipped += 1;
                    continue;
                }
            };
            let output_set = match output_var.set(&consequent.set) {
                Some(s) => s,
                None => {
                    stats.consequents_skipped += 1;
                    continue;
                }
            };

            let min = output_var.min_value();
            let max = output_var.max_value();
            let step = (max - min) / (self.resolution - 1) as f64;

            if let Some(curve) = curves.get_mut(&consequent.variable) {
                for (i, accumulated) in curve.iter_mut().enumerate() {
                    let x = min + i as f64 * step;
                    let implied = self.implication.apply(strength, output_set.membership(x));
                    *accumulated = self.aggregation.apply(*accumulated, implied);
                }
            }
        }

        let mut outputs = IndexMap::new();
        for (name, variable) in output_variables {
            if let Some(curve) = curves.get(name) {
                let crisp =
                    self.defuzzifier
                        .defuzzify(curve, variable.min_value(), variable.max_value());
                outputs.insert(name.clone(), crisp);
            }
        }

        InferenceOutcome {
            outputs,
            fuzzified_inputs: fuzzified,
            stats,
        }
    }
}
