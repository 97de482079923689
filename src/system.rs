//! Fuzzy system orchestration
//!
//! [`FuzzySystem`] owns the input/output linguistic variables, the rule
//! base, and one inference engine. It validates and clamps crisp inputs,
//! delegates to the engine, and caches the last fuzzified inputs and crisp
//! outputs for diagnostic inspection.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{InferenceEngine, InferenceStats};
use crate::rules::{FuzzyRule, RuleBase};
use crate::variable::LinguisticVariable;

/// What a configuration lint found wrong with a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// An antecedent references an undeclared input variable
    UnknownInputVariable,
    /// An antecedent references a set its variable does not own
    UnknownInputSet,
    /// The rule has no consequent
    MissingConsequent,
    /// The consequent references an undeclared output variable
    UnknownOutputVariable,
    /// The consequent references a set its variable does not own
    UnknownOutputSet,
}

/// One finding of [`FuzzySystem::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Name of the offending rule
    pub rule: String,
    pub kind: IssueKind,
    /// The dangling reference, as `variable` or `variable.set`
    pub reference: String,
}

/// A complete fuzzy-inference system
///
/// Variables and rules are append-mostly configuration; the engine is
/// swappable at any time (Mamdani <-> Sugeno) without touching variable or
/// rule definitions. The core is synchronous and single-threaded; sharing
/// one instance across threads requires external synchronization around
/// [`calculate`](Self::calculate) and rule-base mutation.
pub struct FuzzySystem {
    input_variables: IndexMap<String, LinguisticVariable>,
    output_variables: IndexMap<String, LinguisticVariable>,
    rule_base: RuleBase,
    engine: Box<dyn InferenceEngine>,
    last_fuzzified_inputs: Option<IndexMap<String, IndexMap<String, f64>>>,
    last_crisp_outputs: Option<IndexMap<String, f64>>,
    last_stats: Option<InferenceStats>,
}

impl FuzzySystem {
    /// Create a system around an inference engine
    pub fn new(engine: impl InferenceEngine + 'static) -> Self {
        Self {
            input_variables: IndexMap::new(),
            output_variables: IndexMap::new(),
            rule_base: RuleBase::new(),
            engine: Box::new(engine),
            last_fuzzified_inputs: None,
            last_crisp_outputs: None,
            last_stats: None,
        }
    }

    /// Register an input variable, keyed by its name
    pub fn add_input_variable(&mut self, variable: LinguisticVariable) {
        self.input_variables.insert(variable.name().to_string(), variable);
    }

    /// Register an output variable, keyed by its name
    pub fn add_output_variable(&mut self, variable: LinguisticVariable) {
        self.output_variables.insert(variable.name().to_string(), variable);
    }

    /// Add a rule to the rule base
    pub fn add_rule(&mut self, rule: FuzzyRule) {
        self.rule_base.add(rule);
    }

    /// Swap the inference engine; variables, rules, and caches are untouched
    pub fn set_engine(&mut self, engine: impl InferenceEngine + 'static) {
        self.engine = Box::new(engine);
    }

    /// Run one inference over the supplied crisp inputs
    ///
    /// For every declared input variable the supplied value is read (a
    /// missing entry substitutes the domain midpoint — never an error) and
    /// clamped into the variable's domain. Unknown keys in the input map are
    /// ignored. Both diagnostic caches are overwritten on every call.
    pub fn calculate(&mut self, crisp_inputs: &HashMap<String, f64>) -> IndexMap<String, f64> {
        let validated = self.validate_and_clamp(crisp_inputs);
        debug!(engine = self.engine.name(), inputs = validated.len(), "calculating");

        let outcome = self.engine.infer(
            &validated,
            &self.input_variables,
            &self.output_variables,
            self.rule_base.rules(),
        );

        self.last_fuzzified_inputs = Some(outcome.fuzzified_inputs);
        self.last_stats = Some(outcome.stats);
        self.last_crisp_outputs = Some(outcome.outputs.clone());
        outcome.outputs
    }

    fn validate_and_clamp(&self, inputs: &HashMap<String, f64>) -> IndexMap<String, f64> {
        self.input_variables
            .iter()
            .map(|(name, variable)| {
                let value = inputs.get(name).copied().unwrap_or_else(|| variable.midpoint());
                (name.clone(), variable.clamp(value))
            })
            .collect()
    }

    /// Check every rule's references against the declared variables and sets
    ///
    /// Inference tolerates dangling references by skipping them silently, so
    /// a typo in a renamed set makes a rule stop contributing without any
    /// runtime signal. Run this once after configuration changes to surface
    /// those references; it is kept off the hot inference path.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for rule in self.rule_base.rules() {
            for ant in rule.antecedents() {
                match self.input_variables.get(&ant.variable) {
                    None => issues.push(ValidationIssue {
                        rule: rule.name().to_string(),
                        kind: IssueKind::UnknownInputVariable,
                        reference: ant.variable.clone(),
                    }),
                    Some(variable) if variable.set(&ant.set).is_none() => {
                        issues.push(ValidationIssue {
                            rule: rule.name().to_string(),
                            kind: IssueKind::UnknownInputSet,
                            reference: format!("{}.{}", ant.variable, ant.set),
                        })
                    }
                    _ => {}
                }
            }

            match rule.consequent() {
                None => issues.push(ValidationIssue {
                    rule: rule.name().to_string(),
                    kind: IssueKind::MissingConsequent,
                    reference: String::new(),
                }),
                Some(consequent) => match self.output_variables.get(&consequent.variable) {
                    None => issues.push(ValidationIssue {
                        rule: rule.name().to_string(),
                        kind: IssueKind::UnknownOutputVariable,
                        reference: consequent.variable.clone(),
                    }),
                    Some(variable) if variable.set(&consequent.set).is_none() => {
                        issues.push(ValidationIssue {
                            rule: rule.name().to_string(),
                            kind: IssueKind::UnknownOutputSet,
                            reference: format!("{}.{}", consequent.variable, consequent.set),
                        })
                    }
                    _ => {}
                },
            }
        }

        issues
    }

    // ========================================================================
    // Accessors and diagnostics
    // ========================================================================

    pub fn input_variables(&self) -> &IndexMap<String, LinguisticVariable> {
        &self.input_variables
    }

    pub fn output_variables(&self) -> &IndexMap<String, LinguisticVariable> {
        &self.output_variables
    }

    pub fn rule_base(&self) -> &RuleBase {
        &self.rule_base
    }

    pub fn rule_base_mut(&mut self) -> &mut RuleBase {
        &mut self.rule_base
    }

    pub fn engine(&self) -> &dyn InferenceEngine {
        self.engine.as_ref()
    }

    /// Membership degrees per input variable from the most recent
    /// [`calculate`](Self::calculate) call; `None` before the first call
    pub fn last_fuzzified_inputs(&self) -> Option<&IndexMap<String, IndexMap<String, f64>>> {
        self.last_fuzzified_inputs.as_ref()
    }

    /// Crisp outputs from the most recent call; `None` before the first call
    pub fn last_crisp_outputs(&self) -> Option<&IndexMap<String, f64>> {
        self.last_crisp_outputs.as_ref()
    }

    /// Run counters from the most recent call
    pub fn last_stats(&self) -> Option<InferenceStats> {
        self.last_stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defuzz::Defuzzifier;
    use crate::engine::{MamdaniEngine, SugenoEngine};
    use crate::membership::MembershipFunction;
    use crate::rules::FuzzyRule;
    use crate::variable::FuzzySet;

    fn mood_variables(system: &mut FuzzySystem) {
        let heart_rate = LinguisticVariable::new("heartRate", 50.0, 120.0)
            .unwrap()
            .with_set(FuzzySet::new(
                "low",
                MembershipFunction::trapezoidal(50.0, 50.0, 60.0, 70.0).unwrap(),
            ))
            .with_set(FuzzySet::new(
                "medium",
                MembershipFunction::triangular(65.0, 77.5, 90.0).unwrap(),
            ))
            .with_set(FuzzySet::new(
                "high",
                MembershipFunction::trapezoidal(85.0, 95.0, 120.0, 120.0).unwrap(),
            ));
        system.add_input_variable(heart_rate);

        let expression = LinguisticVariable::new("facialExpression", 0.0, 10.0)
            .unwrap()
            .with_set(FuzzySet::new(
                "frown",
                MembershipFunction::trapezoidal(0.0, 0.0, 2.0, 4.0).unwrap(),
            ))
            .with_set(FuzzySet::new(
                "neutral",
                MembershipFunction::triangular(3.0, 5.0, 7.0).unwrap(),
            ))
            .with_set(FuzzySet::new(
                "smile",
                MembershipFunction::trapezoidal(6.0, 8.0, 10.0, 10.0).unwrap(),
            ));
        system.add_input_variable(expression);

        let time_of_day = LinguisticVariable::new("timeOfDay", 0.0, 24.0)
            .unwrap()
            .with_set(FuzzySet::new(
                "night",
                MembershipFunction::trapezoidal(0.0, 0.0, 6.0, 8.0).unwrap(),
            ))
            .with_set(FuzzySet::new(
                "morning",
                MembershipFunction::trapezoidal(6.0, 8.0, 11.0, 13.0).unwrap(),
            ))
            .with_set(FuzzySet::new(
                "afternoon",
                MembershipFunction::triangular(12.0, 15.0, 18.0).unwrap(),
            ))
            .with_set(FuzzySet::new(
                "evening",
                MembershipFunction::trapezoidal(17.0, 20.0, 24.0, 24.0).unwrap(),
            ));
        system.add_input_variable(time_of_day);

        let music_mood = LinguisticVariable::new("musicMood", 0.0, 100.0)
            .unwrap()
            .with_set(FuzzySet::new(
                "calm",
                MembershipFunction::trapezoidal(0.0, 0.0, 10.0, 25.0).unwrap(),
            ))
            .with_set(FuzzySet::new(
                "chill",
                MembershipFunction::triangular(15.0, 30.0, 45.0).unwrap(),
            ))
            .with_set(FuzzySet::new(
                "neutral",
                MembershipFunction::triangular(35.0, 50.0, 65.0).unwrap(),
            ))
            .with_set(FuzzySet::new(
                "upbeat",
                MembershipFunction::triangular(55.0, 70.0, 85.0).unwrap(),
            ))
            .with_set(FuzzySet::new(
                "energetic",
                MembershipFunction::trapezoidal(75.0, 90.0, 100.0, 100.0).unwrap(),
            ));
        system.add_output_variable(music_mood);
    }

    fn mood_rules(system: &mut FuzzySystem) {
        system.add_rule(
            FuzzyRule::new("low_hr_sad_face")
                .when("heartRate", "low")
                .and("facialExpression", "frown")
                .then("musicMood", "calm"),
        );
        system.add_rule(
            FuzzyRule::new("high_hr_happy_face")
                .when("heartRate", "high")
                .and("facialExpression", "smile")
                .then("musicMood", "energetic"),
        );
        system.add_rule(
            FuzzyRule::new("medium_hr_morning")
                .when("heartRate", "medium")
                .and("timeOfDay", "morning")
                .then("musicMood", "neutral")
                .with_weight(0.9),
        );
        system.add_rule(
            FuzzyRule::new("low_hr_happy_face")
                .when("heartRate", "low")
                .and("facialExpression", "smile")
                .then("musicMood", "chill"),
        );
        system.add_rule(
            FuzzyRule::new("high_hr_neutral_face")
                .when("heartRate", "high")
                .and("facialExpression", "neutral")
                .then("musicMood", "upbeat"),
        );
        system.add_rule(
            FuzzyRule::new("medium_hr_neutral_face")
                .when("heartRate", "medium")
                .and("facialExpression", "neutral")
                .then("musicMood", "neutral")
                .with_weight(0.8),
        );
        system.add_rule(
            FuzzyRule::new("night_low_hr")
                .when("timeOfDay", "night")
                .and("heartRate", "low")
                .then("musicMood", "calm")
                .with_weight(0.85),
        );
        system.add_rule(
            FuzzyRule::new("evening_medium_hr")
                .when("timeOfDay", "evening")
                .and("heartRate", "medium")
                .then("musicMood", "chill")
                .with_weight(0.75),
        );
    }

    fn mamdani_mood_system() -> FuzzySystem {
        let mut system = FuzzySystem::new(MamdaniEngine::new(200).unwrap());
        mood_variables(&mut system);
        mood_rules(&mut system);
        system
    }

    fn sugeno_mood_system() -> FuzzySystem {
        let engine = SugenoEngine::new()
            .with_consequent("musicMood", "calm", 15.0)
            .with_consequent("musicMood", "chill", 30.0)
            .with_consequent("musicMood", "neutral", 50.0)
            .with_consequent("musicMood", "upbeat", 70.0)
            .with_consequent("musicMood", "energetic", 90.0);
        let mut system = FuzzySystem::new(engine);
        mood_variables(&mut system);
        mood_rules(&mut system);
        system
    }

    fn inputs(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_mamdani_calm_scenario() {
        let mut system = mamdani_mood_system();
        let outputs = system.calculate(&inputs(&[
            ("heartRate", 55.0),
            ("facialExpression", 2.0),
            ("timeOfDay", 3.0),
        ]));

        // only the calm-consequent rules fire, so the mood lands in the calm band
        let mood = outputs["musicMood"];
        assert!(mood < 25.0, "musicMood = {}", mood);
        assert!(mood > 0.0);

        let fuzzified = system.last_fuzzified_inputs().unwrap();
        assert!((fuzzified["heartRate"]["low"] - 1.0).abs() < 1e-9);
        assert!((fuzzified["facialExpression"]["frown"] - 1.0).abs() < 1e-9);
        assert!((fuzzified["heartRate"]["high"] - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_sugeno_calm_scenario() {
        let mut system = sugeno_mood_system();
        let outputs = system.calculate(&inputs(&[
            ("heartRate", 55.0),
            ("facialExpression", 2.0),
            ("timeOfDay", 3.0),
        ]));

        // both firing rules share the calm consequent (constant 15), so the
        // weighted average collapses onto it
        assert!((outputs["musicMood"] - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_mamdani_energetic_scenario() {
        let mut system = mamdani_mood_system();
        let outputs = system.calculate(&inputs(&[
            ("heartRate", 110.0),
            ("facialExpression", 9.0),
            ("timeOfDay", 15.0),
        ]));

        let mood = outputs["musicMood"];
        assert!(mood > 75.0, "musicMood = {}", mood);
    }

    #[test]
    fn test_missing_input_defaults_to_midpoint() {
        let mut system = mamdani_mood_system();
        // timeOfDay omitted: substituted with 12.0, the domain midpoint
        let outputs = system.calculate(&inputs(&[
            ("heartRate", 55.0),
            ("facialExpression", 2.0),
        ]));
        assert!(outputs.contains_key("musicMood"));

        let fuzzified = system.last_fuzzified_inputs().unwrap();
        // midpoint 12.0 sits on the morning/afternoon boundary
        assert!((fuzzified["timeOfDay"]["night"] - 0.0).abs() < 1e-9);
        assert_eq!(fuzzified["timeOfDay"].len(), 4);
    }

    #[test]
    fn test_unknown_input_keys_ignored() {
        let mut system = mamdani_mood_system();
        let with_extra = system.calculate(&inputs(&[
            ("heartRate", 55.0),
            ("facialExpression", 2.0),
            ("timeOfDay", 3.0),
            ("bloodPressure", 130.0),
        ]));
        let mut system = mamdani_mood_system();
        let without = system.calculate(&inputs(&[
            ("heartRate", 55.0),
            ("facialExpression", 2.0),
            ("timeOfDay", 3.0),
        ]));
        assert_eq!(with_extra, without);
    }

    #[test]
    fn test_out_of_range_inputs_clamped() {
        let mut system = mamdani_mood_system();
        let clamped = system.calculate(&inputs(&[
            ("heartRate", 300.0),
            ("facialExpression", -5.0),
            ("timeOfDay", 3.0),
        ]));
        let mut system = mamdani_mood_system();
        let at_bounds = system.calculate(&inputs(&[
            ("heartRate", 120.0),
            ("facialExpression", 0.0),
            ("timeOfDay", 3.0),
        ]));
        assert_eq!(clamped, at_bounds);
    }

    #[test]
    fn test_caches_none_before_first_call() {
        let system = mamdani_mood_system();
        assert!(system.last_fuzzified_inputs().is_none());
        assert!(system.last_crisp_outputs().is_none());
        assert!(system.last_stats().is_none());
    }

    #[test]
    fn test_caches_overwritten_per_call() {
        let mut system = mamdani_mood_system();

        let first = system.calculate(&inputs(&[("heartRate", 55.0), ("facialExpression", 2.0)]));
        assert_eq!(system.last_crisp_outputs().unwrap(), &first);

        let second = system.calculate(&inputs(&[("heartRate", 110.0), ("facialExpression", 9.0)]));
        assert_eq!(system.last_crisp_outputs().unwrap(), &second);
        assert!(system.last_stats().unwrap().rules_fired > 0);
    }

    #[test]
    fn test_repeat_calculation_is_deterministic() {
        let mut system = mamdani_mood_system();
        let crisp = inputs(&[("heartRate", 72.0), ("facialExpression", 5.0), ("timeOfDay", 9.0)]);

        let first = system.calculate(&crisp);
        let second = system.calculate(&crisp);
        assert_eq!(first, second);
    }

    #[test]
    fn test_engine_swap_preserves_configuration() {
        let mut system = mamdani_mood_system();
        let crisp = inputs(&[("heartRate", 55.0), ("facialExpression", 2.0), ("timeOfDay", 3.0)]);

        let mamdani_out = system.calculate(&crisp);
        assert_eq!(system.engine().name(), "mamdani");

        system.set_engine(
            SugenoEngine::new()
                .with_consequent("musicMood", "calm", 15.0)
                .with_consequent("musicMood", "chill", 30.0)
                .with_consequent("musicMood", "neutral", 50.0)
                .with_consequent("musicMood", "upbeat", 70.0)
                .with_consequent("musicMood", "energetic", 90.0),
        );
        let sugeno_out = system.calculate(&crisp);
        assert_eq!(system.engine().name(), "sugeno");

        assert!(mamdani_out.contains_key("musicMood"));
        assert!(sugeno_out.contains_key("musicMood"));
        // both agree the scenario is calm
        assert!(mamdani_out["musicMood"] < 25.0);
        assert!(sugeno_out["musicMood"] < 25.0);
    }

    #[test]
    fn test_runtime_rule_adjustment() {
        let mut system = sugeno_mood_system();
        let crisp = inputs(&[("heartRate", 55.0), ("facialExpression", 2.0), ("timeOfDay", 3.0)]);

        let baseline = system.calculate(&crisp);
        assert!((baseline["musicMood"] - 15.0).abs() < 1e-6);

        // disabling both calm rules leaves nothing firing: midpoint fallback
        system.rule_base_mut().set_enabled("low_hr_sad_face", false);
        system.rule_base_mut().set_enabled("night_low_hr", false);
        let adjusted = system.calculate(&crisp);
        assert!((adjusted["musicMood"] - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_validate_reports_dangling_references() {
        let mut system = mamdani_mood_system();
        system.add_rule(
            FuzzyRule::new("typo_rule")
                .when("heartRate", "lwo")
                .then("musicMood", "claim"),
        );
        system.add_rule(FuzzyRule::new("bare_rule").when("ghostVar", "x"));

        let issues = system.validate();
        assert_eq!(issues.len(), 4);
        assert!(issues.iter().any(|i| i.rule == "typo_rule" && i.kind == IssueKind::UnknownInputSet));
        assert!(issues.iter().any(|i| i.rule == "typo_rule" && i.kind == IssueKind::UnknownOutputSet));
        assert!(issues
            .iter()
            .any(|i| i.rule == "bare_rule" && i.kind == IssueKind::UnknownInputVariable));
        assert!(issues
            .iter()
            .any(|i| i.rule == "bare_rule" && i.kind == IssueKind::MissingConsequent));

        // the dangling rules still calculate without error
        let outputs = system.calculate(&inputs(&[("heartRate", 55.0), ("facialExpression", 2.0)]));
        assert!(outputs.contains_key("musicMood"));
    }

    #[test]
    fn test_validate_clean_configuration() {
        let system = mamdani_mood_system();
        assert!(system.validate().is_empty());
    }

    #[test]
    fn test_mean_of_maximum_defuzzifier_substitution() {
        let mut system = FuzzySystem::new(
            MamdaniEngine::new(200)
                .unwrap()
                .with_defuzzifier(Defuzzifier::MeanOfMaximum),
        );
        mood_variables(&mut system);
        mood_rules(&mut system);

        let outputs = system.calculate(&inputs(&[
            ("heartRate", 55.0),
            ("facialExpression", 2.0),
            ("timeOfDay", 3.0),
        ]));
        // maxima of the clipped calm set sit on its flat top near the low end
        assert!(outputs["musicMood"] < 25.0);
    }
}
