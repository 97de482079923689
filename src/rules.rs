//! Fuzzy rules and the rule base
//!
//! A rule is an ordered sequence of antecedent clauses, an optional
//! consequent, a weight, and an enabled flag. Antecedents are combined
//! strictly left to right with each clause's own connective — there is no
//! operator precedence, so `A AND B OR C` evaluates as `(A AND B) OR C`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::operators::{Negation, TConorm, TNorm};

/// How an antecedent clause joins the running strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connective {
    And,
    Or,
}

/// One antecedent clause: "variable IS [NOT] set"
#[derive(Debug, Clone, PartialEq)]
pub struct Antecedent {
    pub variable: String,
    pub set: String,
    /// Ignored for the first clause of a rule
    pub connective: Connective,
    pub negated: bool,
}

/// The rule's conclusion: "variable IS set"
#[derive(Debug, Clone, PartialEq)]
pub struct Consequent {
    pub variable: String,
    pub set: String,
}

/// A single weighted inference rule
#[derive(Debug, Clone)]
pub struct FuzzyRule {
    name: String,
    antecedents: Vec<Antecedent>,
    consequent: Option<Consequent>,
    weight: f64,
    enabled: bool,
}

impl FuzzyRule {
    /// Create an empty enabled rule with weight 1.0
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            antecedents: Vec::new(),
            consequent: None,
            weight: 1.0,
            enabled: true,
        }
    }

    /// Append an antecedent clause
    pub fn antecedent(
        mut self,
        variable: impl Into<String>,
        set: impl Into<String>,
        connective: Connective,
        negated: bool,
    ) -> Self {
        self.antecedents.push(Antecedent {
            variable: variable.into(),
            set: set.into(),
            connective,
            negated,
        });
        self
    }

    /// First clause of the rule (its connective is ignored)
    pub fn when(self, variable: impl Into<String>, set: impl Into<String>) -> Self {
        self.antecedent(variable, set, Connective::And, false)
    }

    /// Negated first clause
    pub fn when_not(self, variable: impl Into<String>, set: impl Into<String>) -> Self {
        self.antecedent(variable, set, Connective::And, true)
    }

    /// AND-join another clause
    pub fn and(self, variable: impl Into<String>, set: impl Into<String>) -> Self {
        self.antecedent(variable, set, Connective::And, false)
    }

    /// OR-join another clause
    pub fn or(self, variable: impl Into<String>, set: impl Into<String>) -> Self {
        self.antecedent(variable, set, Connective::Or, false)
    }

    /// AND-join a negated clause
    pub fn and_not(self, variable: impl Into<String>, set: impl Into<String>) -> Self {
        self.antecedent(variable, set, Connective::And, true)
    }

    /// OR-join a negated clause
    pub fn or_not(self, variable: impl Into<String>, set: impl Into<String>) -> Self {
        self.antecedent(variable, set, Connective::Or, true)
    }

    /// Set the consequent
    pub fn then(mut self, variable: impl Into<String>, set: impl Into<String>) -> Self {
        self.consequent = Some(Consequent {
            variable: variable.into(),
            set: set.into(),
        });
        self
    }

    /// Set the rule weight, clamped into [0, 1]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.set_weight(weight);
        self
    }

    /// Disable the rule at construction
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight.clamp(0.0, 1.0);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn antecedents(&self) -> &[Antecedent] {
        &self.antecedents
    }

    pub fn consequent(&self) -> Option<&Consequent> {
        self.consequent.as_ref()
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Firing strength of this rule against fuzzified inputs
    ///
    /// Returns 0 for a disabled rule or one with no antecedents. Each
    /// clause's degree is looked up as `fuzzified[variable][set]`,
    /// NOT-adjusted when negated, then folded left to right using AND or OR
    /// per the clause's connective. The result is scaled by the rule weight.
    ///
    /// A clause whose variable or set is absent from the fuzzified map is
    /// skipped; [`FuzzySystem::validate`](crate::FuzzySystem::validate)
    /// reports such references ahead of time.
    pub fn evaluate_strength(
        &self,
        fuzzified: &IndexMap<String, IndexMap<String, f64>>,
        and_op: TNorm,
        or_op: TConorm,
        not_op: Negation,
    ) -> f64 {
        if !self.enabled || self.antecedents.is_empty() {
            return 0.0;
        }

        let mut strength: Option<f64> = None;
        for ant in &self.antecedents {
            let degree = match fuzzified.get(&ant.variable).and_then(|sets| sets.get(&ant.set)) {
                Some(d) => *d,
                None => continue,
            };
            let degree = if ant.negated { not_op.apply(degree) } else { degree };

            strength = Some(match strength {
                None => degree,
                Some(acc) => match ant.connective {
                    Connective::And => and_op.apply(acc, degree),
                    Connective::Or => or_op.apply(acc, degree),
                },
            });
        }

        strength.unwrap_or(0.0) * self.weight
    }
}

/// An ordered collection of rules
///
/// Insertion order is preserved for evaluation. Names need not be unique;
/// lookups return the first match. Removal and weight/enable mutation are
/// supported at any time for runtime what-if adjustments.
#[derive(Debug, Clone, Default)]
pub struct RuleBase {
    rules: Vec<FuzzyRule>,
}

impl RuleBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rule: FuzzyRule) {
        self.rules.push(rule);
    }

    /// Remove every rule with the given name
    pub fn remove(&mut self, name: &str) {
        self.rules.retain(|rule| rule.name() != name);
    }

    /// First rule with the given name
    pub fn rule(&self, name: &str) -> Option<&FuzzyRule> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    pub fn rule_mut(&mut self, name: &str) -> Option<&mut FuzzyRule> {
        self.rules.iter_mut().find(|rule| rule.name() == name)
    }

    /// Enable or disable the first rule with the given name; returns whether
    /// a rule was found
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.rule_mut(name) {
            Some(rule) => {
                rule.set_enabled(enabled);
                true
            }
            None => false,
        }
    }

    /// Update the weight of the first rule with the given name (clamped into
    /// [0, 1]); returns whether a rule was found
    pub fn set_weight(&mut self, name: &str, weight: f64) -> bool {
        match self.rule_mut(name) {
            Some(rule) => {
                rule.set_weight(weight);
                true
            }
            None => false,
        }
    }

    pub fn rules(&self) -> &[FuzzyRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
