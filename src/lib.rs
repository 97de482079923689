//! fuzzkit - a fuzzy-inference engine
//!
//! Computes degrees of membership in linguistic categories from crisp
//! numeric measurements, evaluates a set of weighted logical rules over
//! those memberships, combines rule outputs, and reduces the combination
//! back to a single crisp value per output variable.
//!
//! # Architecture
//!
//! The crate is organized around small, independently swappable pieces:
//!
//! - [`MembershipFunction`] - triangular, trapezoidal, and gaussian shapes
//! - [`LinguisticVariable`] - a domain partitioned into named [`FuzzySet`]s
//! - [`TNorm`] / [`TConorm`] / [`Negation`] / [`Implication`] /
//!   [`Aggregation`] - pluggable logical operators
//! - [`FuzzyRule`] / [`RuleBase`] - weighted rules with left-to-right
//!   antecedent folding
//! - [`MamdaniEngine`] / [`SugenoEngine`] - the two inference styles behind
//!   the [`InferenceEngine`] trait
//! - [`Defuzzifier`] - centroid and mean-of-maximum curve reduction
//! - [`FuzzySystem`] - orchestration, input clamping, diagnostic caches
//!
//! # Example
//!
//! ```rust,ignore
//! use std::collections::HashMap;
//! use fuzzkit::{
//!     FuzzyRule, FuzzySet, FuzzySystem, LinguisticVariable, MamdaniEngine,
//!     MembershipFunction,
//! };
//!
//! let mut system = FuzzySystem::new(MamdaniEngine::new(200)?);
//!
//! let temperature = LinguisticVariable::new("temperature", 0.0, 40.0)?
//!     .with_set(FuzzySet::new("cold", MembershipFunction::trapezoidal(0.0, 0.0, 10.0, 18.0)?))
//!     .with_set(FuzzySet::new("warm", MembershipFunction::triangular(15.0, 22.0, 29.0)?))
//!     .with_set(FuzzySet::new("hot", MembershipFunction::trapezoidal(26.0, 32.0, 40.0, 40.0)?));
//! system.add_input_variable(temperature);
//!
//! let fan_speed = LinguisticVariable::new("fanSpeed", 0.0, 100.0)?
//!     .with_set(FuzzySet::new("slow", MembershipFunction::triangular(0.0, 0.0, 50.0)?))
//!     .with_set(FuzzySet::new("fast", MembershipFunction::triangular(50.0, 100.0, 100.0)?));
//! system.add_output_variable(fan_speed);
//!
//! system.add_rule(FuzzyRule::new("cool_off").when("temperature", "hot").then("fanSpeed", "fast"));
//! system.add_rule(FuzzyRule::new("ease_down").when("temperature", "cold").then("fanSpeed", "slow"));
//!
//! let outputs = system.calculate(&HashMap::from([("temperature".to_string(), 31.0)]));
//! println!("fan speed: {:.1}", outputs["fanSpeed"]);
//! ```

pub mod defuzz;
pub mod engine;
pub mod error;
pub mod membership;
pub mod operators;
pub mod rules;
pub mod system;
pub mod variable;

// Re-export error types
pub use error::{FuzzyError, FuzzyResult};

// Re-export membership and variable types
pub use membership::MembershipFunction;
pub use variable::{FuzzySet, LinguisticVariable};

// Re-export operator types
pub use operators::{Aggregation, Implication, Negation, TConorm, TNorm};

// Re-export rule types
pub use rules::{Antecedent, Connective, Consequent, FuzzyRule, RuleBase};

// Re-export defuzzification types
pub use defuzz::Defuzzifier;

// Re-export engine types
pub use engine::{
    InferenceEngine, InferenceOutcome, InferenceStats, MamdaniEngine, SugenoEngine,
};

// Re-export system types
pub use system::{FuzzySystem, IssueKind, ValidationIssue};
