//! Mamdani rule base: fuzzification, inference and max-min aggregation.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use crate::error::Result;
use crate::membership::{Degrees, Label, MembershipModel, Variable};

/// A `(variable, label)` pair, e.g. `IntensityDiff is Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    pub variable: Variable,
    pub label: Label,
}

impl Clause {
    pub const fn new(variable: Variable, label: Label) -> Self {
        Self { variable, label }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {}", self.variable, self.label)
    }
}

/// Two input clauses joined by fuzzy AND, implying one output clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    pub antecedents: [Clause; 2],
    pub consequent: Clause,
}

impl Rule {
    const fn fixed(intensity: Label, edge: Label, similarity: Label) -> Self {
        Self {
            antecedents: [
                Clause::new(Variable::IntensityDiff, intensity),
                Clause::new(Variable::EdgeSimilarity, edge),
            ],
            consequent: Clause::new(Variable::Similarity, similarity),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IF {} AND {} THEN {}",
            self.antecedents[0], self.antecedents[1], self.consequent
        )
    }
}

/// The three rules of the similarity model.
pub const STANDARD_RULES: [Rule; 3] = [
    Rule::fixed(Label::Low, Label::Low, Label::High),
    Rule::fixed(Label::Medium, Label::Medium, Label::Medium),
    Rule::fixed(Label::High, Label::High, Label::Low),
];

/// Per-label membership degrees of both crisp inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fuzzified {
    pub intensity_diff: Degrees,
    pub edge_similarity: Degrees,
}

impl Fuzzified {
    fn degree(&self, clause: Clause) -> f64 {
        match clause.variable {
            Variable::IntensityDiff => self.intensity_diff.get(clause.label),
            Variable::EdgeSimilarity => self.edge_similarity.get(clause.label),
            Variable::Similarity => unreachable!("{} is an output variable", clause.variable),
        }
    }
}

/// Aggregated firing strength per output label.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FiringResult {
    pub strengths: Degrees,
}

impl FiringResult {
    pub fn strength(&self, label: Label) -> f64 {
        self.strengths.get(label)
    }

    /// True when no rule fired with positive strength.
    pub fn is_silent(&self) -> bool {
        self.strengths.max() <= 0.0
    }
}

/// Aggregated output degree at each unit-step point of the output domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDistribution {
    points: Vec<(f64, f64)>,
}

impl OutputDistribution {
    /// Build from explicit `(y, degree)` samples.
    pub fn from_points(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Sum of all degrees.
    pub fn area(&self) -> f64 {
        self.points.iter().map(|&(_, d)| d).sum()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Fuzzifies crisp inputs, fires the rule base and aggregates the result.
///
/// Holds only immutable configuration, so one engine can serve any number
/// of comparisons, including from several threads at once.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleEngine {
    intensity_diff: MembershipModel,
    edge_similarity: MembershipModel,
    similarity: MembershipModel,
    rules: Vec<Rule>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    /// Standard membership models with the standard rule base.
    pub fn new() -> Self {
        Self {
            intensity_diff: MembershipModel::new(Variable::IntensityDiff),
            edge_similarity: MembershipModel::new(Variable::EdgeSimilarity),
            similarity: MembershipModel::new(Variable::Similarity),
            rules: STANDARD_RULES.to_vec(),
        }
    }

    pub fn model(&self, variable: Variable) -> &MembershipModel {
        match variable {
            Variable::IntensityDiff => &self.intensity_diff,
            Variable::EdgeSimilarity => &self.edge_similarity,
            Variable::Similarity => &self.similarity,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn fuzzify(&self, intensity_diff: f64, edge_similarity: f64) -> Result<Fuzzified> {
        Ok(Fuzzified {
            intensity_diff: self.intensity_diff.fuzzify(intensity_diff)?,
            edge_similarity: self.edge_similarity.fuzzify(edge_similarity)?,
        })
    }

    /// Rule strength is the minimum of its antecedent degrees; strengths of
    /// rules sharing a consequent label are combined by maximum.
    pub fn fire(&self, inputs: &Fuzzified) -> FiringResult {
        let mut result = FiringResult::default();
        for rule in &self.rules {
            let strength = rule
                .antecedents
                .iter()
                .map(|&c| inputs.degree(c))
                .fold(1.0_f64, f64::min);
            let label = rule.consequent.label;
            trace!(rule = %rule, strength, "rule fired");
            result
                .strengths
                .set(label, result.strength(label).max(strength));
        }
        result
    }

    /// Max-min composition over the output universe: each label's shape is
    /// clipped at its firing strength, then the clipped shapes are merged by
    /// pointwise maximum.
    pub fn aggregate(&self, firing: &FiringResult) -> OutputDistribution {
        let points = self
            .similarity
            .universe()
            .map(|y| {
                let degree = Label::ALL
                    .iter()
                    .map(|&l| firing.strength(l).min(self.similarity.degree(l, y)))
                    .fold(0.0_f64, f64::max);
                (y, degree)
            })
            .collect();
        OutputDistribution { points }
    }

    /// Fuzzify, fire and aggregate in one step.
    pub fn infer(
        &self,
        intensity_diff: f64,
        edge_similarity: f64,
    ) -> Result<(Fuzzified, FiringResult, OutputDistribution)> {
        let inputs = self.fuzzify(intensity_diff, edge_similarity)?;
        let firing = self.fire(&inputs);
        let distribution = self.aggregate(&firing);
        Ok((inputs, firing, distribution))
    }
}
