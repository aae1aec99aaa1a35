//! Linguistic variables and their membership functions.
//!
//! Every variable is partitioned into three overlapping fuzzy labels with an
//! even triangular layout over its domain `[lo, hi]` (midpoint `m`):
//!
//! | Label  | Vertices                    |
//! |--------|-----------------------------|
//! | Low    | `(lo, 1)`, `(m, 0)`         |
//! | Medium | `(lo, 0)`, `(m, 1)`, `(hi, 0)` |
//! | High   | `(m, 0)`, `(hi, 1)`         |
//!
//! Adjacent labels cross at degree 0.5 halfway between their peaks, and at
//! most two adjacent labels are positive for any crisp value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SimilarityError};

/// The three linguistic variables of the similarity model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    /// Absolute difference of mean intensities, domain [0, 255].
    IntensityDiff,
    /// Percentage of agreeing edge-map pixels, domain [0, 100].
    EdgeSimilarity,
    /// Output similarity score, domain [0, 100].
    Similarity,
}

impl Variable {
    pub const ALL: [Variable; 3] = [
        Variable::IntensityDiff,
        Variable::EdgeSimilarity,
        Variable::Similarity,
    ];

    /// Inclusive domain bounds.
    pub fn domain(self) -> (f64, f64) {
        match self {
            Variable::IntensityDiff => (0.0, 255.0),
            Variable::EdgeSimilarity | Variable::Similarity => (0.0, 100.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variable::IntensityDiff => "Intensity Difference",
            Variable::EdgeSimilarity => "Edge Similarity",
            Variable::Similarity => "Similarity",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fuzzy label of a linguistic variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    Low,
    Medium,
    High,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::Low, Label::Medium, Label::High];

    pub fn name(self) -> &'static str {
        match self {
            Label::Low => "low",
            Label::Medium => "medium",
            Label::High => "high",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One degree per label.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Degrees {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Degrees {
    pub fn get(&self, label: Label) -> f64 {
        match label {
            Label::Low => self.low,
            Label::Medium => self.medium,
            Label::High => self.high,
        }
    }

    pub fn set(&mut self, label: Label, value: f64) {
        match label {
            Label::Low => self.low = value,
            Label::Medium => self.medium = value,
            Label::High => self.high = value,
        }
    }

    /// `(label, degree)` pairs in Low, Medium, High order.
    pub fn iter(&self) -> impl Iterator<Item = (Label, f64)> + '_ {
        Label::ALL.iter().map(move |&l| (l, self.get(l)))
    }

    /// Largest of the three degrees.
    pub fn max(&self) -> f64 {
        self.low.max(self.medium).max(self.high)
    }
}

/// Piecewise-linear membership function given by three vertices.
///
/// `left == peak` gives a left shoulder, `peak == right` a right shoulder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MembershipFunction {
    pub left: f64,
    pub peak: f64,
    pub right: f64,
}

impl MembershipFunction {
    pub fn triangle(left: f64, peak: f64, right: f64) -> Self {
        Self { left, peak, right }
    }

    /// Degree of `x`, linearly interpolated between vertices.
    pub fn evaluate(&self, x: f64) -> f64 {
        if x < self.left || x > self.right {
            return 0.0;
        }
        if x == self.peak {
            return 1.0;
        }
        if x < self.peak {
            (x - self.left) / (self.peak - self.left)
        } else {
            (self.right - x) / (self.right - self.peak)
        }
    }
}

/// A linguistic variable with its Low/Medium/High partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipModel {
    variable: Variable,
    lo: f64,
    hi: f64,
    low: MembershipFunction,
    medium: MembershipFunction,
    high: MembershipFunction,
}

impl MembershipModel {
    /// Build the partition over the variable's standard domain.
    pub fn new(variable: Variable) -> Self {
        let (lo, hi) = variable.domain();
        Self::partition(variable, lo, hi)
    }

    fn partition(variable: Variable, lo: f64, hi: f64) -> Self {
        let mid = (lo + hi) / 2.0;
        Self {
            variable,
            lo,
            hi,
            low: MembershipFunction::triangle(lo, lo, mid),
            medium: MembershipFunction::triangle(lo, mid, hi),
            high: MembershipFunction::triangle(mid, hi, hi),
        }
    }

    pub fn variable(&self) -> Variable {
        self.variable
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    pub fn function(&self, label: Label) -> &MembershipFunction {
        match label {
            Label::Low => &self.low,
            Label::Medium => &self.medium,
            Label::High => &self.high,
        }
    }

    /// Degree of a domain value for one label.
    pub fn degree(&self, label: Label, x: f64) -> f64 {
        self.function(label).evaluate(x)
    }

    /// Fuzzify a crisp input. Values outside the domain are clipped to the
    /// nearest bound; NaN and infinities are rejected.
    pub fn fuzzify(&self, x: f64) -> Result<Degrees> {
        if !x.is_finite() {
            return Err(SimilarityError::invalid_input(format!(
                "{} input must be finite, got {}",
                self.variable, x
            )));
        }
        let x = x.clamp(self.lo, self.hi);
        Ok(Degrees {
            low: self.low.evaluate(x),
            medium: self.medium.evaluate(x),
            high: self.high.evaluate(x),
        })
    }

    /// Unit-step sample points `lo, lo + 1, ...` up to and including `hi`.
    pub fn universe(&self) -> impl Iterator<Item = f64> {
        let lo = self.lo;
        let steps = (self.hi - self.lo).floor() as usize;
        (0..=steps).map(move |i| lo + i as f64)
    }
}
