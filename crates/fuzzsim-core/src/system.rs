//! End-to-end similarity scoring.
//!
//! [`SimilaritySystem`] owns the immutable part of the model (membership
//! models and rule base). Every call builds its own firing strengths and
//! output distribution, so a single system can be shared freely.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::defuzz::centroid;
use crate::error::Result;
use crate::features::{compute_features, Features};
use crate::grid::GrayGrid;
use crate::rules::{FiringResult, Fuzzified, RuleEngine};

/// Full trace of one inference, for explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inference {
    pub features: Features,
    pub memberships: Fuzzified,
    pub firing: FiringResult,
    pub similarity: f64,
}

/// Outcome of comparing two grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Comparison {
    /// The grids are pixel-identical; no score is computed.
    Identical,
    /// The grids differ and were scored.
    Scored(Inference),
}

impl Comparison {
    pub fn is_identical(&self) -> bool {
        matches!(self, Comparison::Identical)
    }

    /// The score, if one was computed.
    pub fn similarity(&self) -> Option<f64> {
        match self {
            Comparison::Identical => None,
            Comparison::Scored(inference) => Some(inference.similarity),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilaritySystem {
    engine: RuleEngine,
}

impl SimilaritySystem {
    pub fn new() -> Self {
        Self {
            engine: RuleEngine::new(),
        }
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Score two crisp inputs. Out-of-domain values are clipped.
    pub fn compute_similarity(&self, intensity_diff: f64, edge_similarity: f64) -> Result<f64> {
        Ok(self.explain(intensity_diff, edge_similarity)?.similarity)
    }

    /// Score two crisp inputs and keep every intermediate stage.
    pub fn explain(&self, intensity_diff: f64, edge_similarity: f64) -> Result<Inference> {
        let (memberships, firing, distribution) =
            self.engine.infer(intensity_diff, edge_similarity)?;
        debug!(
            low = firing.strengths.low,
            medium = firing.strengths.medium,
            high = firing.strengths.high,
            "firing strengths"
        );

        let similarity = centroid(&distribution)?;
        debug!(similarity, "defuzzified");

        Ok(Inference {
            features: Features {
                intensity_diff,
                edge_similarity,
            },
            memberships,
            firing,
            similarity,
        })
    }

    /// Compare two grids: identical grids are reported as such, anything
    /// else goes through feature extraction and inference.
    pub fn compare(&self, a: &GrayGrid, b: &GrayGrid) -> Result<Comparison> {
        if a == b && !a.is_empty() {
            debug!("grids are identical");
            return Ok(Comparison::Identical);
        }

        let features = compute_features(a, b)?;
        debug!(
            intensity_diff = features.intensity_diff,
            edge_similarity = features.edge_similarity,
            "features extracted"
        );
        self.explain(features.intensity_diff, features.edge_similarity)
            .map(Comparison::Scored)
    }
}
