//! Fuzzsim Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use fuzzsim_core::prelude::*;
//! ```

pub use crate::defuzz::centroid;
pub use crate::error::{Result, SimilarityError};
pub use crate::features::{
    compute_edge_similarity, compute_features, compute_intensity_difference, Features,
    EDGE_SIMILARITY_FLOOR,
};
pub use crate::grid::GrayGrid;
pub use crate::membership::{Degrees, Label, MembershipFunction, MembershipModel, Variable};
pub use crate::rules::{
    Clause, FiringResult, Fuzzified, OutputDistribution, Rule, RuleEngine, STANDARD_RULES,
};
pub use crate::system::{Comparison, Inference, SimilaritySystem};
