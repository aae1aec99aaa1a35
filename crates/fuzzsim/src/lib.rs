//! # Fuzzsim
//!
//! Explainable similarity scoring for grayscale images using a Mamdani
//! fuzzy inference system.
//!
//! Two crisp features drive the model: the difference of mean intensities
//! and the agreement of the two images' edge maps. A fixed three-rule base
//! maps them to a similarity score in [0, 100] via centroid
//! defuzzification.
//!
//! ## Quick Start
//!
//! ```rust
//! use fuzzsim::prelude::*;
//!
//! let system = SimilaritySystem::new();
//!
//! // Score crisp features directly
//! let score = system.compute_similarity(12.0, 20.0).unwrap();
//! assert!((0.0..=100.0).contains(&score));
//!
//! // Or compare two grids
//! let a = GrayGrid::uniform(8, 8, 40);
//! let b = GrayGrid::uniform(8, 8, 40);
//! assert!(system.compare(&a, &b).unwrap().is_identical());
//! ```
//!
//! ## Architecture
//!
//! - [`fuzzsim_core`] - Feature extractors, membership models, rule engine
//!   and defuzzifier
//!
//! ## Rule Base
//!
//! | Intensity Difference | Edge Similarity | Similarity |
//! |----------------------|-----------------|------------|
//! | low                  | low             | high       |
//! | medium               | medium          | medium     |
//! | high                 | high            | low        |

pub use fuzzsim_core as core;

/// Prelude module for convenient imports.
///
/// ```rust
/// use fuzzsim::prelude::*;
/// ```
pub mod prelude {
    pub use fuzzsim_core::prelude::*;
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
