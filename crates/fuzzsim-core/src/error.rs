//! Error types for similarity scoring.
//!
//! Both failure modes are fatal to the comparison in progress and are
//! returned to the caller unchanged.

use thiserror::Error;

/// Errors raised by the feature extractors and the inference engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimilarityError {
    /// Empty or degenerate pixel grid, or a non-finite crisp input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The aggregated output distribution has zero area.
    #[error("Defuzzification failed: {0}")]
    Defuzzification(String),
}

/// Result type for similarity operations.
pub type Result<T> = std::result::Result<T, SimilarityError>;

// Convenience constructors
impl SimilarityError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        SimilarityError::InvalidInput(reason.into())
    }

    pub fn zero_area() -> Self {
        SimilarityError::Defuzzification(
            "aggregated output distribution has zero area (no rule fired)".into(),
        )
    }
}
