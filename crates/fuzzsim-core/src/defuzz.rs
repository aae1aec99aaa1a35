//! Centroid defuzzification.

use crate::error::{Result, SimilarityError};
use crate::rules::OutputDistribution;

/// Center of gravity of a sampled distribution.
///
/// Computes: Σ y·μ(y) / Σ μ(y)
///
/// Fails with `Defuzzification` when the distribution has zero area rather
/// than returning NaN.
pub fn centroid(distribution: &OutputDistribution) -> Result<f64> {
    let area = distribution.area();
    if area == 0.0 {
        return Err(SimilarityError::zero_area());
    }

    let numerator: f64 = distribution.points().iter().map(|&(y, d)| y * d).sum();
    Ok(numerator / area)
}
