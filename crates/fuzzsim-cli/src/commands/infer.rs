//! Score crisp feature values without images.

use anyhow::{Context, Result};
use fuzzsim::prelude::*;

use super::report::{emit, render_inference};
use crate::config::OutputFormat;

pub fn run(intensity_diff: f64, edge_similarity: f64, format: OutputFormat, precision: usize) -> Result<()> {
    let inference = infer(intensity_diff, edge_similarity)?;
    emit(&inference, format, || render_inference(&inference, precision))
}

fn infer(intensity_diff: f64, edge_similarity: f64) -> Result<Inference> {
    SimilaritySystem::new()
        .explain(intensity_diff, edge_similarity)
        .with_context(|| {
            format!(
                "No similarity for intensity difference {} and edge similarity {}",
                intensity_diff, edge_similarity
            )
        })
}
