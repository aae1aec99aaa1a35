//! Text and JSON rendering of inference results.

use anyhow::{Context, Result};
use colored::Colorize;
use fuzzsim::prelude::*;
use serde::Serialize;

use crate::config::OutputFormat;

pub const IDENTICAL_MESSAGE: &str = "The provided images are identical.";

/// Score line followed by the feature, membership and firing breakdown.
pub fn render_inference(inference: &Inference, precision: usize) -> String {
    let mut out = format!(
        "Similarity value: {}\n",
        format!("{:.*}", precision, inference.similarity).cyan().bold()
    );

    out.push_str(&format!(
        "\n  {:<22} {:>10.4}   {}\n",
        Variable::IntensityDiff.name(),
        inference.features.intensity_diff,
        degrees(&inference.memberships.intensity_diff).dimmed()
    ));
    out.push_str(&format!(
        "  {:<22} {:>10.4}   {}\n",
        Variable::EdgeSimilarity.name(),
        inference.features.edge_similarity,
        degrees(&inference.memberships.edge_similarity).dimmed()
    ));

    out.push_str("\n  Firing strengths:\n");
    for rule in STANDARD_RULES.iter() {
        let strength = inference.firing.strength(rule.consequent.label);
        out.push_str(&format!("    {:.4}  {}\n", strength, rule));
    }
    out
}

fn degrees(d: &Degrees) -> String {
    d.iter()
        .map(|(label, v)| format!("{}={:.3}", label, v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print a serializable value in the requested format, or fall back to
/// `text` for the plain rendering.
pub fn emit<T: Serialize>(value: &T, format: OutputFormat, text: impl FnOnce() -> String) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", text()),
    }
    Ok(())
}
