//! Compare two image files.

use anyhow::{bail, Context, Result};
use fuzzsim::prelude::*;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::info;

use super::report::{emit, render_inference, IDENTICAL_MESSAGE};
use crate::config::OutputFormat;

#[derive(Debug, Serialize)]
struct CompareReport<'a> {
    image_a: &'a str,
    image_b: &'a str,
    comparison: &'a Comparison,
}

pub fn run(
    image_a: Option<String>,
    image_b: Option<String>,
    format: OutputFormat,
    precision: usize,
) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let image_a = match image_a {
        Some(p) => p,
        None => prompt(&mut input, &mut output, "Enter path to first image: ")?,
    };
    let image_b = match image_b {
        Some(p) => p,
        None => prompt(&mut input, &mut output, "Enter path to second image: ")?,
    };

    let comparison = compare_files(Path::new(&image_a), Path::new(&image_b))?;

    let report = CompareReport {
        image_a: &image_a,
        image_b: &image_b,
        comparison: &comparison,
    };
    emit(&report, format, || match &comparison {
        Comparison::Identical => format!("{}\n", IDENTICAL_MESSAGE),
        Comparison::Scored(inference) => render_inference(inference, precision),
    })
}

/// Ask for a line on `output`, read it from `input`, trimmed.
fn prompt(input: &mut impl BufRead, output: &mut impl Write, message: &str) -> Result<String> {
    write!(output, "{}", message)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read path")?;
    Ok(line.trim().to_string())
}

/// Validate, decode and compare two image files.
pub fn compare_files(path_a: &Path, path_b: &Path) -> Result<Comparison> {
    if !(path_a.is_file() && path_b.is_file()) {
        bail!("One or both of the provided paths are invalid.");
    }

    let a = load_grid(path_a)?;
    let b = load_grid(path_b)?;
    info!(
        a = %path_a.display(),
        b = %path_b.display(),
        "loaded {}x{} and {}x{}",
        a.width(),
        a.height(),
        b.width(),
        b.height()
    );

    SimilaritySystem::new()
        .compare(&a, &b)
        .context("Failed to compare images")
}

/// Decode an image file and convert it to 8-bit grayscale.
pub fn load_grid(path: &Path) -> Result<GrayGrid> {
    let image = image::open(path)
        .with_context(|| format!("Error loading image: {}", path.display()))?;
    Ok(GrayGrid::from(image.to_luma8()))
}
