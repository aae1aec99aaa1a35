//! Fuzzsim CLI - fuzzy similarity scoring for grayscale images.

mod commands;
mod config;

use anyhow::{Context, Result};
use std::path::Path;
use clap::{Parser, Subcommand};
use tracing::Level;

use crate::config::{Config, OutputFormat};

#[derive(Parser)]
#[command(name = "fuzzsim")]
#[command(author, version, about = "Fuzzsim - explainable fuzzy image similarity", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two images (prompts for any path not given)
    Compare {
        /// First image
        image_a: Option<String>,

        /// Second image
        image_b: Option<String>,

        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the inference engine on crisp feature values
    Infer {
        /// Mean-intensity difference, 0-255
        #[arg(short, long)]
        intensity_diff: f64,

        /// Edge-map agreement in percent, 0-100
        #[arg(short, long)]
        edge_similarity: f64,

        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default fuzzsim.toml
    Init {
        /// Target directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },
}

/// Settings for a command. `init` never reads an existing config, so it can
/// replace a broken one.
fn config_for(command: &Commands, start: &Path) -> Result<Config> {
    match command {
        Commands::Init { .. } => Ok(Config::default()),
        Commands::Compare { .. } | Commands::Infer { .. } => Config::discover(start),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let config = config_for(&cli.command, &cwd)?;

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        config.logging.level()?
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compare {
            image_a,
            image_b,
            json,
        } => {
            let format = if json { OutputFormat::Json } else { config.output.format };
            commands::compare::run(image_a, image_b, format, config.output.precision)
        }
        Commands::Infer {
            intensity_diff,
            edge_similarity,
            json,
        } => {
            let format = if json { OutputFormat::Json } else { config.output.format };
            commands::infer::run(intensity_diff, edge_similarity, format, config.output.precision)
        }
        Commands::Init { path } => commands::init::run(path),
    }
}
