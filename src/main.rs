//! heredity - compute gene and trait distributions for a family from partial observations.

use heredity::{load_pedigree, write_report, EnumerationEngine, GeneticModel, MarginalInferenceEngine};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::io;
use std::path::PathBuf;

/// Compute the probability that each person in a family carries 0, 1, or 2 copies of a gene, and
/// has a trait, given the traits observed for some of them.
#[derive(Debug, Parser)]
#[command(name = "heredity")]
#[command(version, about, long_about = None)]
struct Cli {
    /// CSV file with columns name, mother, father, trait
    data: PathBuf,

    /// TOML file overriding the default probability tables
    #[arg(short, long)]
    model: Option<PathBuf>,
}

fn main() {
    // Initialize tracing (log to stderr, filtered by RUST_LOG)
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let model = match cli.model {
        Some(ref path) => GeneticModel::load(path)
            .with_context(|| format!("failed to load model from {}", path.display()))?,
        None => GeneticModel::default(),
    };

    let pedigree = load_pedigree(&cli.data)
        .with_context(|| format!("failed to load pedigree from {}", cli.data.display()))?;

    let marginals = EnumerationEngine::new(&pedigree, &model)
        .infer()
        .context("inference failed")?;

    let stdout = io::stdout();
    write_report(&marginals, stdout.lock()).context("failed to write report")?;
    Ok(())
}
