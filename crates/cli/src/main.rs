//! fuzzkit CLI - run mutation trials over a seed corpus.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fuzzkit_core::Program;
use fuzzkit_engine::{EngineConfig, EngineReport, FuzzEngine, SelectorKind, StructuralEvaluator};
use fuzzkit_mutators::{MutatorConfig, MutatorRegistry};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fuzzkit")]
#[command(about = "Mutation-based program fuzzer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run mutation trials
    Run {
        /// Seed corpus (JSON array of programs)
        #[arg(long)]
        seeds: PathBuf,
        /// Mutator configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Number of trials
        #[arg(long, default_value = "10000")]
        iterations: u64,
        /// Number of parallel workers
        #[arg(long, default_value = "1")]
        workers: NonZeroUsize,
        /// RNG seed
        #[arg(long, default_value = "0")]
        seed: u64,
        /// Mutator selection policy (uniform, weighted)
        #[arg(long, default_value = "uniform")]
        selector: SelectorKind,
        /// Override the number of instructions an insertion may add
        #[arg(long)]
        max_insertions: Option<usize>,
        /// Override the longest slice a splice may copy
        #[arg(long)]
        max_splice_len: Option<usize>,
        /// Reject samples longer than this
        #[arg(long)]
        max_size: Option<usize>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List registered mutators
    Mutators {
        /// Mutator configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate a seed corpus
    Check {
        /// Seed corpus (JSON array of programs)
        seeds: PathBuf,
        /// Print each program
        #[arg(long)]
        print: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            seeds,
            config,
            iterations,
            workers,
            seed,
            selector,
            max_insertions,
            max_splice_len,
            max_size,
            json,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(max) = max_insertions {
                config = config.with_max_insertions(max);
            }
            if let Some(max) = max_splice_len {
                config = config.with_max_splice_len(max);
            }
            let registry = MutatorRegistry::from_config(&config)?;
            let corpus = load_seeds(&seeds)?;

            let mut evaluator = StructuralEvaluator::new();
            if let Some(max) = max_size {
                evaluator = evaluator.with_max_instructions(max);
            }

            let engine = FuzzEngine::new(registry, corpus)?
                .with_evaluator(Arc::new(evaluator))
                .with_selector(selector.build())
                .with_config(EngineConfig {
                    iterations,
                    workers,
                    seed,
                });

            let report = engine.run().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Mutators { config } => {
            let registry = MutatorRegistry::from_config(&load_config(config.as_deref())?)?;
            println!("Mutators ({})", registry.len());
            for name in registry.names() {
                println!("  {}", name);
            }
        }
        Commands::Check { seeds, print } => {
            let corpus = load_seeds(&seeds)?;
            info!("{} seeds are valid", corpus.len());
            for program in &corpus {
                println!("{} | {} instructions | {} variables",
                    program.id(),
                    program.len(),
                    program.num_variables(),
                );
                if print {
                    print!("{}", program);
                }
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<MutatorConfig> {
    match path {
        Some(path) => MutatorConfig::load(path)
            .with_context(|| format!("Failed to load mutator config {}", path.display())),
        None => Ok(MutatorConfig::default()),
    }
}

fn load_seeds(path: &Path) -> Result<Vec<Program>> {
    Program::load_all(path).with_context(|| format!("Failed to load seeds {}", path.display()))
}

fn print_report(report: &EngineReport) {
    let elapsed = (report.finished_at - report.started_at).num_milliseconds().max(1) as f64 / 1000.0;

    println!("Fuzzing run");
    println!("  Trials: {} ({:.0}/s)", report.iterations, report.iterations as f64 / elapsed);
    println!("  Valid: {}", report.valid_samples);
    println!("  Invalid: {}", report.invalid_samples);
    println!("  No mutation: {}", report.no_mutation);
    println!();
    println!("  {:<20} {:>10} {:>10} {:>12}", "mutator", "valid", "invalid", "correctness");
    for stats in &report.mutators {
        println!("  {:<20} {:>10} {:>10} {:>11.2}%",
            stats.name,
            stats.valid,
            stats.invalid,
            stats.correctness_rate * 100.0,
        );
    }
}
