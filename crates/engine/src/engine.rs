//! The fuzzing engine - runs mutation trials and reports feedback.

use crate::error::{EngineError, Result};
use crate::evaluator::{Evaluator, StructuralEvaluator, Verdict};
use crate::selector::{SelectionPolicy, Uniform};
use chrono::{DateTime, Utc};
use fuzzkit_core::{FuzzContext, Program};
use fuzzkit_mutators::{MutatorError, MutatorRegistry, MutatorStats};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, trace, warn};

/// Configuration for the fuzzing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Total trials across all workers
    pub iterations: u64,
    /// Number of parallel workers
    pub workers: NonZeroUsize,
    /// Base RNG seed; worker `i` uses `seed + i`
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            workers: NonZeroUsize::MIN,
            seed: 0,
        }
    }
}

impl EngineConfig {
    /// Set the number of trials.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the number of workers.
    pub fn with_workers(mut self, workers: NonZeroUsize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Trials assigned to `worker`.
    fn share(&self, worker: usize) -> u64 {
        let workers = self.workers.get() as u64;
        let worker = worker as u64;
        self.iterations / workers + u64::from(worker < self.iterations % workers)
    }
}

/// Result of a single trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialOutcome {
    /// The sample was judged valid
    Valid {
        /// Mutator that produced the sample
        mutator: &'static str,
    },
    /// The sample was judged invalid
    Invalid {
        /// Mutator that produced the sample
        mutator: &'static str,
    },
    /// The mutator could not handle the chosen program
    NoMutation {
        /// Mutator that declined
        mutator: &'static str,
    },
    /// No mutator was selected
    Skipped,
}

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    iterations: u64,
    valid: u64,
    invalid: u64,
    no_mutation: u64,
    skipped: u64,
}

impl Tally {
    fn record(&mut self, outcome: TrialOutcome) {
        self.iterations += 1;
        match outcome {
            TrialOutcome::Valid { .. } => self.valid += 1,
            TrialOutcome::Invalid { .. } => self.invalid += 1,
            TrialOutcome::NoMutation { .. } => self.no_mutation += 1,
            TrialOutcome::Skipped => self.skipped += 1,
        }
    }

    fn merge(&mut self, other: Tally) {
        self.iterations += other.iterations;
        self.valid += other.valid;
        self.invalid += other.invalid;
        self.no_mutation += other.no_mutation;
        self.skipped += other.skipped;
    }
}

/// Summary of an engine run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
    /// Trials executed
    pub iterations: u64,
    /// Samples judged valid
    pub valid_samples: u64,
    /// Samples judged invalid
    pub invalid_samples: u64,
    /// Trials where the mutator declined the program
    pub no_mutation: u64,
    /// Trials where no mutator was selected
    pub skipped: u64,
    /// Cumulative per-mutator statistics
    pub mutators: Vec<MutatorStats>,
}

/// The fuzzing engine.
///
/// Runs the trial loop:
/// ```text
/// Pick Seed → Select Mutator → Mutate → Evaluate → Feedback
/// ```
#[derive(Clone)]
pub struct FuzzEngine {
    registry: Arc<MutatorRegistry>,
    corpus: Arc<[Program]>,
    evaluator: Arc<dyn Evaluator>,
    selector: Arc<dyn SelectionPolicy>,
    config: EngineConfig,
}

impl FuzzEngine {
    /// Create an engine over a registry and a seed corpus.
    ///
    /// Fails if either is empty or a seed is malformed.
    pub fn new(registry: MutatorRegistry, corpus: Vec<Program>) -> Result<Self> {
        if registry.is_empty() {
            return Err(MutatorError::NoMutators.into());
        }
        if corpus.is_empty() {
            return Err(EngineError::EmptyCorpus);
        }
        for (index, program) in corpus.iter().enumerate() {
            program
                .check()
                .map_err(|source| EngineError::InvalidSeed { index, source })?;
        }

        Ok(Self {
            registry: Arc::new(registry),
            corpus: Arc::from(corpus),
            evaluator: Arc::new(StructuralEvaluator::new()),
            selector: Arc::new(Uniform),
            config: EngineConfig::default(),
        })
    }

    /// Set the evaluator.
    pub fn with_evaluator(mut self, evaluator: Arc<dyn Evaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Set the mutator selection policy.
    pub fn with_selector(mut self, selector: Arc<dyn SelectionPolicy>) -> Self {
        self.selector = selector;
        self
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the registry.
    pub fn registry(&self) -> &MutatorRegistry {
        &self.registry
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Context for `worker`, seeded deterministically from the config.
    pub fn context(&self, worker: usize) -> FuzzContext {
        FuzzContext::new(
            self.config.seed.wrapping_add(worker as u64),
            Arc::clone(&self.corpus),
        )
    }

    /// Run one trial and report the verdict to the mutator that produced it.
    pub fn run_trial(&self, ctx: &mut FuzzContext) -> TrialOutcome {
        let Some(mutator) = self.selector.select(self.registry.mutators(), ctx) else {
            debug!("no mutator selected");
            return TrialOutcome::Skipped;
        };
        let corpus = Arc::clone(&self.corpus);
        let Some(seed) = ctx.choose(&corpus) else {
            return TrialOutcome::Skipped;
        };

        let name = mutator.name();
        let Some(sample) = mutator.mutate(seed, ctx) else {
            return TrialOutcome::NoMutation { mutator: name };
        };

        match self.evaluator.evaluate(&sample) {
            Verdict::Valid => {
                mutator.produced_valid_sample();
                trace!(mutator = name, sample = %sample.id(), "valid sample");
                TrialOutcome::Valid { mutator: name }
            }
            Verdict::Invalid => {
                mutator.produced_invalid_sample();
                trace!(mutator = name, sample = %sample.id(), "invalid sample");
                TrialOutcome::Invalid { mutator: name }
            }
        }
    }

    fn run_worker(&self, worker: usize) -> Tally {
        let mut ctx = self.context(worker);
        let mut tally = Tally::default();

        for _ in 0..self.config.share(worker) {
            tally.record(self.run_trial(&mut ctx));
        }

        debug!(worker, iterations = tally.iterations, valid = tally.valid, "worker finished");
        tally
    }

    /// Run the configured number of trials across the workers.
    pub async fn run(&self) -> Result<EngineReport> {
        let started_at = Utc::now();
        info!(
            iterations = self.config.iterations,
            workers = self.config.workers.get(),
            mutators = self.registry.len(),
            seeds = self.corpus.len(),
            "starting fuzzing run"
        );

        let mut workers = JoinSet::new();
        for worker in 0..self.config.workers.get() {
            let engine = self.clone();
            workers.spawn_blocking(move || engine.run_worker(worker));
        }

        // Blocking workers cannot be aborted, so wait for all of them even
        // after a failure; nothing may touch the trackers once `run` returns.
        let mut total = Tally::default();
        let mut failure = None;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(tally) => total.merge(tally),
                Err(e) => {
                    warn!("worker failed: {}", e);
                    failure.get_or_insert(EngineError::Worker(e.to_string()));
                }
            }
        }
        if let Some(e) = failure {
            return Err(e);
        }

        let report = EngineReport {
            started_at,
            finished_at: Utc::now(),
            iterations: total.iterations,
            valid_samples: total.valid,
            invalid_samples: total.invalid,
            no_mutation: total.no_mutation,
            skipped: total.skipped,
            mutators: self.registry.stats(),
        };

        info!(
            iterations = report.iterations,
            valid = report.valid_samples,
            invalid = report.invalid_samples,
            no_mutation = report.no_mutation,
            "fuzzing run complete"
        );

        Ok(report)
    }
}
