//! Fuzzing context handed to mutation strategies.

use crate::id::ProgramId;
use crate::program::Program;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Supplies randomness, the seed corpus and code generation helpers.
///
/// Each worker owns its own context; the corpus is shared read-only.
#[derive(Debug, Clone)]
pub struct FuzzContext {
    rng: SmallRng,
    corpus: Arc<[Program]>,
}

impl FuzzContext {
    /// Create a context with a deterministic RNG.
    pub fn new(seed: u64, corpus: Arc<[Program]>) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            corpus,
        }
    }

    /// Create a context without a corpus.
    pub fn without_corpus(seed: u64) -> Self {
        Self::new(seed, Arc::from(Vec::<Program>::new()))
    }

    /// Get the underlying RNG.
    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Shared handle to the seed corpus.
    pub fn corpus(&self) -> Arc<[Program]> {
        Arc::clone(&self.corpus)
    }

    /// Uniform index in `0..n`. Returns 0 when `n` is 0.
    pub fn index(&mut self, n: usize) -> usize {
        if n == 0 {
            0
        } else {
            self.rng.gen_range(0..n)
        }
    }

    /// Uniform value in `low..=high`.
    pub fn between(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            low
        } else {
            self.rng.gen_range(low..=high)
        }
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Pick a random element.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Draw an identifier for a newly built program.
    ///
    /// Mutations take their ids from here so that equal seeds yield equal
    /// programs, ids included.
    pub fn next_program_id(&mut self) -> ProgramId {
        ProgramId::from_bits(self.rng.gen())
    }

    /// Pick a random corpus program.
    pub fn random_program(&mut self) -> Option<Program> {
        let corpus = self.corpus();
        self.choose(&corpus).cloned()
    }
}
