//! Splicing from the corpus.

use super::insert_foreign;
use crate::Mutator;
use fuzzkit_core::{FuzzContext, Program, Variable};
use std::collections::HashSet;

/// Copies a slice of a corpus program, together with the instructions it
/// depends on, into the program at a random position.
#[derive(Debug, Clone, Copy)]
pub struct SpliceMutator {
    max_splice_len: usize,
}

impl SpliceMutator {
    /// Strategy name.
    pub const NAME: &'static str = "SpliceMutator";

    /// Create the strategy.
    pub fn new(max_splice_len: usize) -> Self {
        Self {
            max_splice_len: max_splice_len.max(1),
        }
    }

    /// Indices of `start..end` plus everything they transitively read.
    fn dependency_closure(donor: &Program, start: usize, end: usize) -> Vec<usize> {
        let instructions = donor.instructions();
        let mut keep = vec![false; instructions.len()];
        let mut needed: HashSet<Variable> = HashSet::new();

        for index in start..end {
            keep[index] = true;
            needed.extend(instructions[index].inputs.iter().copied());
        }

        for index in (0..start).rev() {
            let instruction = &instructions[index];
            if instruction.output.is_some_and(|v| needed.contains(&v)) {
                keep[index] = true;
                needed.extend(instruction.inputs.iter().copied());
            }
        }

        keep.iter()
            .enumerate()
            .filter(|&(_, &k)| k)
            .map(|(index, _)| index)
            .collect()
    }
}

impl Default for SpliceMutator {
    fn default() -> Self {
        Self::new(5)
    }
}

impl Mutator for SpliceMutator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn mutate(&self, program: &Program, ctx: &mut FuzzContext) -> Option<Program> {
        let donor = ctx.random_program()?;
        if donor.is_empty() {
            return None;
        }

        let start = ctx.index(donor.len());
        let len = ctx.between(1, self.max_splice_len.min(donor.len() - start));
        let slice = Self::dependency_closure(&donor, start, start + len);

        let position = ctx.index(program.len() + 1);
        insert_foreign(
            program,
            position,
            slice.iter().map(|&index| &donor.instructions()[index]),
            ctx.next_program_id(),
        )
    }
}
