//! Code insertion.

use crate::Mutator;
use fuzzkit_core::{FuzzContext, Program, ProgramBuilder};
use std::collections::HashMap;

/// Inserts freshly generated instructions at a random position.
#[derive(Debug, Clone, Copy)]
pub struct InsertionMutator {
    max_insertions: usize,
}

impl InsertionMutator {
    /// Strategy name.
    pub const NAME: &'static str = "InsertionMutator";

    /// Create the strategy. At least one instruction is always inserted.
    pub fn new(max_insertions: usize) -> Self {
        Self {
            max_insertions: max_insertions.max(1),
        }
    }
}

impl Default for InsertionMutator {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Mutator for InsertionMutator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn mutate(&self, program: &Program, ctx: &mut FuzzContext) -> Option<Program> {
        let position = ctx.index(program.len() + 1);
        let count = ctx.between(1, self.max_insertions);
        let (head, tail) = program.instructions().split_at(position);

        let mut b = ProgramBuilder::new();
        let mut renames = HashMap::new();

        for instruction in head {
            b.adopt(instruction, &mut renames).ok()?;
        }
        for _ in 0..count {
            let visible = b.visible_variables();
            let (operation, inputs) = ctx.generate_instruction(&visible);
            b.append(operation, inputs);
        }
        for instruction in tail {
            b.adopt(instruction, &mut renames).ok()?;
        }

        Some(b.finish_with_id(ctx.next_program_id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::testing::sample_program;

    #[test]
    fn test_inserts_within_bounds() {
        let program = sample_program();
        let before = program.clone();
        let mutator = InsertionMutator::new(4);
        let mut ctx = FuzzContext::without_corpus(31);

        for _ in 0..100 {
            let mutated = mutator.mutate(&program, &mut ctx).unwrap();
            assert!(mutated.check().is_ok());
            let added = mutated.len() - program.len();
            assert!((1..=4).contains(&added));
        }

        assert_eq!(program, before);
    }

    #[test]
    fn test_works_on_empty_program() {
        let mut ctx = FuzzContext::without_corpus(0);
        let mutated = InsertionMutator::new(1).mutate(&Program::empty(), &mut ctx).unwrap();
        assert_eq!(mutated.len(), 1);
        assert!(mutated.check().is_ok());
    }

    #[test]
    fn test_zero_bound_is_clamped() {
        let mut ctx = FuzzContext::without_corpus(0);
        let mutated = InsertionMutator::new(0).mutate(&Program::empty(), &mut ctx).unwrap();
        assert_eq!(mutated.len(), 1);
    }
}
