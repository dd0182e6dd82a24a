//! Input rewiring.

use crate::Mutator;
use fuzzkit_core::{FuzzContext, Program, Variable};

/// Replaces one input of a random instruction with another visible variable.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputMutator;

impl InputMutator {
    /// Strategy name.
    pub const NAME: &'static str = "InputMutator";

    /// Create the strategy.
    pub fn new() -> Self {
        Self
    }
}

impl Mutator for InputMutator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn mutate(&self, program: &Program, ctx: &mut FuzzContext) -> Option<Program> {
        // An alternative input needs at least two variables in scope.
        let mut defined = 0;
        let mut candidates = Vec::new();
        for (index, instruction) in program.instructions().iter().enumerate() {
            if !instruction.inputs.is_empty() && defined >= 2 {
                candidates.push(index);
            }
            if instruction.output.is_some() {
                defined += 1;
            }
        }

        let index = *ctx.choose(&candidates)?;
        let inputs = &program.instructions()[index].inputs;
        let slot = ctx.index(inputs.len());
        let current = inputs[slot];

        let alternatives: Vec<Variable> = program
            .variables_before(index)
            .into_iter()
            .filter(|v| *v != current)
            .collect();
        let replacement = *ctx.choose(&alternatives)?;

        let mut instructions = program.instructions().to_vec();
        instructions[index].inputs[slot] = replacement;
        Some(Program::with_id(ctx.next_program_id(), instructions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::testing::{literal_only, sample_program};

    #[test]
    fn test_rewires_exactly_one_input() {
        let program = sample_program();
        let before = program.clone();
        let mut ctx = FuzzContext::without_corpus(17);

        for _ in 0..50 {
            let mutated = InputMutator::new().mutate(&program, &mut ctx).unwrap();
            assert!(mutated.check().is_ok());
            assert_eq!(mutated.len(), program.len());

            let changed: usize = program
                .instructions()
                .iter()
                .zip(mutated.instructions())
                .map(|(a, b)| a.inputs.iter().zip(&b.inputs).filter(|(x, y)| x != y).count())
                .sum();
            assert_eq!(changed, 1);
        }

        assert_eq!(program, before);
    }

    #[test]
    fn test_nothing_to_rewire() {
        let mut ctx = FuzzContext::without_corpus(0);
        assert!(InputMutator::new().mutate(&literal_only(), &mut ctx).is_none());
        assert!(InputMutator::new().mutate(&Program::empty(), &mut ctx).is_none());
    }
}
