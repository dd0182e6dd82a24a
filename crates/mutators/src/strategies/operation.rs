//! Operation parameter mutation.

use crate::Mutator;
use fuzzkit_core::{FuzzContext, Operation, Program};

/// Changes the parameter of a literal load, binary operation or comparison.
#[derive(Debug, Default, Clone, Copy)]
pub struct OperationMutator;

impl OperationMutator {
    /// Strategy name.
    pub const NAME: &'static str = "OperationMutator";

    /// Create the strategy.
    pub fn new() -> Self {
        Self
    }

    fn mutate_operation(operation: &Operation, ctx: &mut FuzzContext) -> Option<Operation> {
        let mutated = match operation {
            Operation::LoadInteger(value) => Operation::LoadInteger(ctx.mutate_integer(*value)),
            Operation::LoadString(value) => {
                let fresh = ctx.random_string();
                if fresh == *value {
                    Operation::LoadString(format!("{}{}", value, value.len()))
                } else {
                    Operation::LoadString(fresh)
                }
            }
            Operation::BinaryOperation(op) => {
                Operation::BinaryOperation(ctx.random_binary_operator(Some(*op)))
            }
            Operation::Compare(op) => Operation::Compare(ctx.random_comparator(Some(*op))),
            Operation::CallBuiltin { .. } | Operation::Print => return None,
        };
        Some(mutated)
    }
}

impl Mutator for OperationMutator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn mutate(&self, program: &Program, ctx: &mut FuzzContext) -> Option<Program> {
        let candidates: Vec<usize> = program
            .instructions()
            .iter()
            .enumerate()
            .filter(|(_, i)| i.operation.is_mutable())
            .map(|(index, _)| index)
            .collect();

        let index = *ctx.choose(&candidates)?;
        let mut instructions = program.instructions().to_vec();
        instructions[index].operation = Self::mutate_operation(&instructions[index].operation, ctx)?;

        Some(Program::with_id(ctx.next_program_id(), instructions))
    }
}
