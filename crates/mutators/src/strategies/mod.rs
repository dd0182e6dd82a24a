//! Built-in mutation strategies.

mod combine;
mod input;
mod insertion;
mod operation;
mod splice;

pub use combine::CombineMutator;
pub use input::InputMutator;
pub use insertion::InsertionMutator;
pub use operation::OperationMutator;
pub use splice::SpliceMutator;

use crate::{Mutator, MutatorConfig};
use fuzzkit_core::{Instruction, Program, ProgramBuilder, ProgramId};
use std::collections::HashMap;

/// Names of all built-in strategies.
pub const ALL: &[&str] = &[
    InputMutator::NAME,
    OperationMutator::NAME,
    InsertionMutator::NAME,
    SpliceMutator::NAME,
    CombineMutator::NAME,
];

/// Instantiate a built-in strategy by name.
pub fn build(name: &str, config: &MutatorConfig) -> Option<Box<dyn Mutator>> {
    let strategy: Box<dyn Mutator> = match name {
        InputMutator::NAME => Box::new(InputMutator::new()),
        OperationMutator::NAME => Box::new(OperationMutator::new()),
        InsertionMutator::NAME => Box::new(InsertionMutator::new(config.max_insertions)),
        SpliceMutator::NAME => Box::new(SpliceMutator::new(config.max_splice_len)),
        CombineMutator::NAME => Box::new(CombineMutator::new()),
        _ => return None,
    };
    Some(strategy)
}

/// Build `host` with `foreign` instructions inserted before `position`.
///
/// Host and foreign variables are renamed independently, so the foreign
/// instructions must only reference each other. Returns `None` if they don't.
pub(crate) fn insert_foreign<'a>(
    host: &Program,
    position: usize,
    foreign: impl IntoIterator<Item = &'a Instruction>,
    id: ProgramId,
) -> Option<Program> {
    let position = position.min(host.len());
    let (head, tail) = host.instructions().split_at(position);

    let mut b = ProgramBuilder::new();
    let mut host_renames = HashMap::new();
    let mut foreign_renames = HashMap::new();

    for instruction in head {
        b.adopt(instruction, &mut host_renames).ok()?;
    }
    for instruction in foreign {
        b.adopt(instruction, &mut foreign_renames).ok()?;
    }
    for instruction in tail {
        b.adopt(instruction, &mut host_renames).ok()?;
    }

    Some(b.finish_with_id(id))
}

#[cfg(test)]
pub(crate) mod testing {
    use fuzzkit_core::{BinaryOperator, Comparator, Operation, Program, ProgramBuilder};

    /// `v0 = 7; v1 = "foo"; v2 = v0 + v0; v3 = v2 < v0; print(v3)`
    pub fn sample_program() -> Program {
        let mut b = ProgramBuilder::new();
        let a = b.append(Operation::LoadInteger(7), vec![]).unwrap();
        b.append(Operation::LoadString("foo".to_string()), vec![]);
        let sum = b.append(Operation::BinaryOperation(BinaryOperator::Add), vec![a, a]).unwrap();
        let cmp = b.append(Operation::Compare(Comparator::LessThan), vec![sum, a]).unwrap();
        b.append(Operation::Print, vec![cmp]);
        b.finish()
    }

    /// A single literal load; nothing to rewire.
    pub fn literal_only() -> Program {
        let mut b = ProgramBuilder::new();
        b.append(Operation::LoadInteger(1), vec![]);
        b.finish()
    }
}
