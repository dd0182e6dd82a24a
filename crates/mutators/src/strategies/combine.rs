//! Whole-program combination.

use super::insert_foreign;
use crate::Mutator;
use fuzzkit_core::{FuzzContext, Program};

/// Inserts an entire corpus program at a random position.
#[derive(Debug, Default, Clone, Copy)]
pub struct CombineMutator;

impl CombineMutator {
    /// Strategy name.
    pub const NAME: &'static str = "CombineMutator";

    /// Create the strategy.
    pub fn new() -> Self {
        Self
    }
}

impl Mutator for CombineMutator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn mutate(&self, program: &Program, ctx: &mut FuzzContext) -> Option<Program> {
        let donor = ctx.random_program()?;
        let position = ctx.index(program.len() + 1);
        insert_foreign(program, position, donor.instructions(), ctx.next_program_id())
    }
}
