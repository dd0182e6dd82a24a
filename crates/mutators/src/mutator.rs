//! Mutation strategy abstraction.

use fuzzkit_core::{FuzzContext, Program};

/// A mutation strategy takes an existing program and produces a new one.
///
/// Implementations must provide both methods; there is no fallback body for
/// `mutate`, so a strategy that forgets it does not build:
///
/// ```compile_fail
/// use fuzzkit_mutators::Mutator;
///
/// struct Incomplete;
///
/// impl Mutator for Incomplete {
///     fn name(&self) -> &'static str {
///         "Incomplete"
///     }
/// }
/// ```
pub trait Mutator: Send + Sync {
    /// Stable identifier, unique among the strategies of one registry.
    ///
    /// Used as the key for statistics and logging.
    fn name(&self) -> &'static str;

    /// Produce a mutated copy of `program`.
    ///
    /// The input is never modified. Returns `None` when the program's
    /// structure does not allow this kind of mutation; callers should then
    /// try another strategy or another input. All randomness comes from
    /// `ctx`.
    fn mutate(&self, program: &Program, ctx: &mut FuzzContext) -> Option<Program>;
}
