//! Random code generation helpers.

use crate::context::FuzzContext;
use crate::id::Variable;
use crate::program::{BinaryOperator, Comparator, Operation};

/// Integers that tend to hit edge cases.
pub const INTERESTING_INTEGERS: &[i64] = &[
    -9007199254740993,
    -9007199254740992,
    -4294967297,
    -4294967296,
    -2147483649,
    -2147483648,
    -65537,
    -65536,
    -1,
    0,
    1,
    2,
    16,
    64,
    255,
    256,
    1024,
    65535,
    65536,
    2147483647,
    2147483648,
    4294967295,
    4294967296,
    9007199254740991,
    9007199254740992,
];

/// String literals used by generation.
pub const INTERESTING_STRINGS: &[&str] = &[
    "",
    "a",
    "foo",
    "length",
    "prototype",
    "constructor",
    "__proto__",
    "valueOf",
    "toString",
    "0",
    "-1",
    "NaN",
    "Infinity",
];

/// Builtins that may be called, with their arity.
pub const BUILTINS: &[(&str, u8)] = &[
    ("Math.abs", 1),
    ("Math.floor", 1),
    ("Math.max", 2),
    ("Math.min", 2),
    ("Math.pow", 2),
    ("String", 1),
    ("Number", 1),
    ("parseInt", 2),
    ("isNaN", 1),
];

impl FuzzContext {
    /// A random integer, biased towards interesting values.
    pub fn random_integer(&mut self) -> i64 {
        if self.chance(0.5) {
            if let Some(v) = self.choose(INTERESTING_INTEGERS) {
                return *v;
            }
        }
        self.between(0, 0x100) as i64 - 0x80
    }

    /// A variant of `value`: small delta, negation, or a fresh value.
    pub fn mutate_integer(&mut self, value: i64) -> i64 {
        match self.index(3) {
            0 => value.wrapping_add(self.between(1, 16) as i64),
            1 => value.wrapping_sub(self.between(1, 16) as i64),
            _ => {
                let fresh = self.random_integer();
                if fresh == value {
                    value.wrapping_neg().wrapping_add(1)
                } else {
                    fresh
                }
            }
        }
    }

    /// A random string literal.
    pub fn random_string(&mut self) -> String {
        self.choose(INTERESTING_STRINGS)
            .map(|s| s.to_string())
            .unwrap_or_default()
    }

    /// A random binary operator other than `except`.
    pub fn random_binary_operator(&mut self, except: Option<BinaryOperator>) -> BinaryOperator {
        let candidates: Vec<_> = BinaryOperator::ALL
            .into_iter()
            .filter(|op| Some(*op) != except)
            .collect();
        self.choose(&candidates).copied().unwrap_or(BinaryOperator::Add)
    }

    /// A random comparator other than `except`.
    pub fn random_comparator(&mut self, except: Option<Comparator>) -> Comparator {
        let candidates: Vec<_> = Comparator::ALL
            .into_iter()
            .filter(|op| Some(*op) != except)
            .collect();
        self.choose(&candidates).copied().unwrap_or(Comparator::Equal)
    }

    /// Generate one operation together with inputs drawn from `visible`.
    ///
    /// With no visible variables only literal loads are produced.
    pub fn generate_instruction(&mut self, visible: &[Variable]) -> (Operation, Vec<Variable>) {
        if visible.is_empty() || self.chance(0.25) {
            let operation = if self.chance(0.5) {
                Operation::LoadInteger(self.random_integer())
            } else {
                Operation::LoadString(self.random_string())
            };
            return (operation, Vec::new());
        }

        let operation = match self.index(4) {
            0 => Operation::BinaryOperation(self.random_binary_operator(None)),
            1 => Operation::Compare(self.random_comparator(None)),
            2 => {
                let (name, arity) = BUILTINS[self.index(BUILTINS.len())];
                Operation::CallBuiltin {
                    name: name.to_string(),
                    arity,
                }
            }
            _ => Operation::Print,
        };

        let inputs = (0..operation.num_inputs())
            .map(|_| visible[self.index(visible.len())])
            .collect();

        (operation, inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::ProgramBuilder;

    #[test]
    fn test_generate_without_visible_loads_literal() {
        let mut ctx = FuzzContext::without_corpus(11);
        for _ in 0..50 {
            let (operation, inputs) = ctx.generate_instruction(&[]);
            assert!(inputs.is_empty());
            assert!(matches!(operation, Operation::LoadInteger(_) | Operation::LoadString(_)));
        }
    }

    #[test]
    fn test_generated_code_is_valid() {
        let mut ctx = FuzzContext::without_corpus(5);
        let mut b = ProgramBuilder::new();

        for _ in 0..200 {
            let visible = b.visible_variables();
            let (operation, inputs) = ctx.generate_instruction(&visible);
            b.append(operation, inputs);
        }

        assert!(b.finish().check().is_ok());
    }

    #[test]
    fn test_mutate_integer_changes_value() {
        let mut ctx = FuzzContext::without_corpus(9);
        for value in [0, 1, -1, i64::MAX, i64::MIN] {
            for _ in 0..20 {
                assert_ne!(ctx.mutate_integer(value), value);
            }
        }
    }

    #[test]
    fn test_random_operator_excludes_current() {
        let mut ctx = FuzzContext::without_corpus(2);
        for _ in 0..50 {
            assert_ne!(ctx.random_binary_operator(Some(BinaryOperator::Add)), BinaryOperator::Add);
            assert_ne!(ctx.random_comparator(Some(Comparator::LessThan)), Comparator::LessThan);
        }
    }
}
