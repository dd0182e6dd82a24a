//! Program model - a straight-line list of instructions in SSA form.

use crate::error::{ProgramError, Result};
use crate::id::{ProgramId, Variable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Binary arithmetic and bitwise operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Division
    Div,
    /// Remainder
    Mod,
    /// Bitwise and
    BitAnd,
    /// Bitwise or
    BitOr,
    /// Bitwise exclusive or
    Xor,
    /// Left shift
    LShift,
    /// Right shift
    RShift,
}

impl BinaryOperator {
    /// All operators, in declaration order.
    pub const ALL: [BinaryOperator; 10] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::BitAnd,
        Self::BitOr,
        Self::Xor,
        Self::LShift,
        Self::RShift,
    ];

    /// Source-level token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::Xor => "^",
            Self::LShift => "<<",
            Self::RShift => ">>",
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparator {
    /// Loose equality
    Equal,
    /// Loose inequality
    NotEqual,
    /// Strict equality
    StrictEqual,
    /// Less than
    LessThan,
    /// Less than or equal
    LessThanOrEqual,
    /// Greater than
    GreaterThan,
    /// Greater than or equal
    GreaterThanOrEqual,
}

impl Comparator {
    /// All comparators, in declaration order.
    pub const ALL: [Comparator; 7] = [
        Self::Equal,
        Self::NotEqual,
        Self::StrictEqual,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
    ];

    /// Source-level token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::StrictEqual => "===",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        }
    }
}

/// The operation performed by an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Load an integer literal
    LoadInteger(i64),
    /// Load a string literal
    LoadString(String),
    /// Apply a binary operator to two inputs
    BinaryOperation(BinaryOperator),
    /// Compare two inputs
    Compare(Comparator),
    /// Call a named builtin with `arity` inputs
    CallBuiltin {
        /// Builtin name, e.g. `Math.max`
        name: String,
        /// Number of arguments
        arity: u8,
    },
    /// Print the input; produces no value
    Print,
}

impl Operation {
    /// Number of inputs this operation consumes.
    pub fn num_inputs(&self) -> usize {
        match self {
            Self::LoadInteger(_) | Self::LoadString(_) => 0,
            Self::BinaryOperation(_) | Self::Compare(_) => 2,
            Self::CallBuiltin { arity, .. } => usize::from(*arity),
            Self::Print => 1,
        }
    }

    /// Whether the operation defines a new variable.
    pub fn has_output(&self) -> bool {
        !matches!(self, Self::Print)
    }

    /// Whether the operation carries a parameter that can be changed in place.
    pub fn is_mutable(&self) -> bool {
        matches!(
            self,
            Self::LoadInteger(_) | Self::LoadString(_) | Self::BinaryOperation(_) | Self::Compare(_)
        )
    }
}

/// A single instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// What the instruction does
    pub operation: Operation,

    /// Variables read by the instruction
    #[serde(default)]
    pub inputs: Vec<Variable>,

    /// Variable defined by the instruction, if any
    #[serde(default)]
    pub output: Option<Variable>,
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(output) = self.output {
            write!(f, "{} = ", output)?;
        }
        let input = |i: usize| self.inputs.get(i).map(|v| v.to_string()).unwrap_or_default();
        match &self.operation {
            Operation::LoadInteger(value) => write!(f, "{}", value),
            Operation::LoadString(value) => write!(f, "{:?}", value),
            Operation::BinaryOperation(op) => write!(f, "{} {} {}", input(0), op.token(), input(1)),
            Operation::Compare(op) => write!(f, "{} {} {}", input(0), op.token(), input(1)),
            Operation::CallBuiltin { name, .. } => {
                let args: Vec<String> = self.inputs.iter().map(|v| v.to_string()).collect();
                write!(f, "{}({})", name, args.join(", "))
            }
            Operation::Print => write!(f, "print({})", input(0)),
        }
    }
}

/// An immutable program: an ordered list of instructions.
///
/// Programs are never modified after construction. Mutations build a new
/// program through [`ProgramBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Unique identifier
    #[serde(default)]
    id: ProgramId,

    /// Instructions in execution order
    instructions: Vec<Instruction>,
}

impl Program {
    /// Create a program without validating it.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self {
            id: ProgramId::new(),
            instructions,
        }
    }

    /// Create a program with a given identifier, without validating it.
    pub fn with_id(id: ProgramId, instructions: Vec<Instruction>) -> Self {
        Self { id, instructions }
    }

    /// Create a program and validate it.
    pub fn parse(instructions: Vec<Instruction>) -> Result<Self> {
        let program = Self::new(instructions);
        program.check()?;
        Ok(program)
    }

    /// Create an empty program.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Get the program ID.
    pub fn id(&self) -> ProgramId {
        self.id
    }

    /// Get the instructions.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of variables defined by the program.
    pub fn num_variables(&self) -> usize {
        self.instructions.iter().filter(|i| i.output.is_some()).count()
    }

    /// Variables defined by the instructions before `index`.
    pub fn variables_before(&self, index: usize) -> Vec<Variable> {
        self.instructions[..index.min(self.len())]
            .iter()
            .filter_map(|i| i.output)
            .collect()
    }

    /// Validate the program.
    ///
    /// Every input must be defined by an earlier instruction, every
    /// operation must receive its declared number of inputs and outputs must
    /// be numbered densely in definition order.
    pub fn check(&self) -> Result<()> {
        let mut next = 0u32;

        for (index, instruction) in self.instructions.iter().enumerate() {
            let expected = instruction.operation.num_inputs();
            if instruction.inputs.len() != expected {
                return Err(ProgramError::ArityMismatch {
                    index,
                    expected,
                    found: instruction.inputs.len(),
                });
            }

            if let Some(variable) = instruction.inputs.iter().find(|v| v.0 >= next) {
                return Err(ProgramError::UndefinedVariable {
                    index,
                    variable: *variable,
                });
            }

            match (instruction.operation.has_output(), instruction.output) {
                (true, Some(output)) => {
                    if output.0 != next {
                        return Err(ProgramError::NonSequentialOutput {
                            index,
                            expected: Variable(next),
                            found: output,
                        });
                    }
                    next += 1;
                }
                (false, None) => {}
                _ => return Err(ProgramError::OutputMismatch { index }),
            }
        }

        Ok(())
    }

    /// Parse a JSON array of programs and validate each of them.
    pub fn list_from_json(json: &str) -> Result<Vec<Program>> {
        let programs: Vec<Program> = serde_json::from_str(json)?;
        for program in &programs {
            program.check()?;
        }
        Ok(programs)
    }

    /// Load a JSON array of programs from a file.
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<Program>> {
        let json = std::fs::read_to_string(path)?;
        Self::list_from_json(&json)
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for instruction in &self.instructions {
            writeln!(f, "{}", instruction)?;
        }
        Ok(())
    }
}

/// Incrementally builds a program, allocating variables as it goes.
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    instructions: Vec<Instruction>,
    next_variable: u32,
}

impl ProgramBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation, returning the variable it defines.
    pub fn append(&mut self, operation: Operation, inputs: Vec<Variable>) -> Option<Variable> {
        let output = operation.has_output().then(|| {
            let variable = Variable(self.next_variable);
            self.next_variable += 1;
            variable
        });

        self.instructions.push(Instruction {
            operation,
            inputs,
            output,
        });

        output
    }

    /// Copy an instruction from another program.
    ///
    /// Inputs are translated through `renames`, and the copied output is
    /// recorded there so later instructions of the same source can refer to it.
    pub fn adopt(
        &mut self,
        instruction: &Instruction,
        renames: &mut HashMap<Variable, Variable>,
    ) -> Result<()> {
        let inputs = instruction
            .inputs
            .iter()
            .map(|v| {
                renames.get(v).copied().ok_or(ProgramError::UndefinedVariable {
                    index: self.instructions.len(),
                    variable: *v,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let output = self.append(instruction.operation.clone(), inputs);
        if let (Some(old), Some(new)) = (instruction.output, output) {
            renames.insert(old, new);
        }

        Ok(())
    }

    /// Copy every instruction of `program`, renaming its variables.
    pub fn append_program(&mut self, program: &Program) -> Result<()> {
        let mut renames = HashMap::new();
        for instruction in program.instructions() {
            self.adopt(instruction, &mut renames)?;
        }
        Ok(())
    }

    /// Variables visible at the current position.
    pub fn visible_variables(&self) -> Vec<Variable> {
        (0..self.next_variable).map(Variable).collect()
    }

    /// Number of instructions appended so far.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Finish building.
    pub fn finish(self) -> Program {
        Program::new(self.instructions)
    }

    /// Finish building under a given identifier.
    pub fn finish_with_id(self, id: ProgramId) -> Program {
        Program::with_id(id, self.instructions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_program() -> Program {
        let mut b = ProgramBuilder::new();
        let a = b.append(Operation::LoadInteger(1), vec![]).unwrap();
        let c = b.append(Operation::LoadInteger(2), vec![]).unwrap();
        let sum = b.append(Operation::BinaryOperation(BinaryOperator::Add), vec![a, c]).unwrap();
        b.append(Operation::Print, vec![sum]);
        b.finish()
    }

    #[test]
    fn test_builder_produces_valid_program() {
        let program = sample_program();
        assert_eq!(program.len(), 4);
        assert_eq!(program.num_variables(), 3);
        assert!(program.check().is_ok());
    }

    #[test]
    fn test_check_rejects_undefined_variable() {
        let program = Program::new(vec![Instruction {
            operation: Operation::Print,
            inputs: vec![Variable(0)],
            output: None,
        }]);

        assert!(matches!(
            program.check(),
            Err(ProgramError::UndefinedVariable { index: 0, .. })
        ));
    }

    #[test]
    fn test_check_rejects_wrong_arity() {
        let program = Program::new(vec![
            Instruction {
                operation: Operation::LoadInteger(1),
                inputs: vec![],
                output: Some(Variable(0)),
            },
            Instruction {
                operation: Operation::BinaryOperation(BinaryOperator::Add),
                inputs: vec![Variable(0)],
                output: Some(Variable(1)),
            },
        ]);

        assert!(matches!(
            program.check(),
            Err(ProgramError::ArityMismatch { index: 1, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_check_rejects_gap_in_numbering() {
        let program = Program::new(vec![Instruction {
            operation: Operation::LoadInteger(1),
            inputs: vec![],
            output: Some(Variable(3)),
        }]);

        assert!(matches!(
            program.check(),
            Err(ProgramError::NonSequentialOutput { index: 0, .. })
        ));
    }

    #[test]
    fn test_check_rejects_missing_output() {
        let program = Program::new(vec![Instruction {
            operation: Operation::LoadString("x".to_string()),
            inputs: vec![],
            output: None,
        }]);

        assert!(matches!(program.check(), Err(ProgramError::OutputMismatch { index: 0 })));
    }

    #[test]
    fn test_parse_validates() {
        let program = Program::parse(sample_program().instructions().to_vec()).unwrap();
        assert_eq!(program.len(), 4);

        let dangling = vec![Instruction {
            operation: Operation::Print,
            inputs: vec![Variable(0)],
            output: None,
        }];
        assert!(matches!(
            Program::parse(dangling),
            Err(ProgramError::UndefinedVariable { index: 0, .. })
        ));
    }

    #[test]
    fn test_finish_with_id_keeps_id() {
        let id = ProgramId::from_bits(7);
        let mut b = ProgramBuilder::new();
        b.append(Operation::LoadInteger(1), vec![]);
        let program = b.finish_with_id(id);

        assert_eq!(program.id(), id);
        assert_eq!(program, Program::with_id(id, program.instructions().to_vec()));
    }

    #[test]
    fn test_variables_before() {
        let program = sample_program();
        assert!(program.variables_before(0).is_empty());
        assert_eq!(program.variables_before(2), vec![Variable(0), Variable(1)]);
        assert_eq!(program.variables_before(100).len(), 3);
    }

    #[test]
    fn test_append_program_renames_variables() {
        let donor = sample_program();

        let mut b = ProgramBuilder::new();
        b.append(Operation::LoadString("prefix".to_string()), vec![]);
        b.append_program(&donor).unwrap();
        let combined = b.finish();

        assert!(combined.check().is_ok());
        assert_eq!(combined.len(), 5);
        assert_eq!(combined.instructions()[3].inputs, vec![Variable(1), Variable(2)]);
    }

    #[test]
    fn test_adopt_fails_on_unknown_input() {
        let donor = sample_program();
        let mut b = ProgramBuilder::new();
        let mut renames = HashMap::new();

        let result = b.adopt(&donor.instructions()[2], &mut renames);
        assert!(matches!(result, Err(ProgramError::UndefinedVariable { .. })));
        assert!(b.is_empty());
    }

    #[test]
    fn test_list_from_json() {
        let json = r#"[
            { "instructions": [
                { "operation": { "LoadInteger": 4 }, "output": 0 },
                { "operation": "Print", "inputs": [0] }
            ] }
        ]"#;

        let programs = Program::list_from_json(json).unwrap();
        assert_eq!(programs.len(), 1);
        assert_eq!(programs[0].len(), 2);
    }

    #[test]
    fn test_list_from_json_rejects_invalid_program() {
        let json = r#"[ { "instructions": [ { "operation": "Print", "inputs": [0] } ] } ]"#;
        assert!(Program::list_from_json(json).is_err());
    }

    #[test]
    fn test_load_all_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seeds.json");
        let original = sample_program();
        std::fs::write(&path, serde_json::to_string(&vec![original.clone()]).unwrap()).unwrap();

        let programs = Program::load_all(&path).unwrap();
        assert_eq!(programs, vec![original]);
    }

    #[test]
    fn test_bundled_seeds_are_valid() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../seeds/basic.json");
        let programs = Program::load_all(path).unwrap();
        assert_eq!(programs.len(), 2);
    }

    #[test]
    fn test_display() {
        let text = sample_program().to_string();
        assert!(text.contains("v2 = v0 + v1"));
        assert!(text.contains("print(v2)"));
    }
}
