//! # ChipAsm
//! A small, forgiving parser for the chipduel register machine assembly.
//!
//! Meant as a companion to [chipduel](), does not require [`std`]: hand it a
//! program as text and get back an ordered [`Program`] of [`Instruction`]s.
//!
//! ## Syntax
//! The language is line oriented, one instruction per line:
//! ```text
//! ; countdown from AX to 1
//! loop: HLT AX
//!       SUB AX, 1
//!       CMP AX, 0
//!       JNE loop
//! ```
//! - everything from the first `;` onward is a comment.
//! - an optional `label:` prefix names the line. Only the first colon counts,
//!   any further colon belongs to the instruction text.
//! - a line holding only a label is kept as a bare label.
//! - the first token is the mnemonic, matched case-insensitively. The others are
//!   operands, separated by whitespace and/or commas, kept verbatim.
//!
//! ## Parsing never fails
//! There is no semantic validation here. Unknown mnemonics are kept as
//! [`Opcode::Unknown`], operand arity and types are not checked, and duplicate
//! labels are kept as-is. Rejecting any of these is left to the machine
//! executing the program.

#![no_std]

extern crate alloc;

use alloc::{
    borrow::ToOwned,
    string::{String, ToString},
    vec::Vec,
};
use core::{fmt, ops::Index};


/// Marks the start of a line comment.
pub const COMMENT_CHAR: char = ';';
/// Separates a label from the instruction text of its line.
pub const LABEL_SEPARATOR: char = ':';

/// Operation mnemonic of an [`Instruction`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    Mov,
    Add,
    Sub,
    Mul,
    Cmp,
    Jmp,
    Je,
    Jne,
    Push,
    Pop,
    Hlt,
    /// A mnemonic that is not part of the instruction set, upper-cased.
    Unknown(String),
}
impl Opcode {
    /// Parses a mnemonic, ignoring its case.
    ///
    /// This never fails: anything unrecognized becomes [`Opcode::Unknown`].
    /// # Example
    /// ```rust
    /// # use chipasm::Opcode;
    /// assert_eq!(Opcode::from_mnemonic("jne"), Opcode::Jne);
    /// assert_eq!(Opcode::from_mnemonic("foo"), Opcode::Unknown("FOO".into()));
    /// ```
    pub fn from_mnemonic(mnemonic: &str) -> Self {
        let upper = mnemonic.to_uppercase();
        match upper.as_str() {
            "MOV" => Self::Mov,
            "ADD" => Self::Add,
            "SUB" => Self::Sub,
            "MUL" => Self::Mul,
            "CMP" => Self::Cmp,
            "JMP" => Self::Jmp,
            "JE" => Self::Je,
            "JNE" => Self::Jne,
            "PUSH" => Self::Push,
            "POP" => Self::Pop,
            "HLT" => Self::Hlt,
            _ => Self::Unknown(upper),
        }
    }

    /// Upper-case mnemonic of this opcode.
    pub fn mnemonic(&self) -> &str {
        match self {
            Self::Mov => "MOV",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Cmp => "CMP",
            Self::Jmp => "JMP",
            Self::Je => "JE",
            Self::Jne => "JNE",
            Self::Push => "PUSH",
            Self::Pop => "POP",
            Self::Hlt => "HLT",
            Self::Unknown(name) => name.as_str(),
        }
    }
}
impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A single parsed line.
///
/// `opcode` is [`None`] for a bare label line. Operands are kept as written,
/// resolving them to registers or literals happens at execution time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub opcode: Option<Opcode>,
    pub operands: Vec<String>,
    pub label: Option<String>,
}
impl Instruction {
    /// Returns the operand at `index`, if the line has that many.
    pub fn operand(&self, index: usize) -> Option<&str> {
        self.operands.get(index).map(String::as_str)
    }
}
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{label}{LABEL_SEPARATOR}")?;
            if self.opcode.is_some() {
                f.write_str(" ")?;
            }
        }
        if let Some(opcode) = &self.opcode {
            write!(f, "{opcode}")?;
            for (i, operand) in self.operands.iter().enumerate() {
                f.write_str(if i == 0 { " " } else { ", " })?;
                f.write_str(operand)?;
            }
        }
        Ok(())
    }
}

/// Ordered sequence of [`Instruction`]s, along with the source line each one
/// was read from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
    // 1-based, parallel to `instructions`
    lines: Vec<usize>,
}
impl Program {
    /// Parses a program from its source text. Same as [`parse_program`].
    pub fn parse(source: &str) -> Self {
        let mut program = Self::default();
        for (number, raw) in source.split('\n').enumerate() {
            if let Some(instruction) = parse_line(raw) {
                log::trace!("line {}: {instruction}", number + 1);
                program.instructions.push(instruction);
                program.lines.push(number + 1);
            }
        }
        log::debug!("parsed {} instructions", program.instructions.len());
        program
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
    pub fn iter(&self) -> core::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Returns the index of the first instruction carrying `label`.
    ///
    /// Labels are not required to be unique, the earliest one wins.
    /// # Example
    /// ```rust
    /// # use chipasm::Program;
    /// let program = Program::parse("a: MOV AX, 1\nb:\na: HLT AX");
    /// assert_eq!(program.label_index("a"), Some(0));
    /// assert_eq!(program.label_index("b"), Some(1));
    /// assert_eq!(program.label_index("c"), None);
    /// ```
    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.instructions
            .iter()
            .position(|i| i.label.as_deref() == Some(label))
    }

    /// Returns the 1-based source line the instruction at `index` came from.
    pub fn source_line(&self, index: usize) -> Option<usize> {
        self.lines.get(index).copied()
    }
}
impl Index<usize> for Program {
    type Output = Instruction;
    fn index(&self, index: usize) -> &Self::Output {
        &self.instructions[index]
    }
}
impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = core::slice::Iter<'a, Instruction>;
    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}
impl From<Vec<Instruction>> for Program {
    /// Builds a program from instructions that were not read from text. Each
    /// instruction is attributed to its own line.
    fn from(instructions: Vec<Instruction>) -> Self {
        let lines = (1..=instructions.len()).collect();
        Self {
            instructions,
            lines,
        }
    }
}
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.instructions {
            writeln!(f, "{instruction}")?;
        }
        Ok(())
    }
}

/// Parses source text into an ordered sequence of instructions.
///
/// Total function: every input yields a program, possibly empty.
/// # Example
/// ```rust
/// # use chipasm::{parse_program, Opcode};
/// let program = parse_program("MOV AX, 5 ; load");
/// assert_eq!(program[0].opcode, Some(Opcode::Mov));
/// assert_eq!(program[0].operands, ["AX", "5"]);
/// ```
pub fn parse_program(source: &str) -> Program {
    Program::parse(source)
}

/// Strips the comment of a line and splits off its label.
///
/// Returns [`None`] for lines holding neither an instruction nor a label.
fn parse_line(raw: &str) -> Option<Instruction> {
    let line = match raw.find(COMMENT_CHAR) {
        Some(start) => &raw[..start],
        None => raw,
    }
    .trim();
    if line.is_empty() {
        return None;
    }

    let (label, rest) = match line.split_once(LABEL_SEPARATOR) {
        Some((label, rest)) => (Some(label.trim().to_owned()), rest.trim()),
        None => (None, line),
    };

    let mut tokens = tokenize(rest);
    let Some(mnemonic) = tokens.next() else {
        // Bare label, or nothing at all.
        return label.map(|label| Instruction {
            opcode: None,
            operands: Vec::new(),
            label: Some(label),
        });
    };

    Some(Instruction {
        opcode: Some(Opcode::from_mnemonic(mnemonic)),
        operands: tokens.map(ToString::to_string).collect(),
        label,
    })
}

/// Splits instruction text on runs of whitespace and commas.
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
}
