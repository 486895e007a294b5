//! # Operands
//! Operands are kept as text by the parser and resolved here, when the
//! instruction using them executes.
//!
//! A token naming a register reads that register, anything else must be a
//! base-10 integer literal. A token that is neither is rejected with
//! [`MachineError::InvalidOperand`] rather than being turned into a sentinel.
//!
//! Literal parsing is strict: `3.7` and `5x` are invalid, they are not
//! truncated to their leading digits. A leading `+` or `-` sign is accepted.

use either::Either;

use crate::{
    machine::MachineError,
    registers::{Register, Registers},
    Word,
};

/// A resolved operand: either a register or an immediate value.
pub type Operand = Either<Register, Word>;

/// Classifies an operand token.
/// # Example
/// ```rust
/// # use chipduel::{operand::parse_operand, registers::Register};
/// # use either::Either;
/// assert_eq!(parse_operand("BX"), Some(Either::Left(Register::BX)));
/// assert_eq!(parse_operand("-12"), Some(Either::Right(-12)));
/// assert_eq!(parse_operand("bx"), None);
/// ```
pub fn parse_operand(token: &str) -> Option<Operand> {
    if let Some(register) = Register::from_name(token) {
        return Some(Either::Left(register));
    }
    token.parse::<Word>().ok().map(Either::Right)
}

/// Reads the value of an operand against the current registers.
pub fn read(token: &str, registers: &Registers) -> Result<Word, MachineError> {
    match parse_operand(token) {
        Some(Either::Left(register)) => Ok(registers[register]),
        Some(Either::Right(value)) => Ok(value),
        None => Err(MachineError::InvalidOperand(token.into())),
    }
}

/// Resolves an operand that is written to. Only registers qualify.
pub fn destination(token: &str) -> Result<Register, MachineError> {
    Register::from_name(token).ok_or_else(|| MachineError::NotARegister(token.into()))
}
