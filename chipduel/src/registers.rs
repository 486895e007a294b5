//! # Registers
//! The machine has five named integer registers: `AX`, `BX`, `CX`, `DX` and `SP`.
//!
//! Register names are matched case-sensitively against their upper-case spelling,
//! so `ax` in a program is not a register (and will not resolve as a literal
//! either).

use core::{
    fmt::{self, Display},
    ops::{Index, IndexMut},
};

use crate::Word;

/// Initial value of `SP`, the capacity reported to programs.
pub const STACK_CAPACITY: Word = 16;

/// One of the named registers of the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Register {
    AX,
    BX,
    CX,
    DX,
    SP,
}
impl Register {
    /// Every register, in display order.
    pub const ALL: [Register; 5] = [Self::AX, Self::BX, Self::CX, Self::DX, Self::SP];

    /// Looks a register up by its exact name.
    /// # Example
    /// ```rust
    /// # use chipduel::registers::Register;
    /// assert_eq!(Register::from_name("CX"), Some(Register::CX));
    /// assert_eq!(Register::from_name("cx"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "AX" => Some(Self::AX),
            "BX" => Some(Self::BX),
            "CX" => Some(Self::CX),
            "DX" => Some(Self::DX),
            "SP" => Some(Self::SP),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::AX => "AX",
            Self::BX => "BX",
            Self::CX => "CX",
            Self::DX => "DX",
            Self::SP => "SP",
        }
    }
}
impl Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The register file, indexed by [`Register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Registers {
    values: [Word; 5],
}
impl Default for Registers {
    /// Returns zeroed registers, except `SP` which holds [`STACK_CAPACITY`].
    fn default() -> Self {
        Self::new()
    }
}
impl Registers {
    /// Returns zeroed registers, except `SP` which holds [`STACK_CAPACITY`].
    /// # Example
    /// ```rust
    /// # use chipduel::registers::{Register, Registers};
    /// let registers = Registers::new();
    /// assert_eq!(registers[Register::AX], 0);
    /// assert_eq!(registers[Register::SP], 16);
    /// ```
    pub const fn new() -> Self {
        Self {
            values: [0, 0, 0, 0, STACK_CAPACITY],
        }
    }

    /// Returns an iterator over each register and its value.
    pub fn iter(&self) -> impl Iterator<Item = (Register, Word)> + '_ {
        Register::ALL.into_iter().map(|r| (r, self[r]))
    }
}
impl Index<Register> for Registers {
    type Output = Word;
    fn index(&self, register: Register) -> &Self::Output {
        &self.values[register as usize]
    }
}
impl IndexMut<Register> for Registers {
    fn index_mut(&mut self, register: Register) -> &mut Self::Output {
        &mut self.values[register as usize]
    }
}
impl Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (register, value)) in self.iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{register}={value}")?;
        }
        Ok(())
    }
}
