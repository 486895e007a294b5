//! # Register machine
//! Represents the full state of the chipduel register machine, and the stepper
//! executing one [`Instruction`](chipasm::Instruction) at a time against it.
//!
//! Stepping is a pure transformation: [`MachineState::step`] takes the current
//! state and returns the next one, leaving the original untouched. The
//! [`Execution`] iterator wraps this to hand out every intermediate state,
//! which is what a driving loop animating the machine wants.
//! ```rust
//! # use chipduel::machine::*;
//! # use chipasm::parse_program;
//! let program = parse_program("MOV AX, 2\nMUL AX, AX\nHLT AX");
//! for state in MachineState::new().execution(&program) {
//!     println!("{state}");
//! }
//! ```
//!
//! Failures are values too. Once [`MachineState::error`] is set the state is
//! frozen and further steps return it unchanged.

use alloc::{string::String, vec::Vec};
use core::{
    fmt::{self, Display},
    iter::FusedIterator,
};

use chipasm::{Opcode, Program};
use thiserror::Error;

use crate::{
    operand::{destination, read},
    registers::{Register, Registers},
    stack::MachineStack,
    Word,
};

/// Number of cells in [`MachineState::memory`].
pub const MEMORY_CELLS: usize = 16;

/// Ways a program can fail. Every variant is terminal for the run it occurs in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum MachineError {
    #[error("Unknown instruction: {0}")]
    UnknownInstruction(String),
    /// A jump targeted a label no instruction carries.
    #[error("Label not found: {0}")]
    LabelNotFound(String),
    #[error("Stack underflow")]
    StackUnderflow,
    /// The program counter ran past the last instruction.
    #[error("Program ended without HLT")]
    ProgramEndedWithoutHalt,
    /// Raised by the runner, never by a single step.
    #[error("Cycle budget exceeded")]
    CycleBudgetExceeded,
    /// An operand that is neither a register nor a base-10 integer.
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),
    /// `position` is 1-based.
    #[error("Missing operand {position} for {opcode}")]
    MissingOperand { opcode: Opcode, position: usize },
    /// Only registers can be written to.
    #[error("Not a register: {0}")]
    NotARegister(String),
}

/// Cycles charged for executing an opcode, or [`None`] if the machine does
/// not know it.
/// # Example
/// ```rust
/// # use chipduel::machine::cycle_cost;
/// # use chipasm::Opcode;
/// assert_eq!(cycle_cost(&Opcode::Mul), Some(3));
/// assert_eq!(cycle_cost(&Opcode::Hlt), Some(0));
/// assert_eq!(cycle_cost(&Opcode::Unknown("NOP".into())), None);
/// ```
pub fn cycle_cost(opcode: &Opcode) -> Option<u64> {
    match opcode {
        Opcode::Mov
        | Opcode::Add
        | Opcode::Sub
        | Opcode::Cmp
        | Opcode::Jmp
        | Opcode::Je
        | Opcode::Jne
        | Opcode::Push => Some(1),
        Opcode::Mul => Some(3),
        Opcode::Pop => Some(2),
        Opcode::Hlt => Some(0),
        Opcode::Unknown(_) => None,
    }
}

/// Condition flags, written by `CMP` and read by conditional jumps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Flags {
    pub zero: bool,
}

/// Complete state of the machine.
///
/// The program counter, cycle counter and output only ever change through
/// [`MachineState::step`]; a fresh state is the only way to reset them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MachineState {
    registers: Registers,
    // No instruction touches memory yet.
    memory: [Word; MEMORY_CELLS],
    stack: MachineStack,
    program_counter: usize,
    flags: Flags,
    halted: bool,
    error: Option<MachineError>,
    output: Vec<Word>,
    cycles_used: u64,
}
impl Default for MachineState {
    fn default() -> Self {
        Self::new()
    }
}
impl MachineState {
    /// Returns a machine with zeroed registers (except `SP`), memory and flags,
    /// an empty stack and output, and the program counter on the first
    /// instruction.
    /// # Example
    /// ```rust
    /// # use chipduel::{machine::MachineState, registers::Register};
    /// let machine = MachineState::new();
    /// assert_eq!(machine.register(Register::SP), 16);
    /// assert!(machine.stack().is_empty());
    /// assert!(!machine.is_halted() && machine.error().is_none());
    /// ```
    pub fn new() -> Self {
        Self {
            registers: Registers::new(),
            memory: [0; MEMORY_CELLS],
            stack: MachineStack::new(),
            program_counter: 0,
            flags: Flags::default(),
            halted: false,
            error: None,
            output: Vec::new(),
            cycles_used: 0,
        }
    }

    /// Sets the value of a register, typically to inject inputs before a run.
    pub fn with_register(mut self, register: Register, value: Word) -> Self {
        self.registers[register] = value;
        self
    }

    /// Replaces the stack contents, listed bottom to top.
    pub fn with_stack(mut self, values: &[Word]) -> Self {
        self.stack = MachineStack::from(values.to_vec());
        self
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }
    pub fn register(&self, register: Register) -> Word {
        self.registers[register]
    }
    pub fn memory(&self) -> &[Word; MEMORY_CELLS] {
        &self.memory
    }
    pub fn stack(&self) -> &MachineStack {
        &self.stack
    }
    pub fn program_counter(&self) -> usize {
        self.program_counter
    }
    pub fn flags(&self) -> Flags {
        self.flags
    }
    pub fn is_halted(&self) -> bool {
        self.halted
    }
    pub fn error(&self) -> Option<&MachineError> {
        self.error.as_ref()
    }
    /// Values emitted by `HLT`, in order.
    pub fn output(&self) -> &[Word] {
        &self.output
    }
    pub fn cycles_used(&self) -> u64 {
        self.cycles_used
    }

    /// Returns true once the machine halted or failed. Stepping a terminal
    /// machine does nothing.
    pub fn is_terminal(&self) -> bool {
        self.halted || self.error.is_some()
    }

    /// Marks this state as failed. Does nothing if it already failed.
    pub(crate) fn fail(&mut self, error: MachineError) {
        if self.error.is_none() {
            log::debug!("machine failed at pc {}: {error}", self.program_counter);
            self.error = Some(error);
        }
    }

    /// Executes the instruction under the program counter, returning the
    /// resulting state.
    ///
    /// Terminal states are returned as-is. If the instruction fails, the
    /// returned state is this one with only [`MachineState::error`] set.
    pub fn step(&self, program: &Program) -> MachineState {
        if self.is_terminal() {
            return self.clone();
        }

        let mut next = self.clone();
        if let Err(error) = next.execute(program) {
            let mut failed = self.clone();
            failed.fail(error);
            return failed;
        }
        next
    }

    /// Returns an [`Execution`] stepping through `program` from this state.
    pub fn execution(self, program: &Program) -> Execution<'_> {
        Execution {
            program,
            state: self,
        }
    }

    /// Applies a single instruction in place.
    ///
    /// On error, `self` may be partially modified and must be discarded.
    fn execute(&mut self, program: &Program) -> Result<(), MachineError> {
        let Some(instruction) = program.get(self.program_counter) else {
            return Err(MachineError::ProgramEndedWithoutHalt);
        };
        let Some(opcode) = &instruction.opcode else {
            // Bare labels are free.
            self.program_counter += 1;
            return Ok(());
        };
        let Some(cost) = cycle_cost(opcode) else {
            return Err(MachineError::UnknownInstruction(opcode.mnemonic().into()));
        };

        log::trace!(
            "{:>4}: {instruction} | {} | cycles {}",
            self.program_counter,
            self.registers,
            self.cycles_used
        );

        let operand = |position: usize| {
            instruction
                .operand(position)
                .ok_or_else(|| MachineError::MissingOperand {
                    opcode: opcode.clone(),
                    position: position + 1,
                })
        };

        let mut next_program_counter = self.program_counter + 1;
        match opcode {
            Opcode::Mov => {
                let target = destination(operand(0)?)?;
                self.registers[target] = read(operand(1)?, &self.registers)?;
            }
            Opcode::Add => {
                let target = destination(operand(0)?)?;
                let value = read(operand(1)?, &self.registers)?;
                self.registers[target] = self.registers[target].wrapping_add(value);
            }
            Opcode::Sub => {
                let target = destination(operand(0)?)?;
                let value = read(operand(1)?, &self.registers)?;
                self.registers[target] = self.registers[target].wrapping_sub(value);
            }
            Opcode::Mul => {
                let target = destination(operand(0)?)?;
                let value = read(operand(1)?, &self.registers)?;
                self.registers[target] = self.registers[target].wrapping_mul(value);
            }
            Opcode::Cmp => {
                let lhs = read(operand(0)?, &self.registers)?;
                let rhs = read(operand(1)?, &self.registers)?;
                self.flags.zero = lhs == rhs;
            }
            Opcode::Jmp => {
                next_program_counter = jump_target(program, operand(0)?)?;
            }
            Opcode::Je => {
                if self.flags.zero {
                    next_program_counter = jump_target(program, operand(0)?)?;
                }
            }
            Opcode::Jne => {
                if !self.flags.zero {
                    next_program_counter = jump_target(program, operand(0)?)?;
                }
            }
            Opcode::Push => {
                let value = read(operand(0)?, &self.registers)?;
                self.stack.push(value);
            }
            Opcode::Pop => {
                let value = self.stack.pop().ok_or(MachineError::StackUnderflow)?;
                let target = destination(operand(0)?)?;
                self.registers[target] = value;
            }
            Opcode::Hlt => {
                let value = read(operand(0)?, &self.registers)?;
                self.output.push(value);
                self.halted = true;
            }
            // No cycle cost, already rejected above.
            Opcode::Unknown(_) => unreachable!(),
        }

        self.program_counter = next_program_counter;
        self.cycles_used += cost;
        Ok(())
    }
}
impl Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pc {:>3} | {} | stack {} | zero {} | cycles {}",
            self.program_counter,
            self.registers,
            self.stack,
            self.flags.zero as u8,
            self.cycles_used
        )?;
        if let Some(error) = &self.error {
            write!(f, " | error: {error}")?;
        } else if self.halted {
            f.write_str(" | halted")?;
        }
        Ok(())
    }
}

/// Index of the first instruction labelled `label`.
fn jump_target(program: &Program, label: &str) -> Result<usize, MachineError> {
    program
        .label_index(label)
        .ok_or_else(|| MachineError::LabelNotFound(label.into()))
}

/// A program being executed, implemented as an iterator yielding the state
/// after each step until the machine halts or fails.
///
/// Using an iterator for this allows users of the API to execute instructions step
/// by step if they so wish, and to stop whenever they want.
pub struct Execution<'a> {
    program: &'a Program,
    state: MachineState,
}
impl Execution<'_> {
    /// The most recent state.
    pub fn state(&self) -> &MachineState {
        &self.state
    }
    pub fn into_state(self) -> MachineState {
        self.state
    }
}
impl Iterator for Execution<'_> {
    type Item = MachineState;

    /// Steps through the next instruction. Returns the new state until the
    /// machine is terminal, the terminal state itself being the last item.
    fn next(&mut self) -> Option<Self::Item> {
        if self.state.is_terminal() {
            return None;
        }
        self.state = self.state.step(self.program);
        Some(self.state.clone())
    }
}
impl FusedIterator for Execution<'_> {}

/// Returns a fresh machine. Same as [`MachineState::new`].
pub fn create_machine() -> MachineState {
    MachineState::new()
}
