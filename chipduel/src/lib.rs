//! # ChipDuel: a tiny register machine
//! A small assembly machine with five registers, a stack and a cycle counter,
//! designed to not rely on `std`.
//!
//! Programs are parsed by [chipasm](chipasm), then executed one instruction at a
//! time by [`MachineState::step`](machine::MachineState::step). Each step is a pure
//! state-in/state-out transformation, so any kind of driver (an animation loop,
//! a test, a batch [runner]) can execute programs at its own pace.
//!
//! Once a program halts, its output can be checked against a named [skill](skills),
//! and a [level] bundles a skill with the inputs and cycle budget a program gets.

#![no_std]

extern crate alloc;

pub mod level;
pub mod machine;
pub mod operand;
pub mod registers;
pub mod runner;
pub mod skills;
pub mod stack;

pub use chipasm::{parse_program, Instruction, Opcode, Program};

/// Integer type held by registers, the stack and the output.
pub type Word = i64;
