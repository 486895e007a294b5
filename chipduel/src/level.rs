//! # Levels
//! A level is plain configuration: which skill a program must perform, the
//! inputs it gets, and how many cycles it may use. Which levels exist and in
//! what order they are played is up to the embedding application.
//!
//! [`Level::attempt`] runs a program against a level and sorts the outcome
//! into a [`Verdict`], the one decision an embedder needs to reward or penalize
//! the player.

use alloc::vec::Vec;

use crate::{
    machine::{MachineError, MachineState},
    registers::Register,
    runner::{run, RunOptions},
    skills::{find_skill, match_skill, Inputs, Skill},
    Word,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Level<'a> {
    pub level: u32,
    pub title: &'a str,
    /// Name of the [`Skill`] a solution must perform.
    pub skill_name: &'a str,
    pub inputs: Inputs,
    /// Maximum cycles a solution may use.
    pub budget: u64,
    /// Starter text shown to the player, usually comments only.
    pub hint: &'a str,
}

/// Outcome of running a program against a [`Level`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The program halted with the expected output.
    Success(&'static Skill),
    /// The program halted, but its output is not what the skill expects.
    WrongAnswer { output: Vec<Word> },
    /// The program failed before halting.
    RuntimeError(MachineError),
    /// The program used more cycles than the level allows.
    BudgetExceeded { cycles_used: u64 },
    /// The program neither halted nor failed within the runner's step limit.
    Stalled,
}
impl Verdict {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl Level<'_> {
    /// Returns a fresh machine with the level inputs loaded into `AX` and `BX`.
    pub fn machine(&self) -> MachineState {
        MachineState::new()
            .with_register(Register::AX, self.inputs.a)
            .with_register(Register::BX, self.inputs.b)
    }

    /// The skill this level asks for, if the catalog knows it.
    pub fn skill(&self) -> Option<&'static Skill> {
        find_skill(self.skill_name)
    }

    /// Runs `source` with this level's inputs and budget and judges the result.
    /// # Example
    /// ```rust
    /// # use chipduel::{level::{Level, Verdict}, skills::Inputs};
    /// let level = Level {
    ///     level: 1,
    ///     title: "Addition",
    ///     skill_name: "Add Beam",
    ///     inputs: Inputs::new(3, 4),
    ///     budget: 5,
    ///     hint: "",
    /// };
    /// assert!(level.attempt("ADD AX, BX\nHLT AX").is_success());
    /// assert_eq!(
    ///     level.attempt("HLT AX"),
    ///     Verdict::WrongAnswer { output: vec![3] }
    /// );
    /// ```
    pub fn attempt(&self, source: &str) -> Verdict {
        let state = run(
            source,
            self.machine(),
            RunOptions::with_cycle_budget(self.budget),
        );
        self.judge(&state)
    }

    /// Judges a terminal state produced by some driver of this level's
    /// program.
    pub fn judge(&self, state: &MachineState) -> Verdict {
        match state.error() {
            Some(MachineError::CycleBudgetExceeded) => {
                return Verdict::BudgetExceeded {
                    cycles_used: state.cycles_used(),
                }
            }
            Some(error) => return Verdict::RuntimeError(error.clone()),
            None => {}
        }
        // Drivers stepping the machine themselves may not enforce the budget.
        if state.cycles_used() > self.budget {
            return Verdict::BudgetExceeded {
                cycles_used: state.cycles_used(),
            };
        }
        if !state.is_halted() {
            return Verdict::Stalled;
        }

        match match_skill(state.output(), self.inputs, self.skill_name) {
            Some(skill) => Verdict::Success(skill),
            None => Verdict::WrongAnswer {
                output: state.output().to_vec(),
            },
        }
    }
}
