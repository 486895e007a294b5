//! # Batch execution
//! Drives a program to completion without anyone watching the individual
//! steps, which is what tests and judges want.
//!
//! Two limits apply. The caller may set a cycle budget; it is checked after
//! every step, so the instruction that went over still shows its effects in
//! the returned state. On top of that, a run never takes more than
//! [`MAX_STEPS`] steps, which stops programs looping without spending cycles
//! (an endless chain of bare labels and jumps to them, for instance).

use chipasm::Program;

use crate::machine::{MachineError, MachineState};

/// Hard limit on the number of steps a single run may take.
pub const MAX_STEPS: usize = 10_000;

/// Parameters of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RunOptions {
    /// Maximum cycles the run may use, unbounded if [`None`].
    pub cycle_budget: Option<u64>,
}
impl RunOptions {
    pub fn unbounded() -> Self {
        Self::default()
    }
    pub fn with_cycle_budget(budget: u64) -> Self {
        Self {
            cycle_budget: Some(budget),
        }
    }
}

/// Parses `source` once and runs it from `initial` until it halts, fails,
/// goes over budget or reaches [`MAX_STEPS`].
/// # Example
/// ```rust
/// # use chipduel::{machine::MachineState, runner::{run, RunOptions}};
/// let state = run("MOV AX, 3\nADD AX, 4\nHLT AX", MachineState::new(), RunOptions::default());
/// assert_eq!(state.output(), [7]);
/// ```
pub fn run(source: &str, initial: MachineState, options: RunOptions) -> MachineState {
    run_program(&Program::parse(source), initial, options)
}

/// Same as [`run`], for an already parsed program.
///
/// If the step limit is reached first, the state is returned as it stands:
/// neither halted nor failed.
pub fn run_program(program: &Program, initial: MachineState, options: RunOptions) -> MachineState {
    let mut execution = initial.execution(program);
    for _ in 0..MAX_STEPS {
        let Some(mut state) = execution.next() else {
            break;
        };
        if let Some(budget) = options.cycle_budget {
            if state.cycles_used() > budget {
                state.fail(MachineError::CycleBudgetExceeded);
                return state;
            }
        }
    }

    let state = execution.into_state();
    if !state.is_terminal() {
        log::warn!(
            "run stopped after {MAX_STEPS} steps at pc {} without halting",
            state.program_counter()
        );
    }
    state
}
