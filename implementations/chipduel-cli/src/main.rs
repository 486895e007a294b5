use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context;
use chipasm::Program;
use chipduel::{
    level::Verdict,
    machine::{MachineError, MachineState},
    registers::Register,
    runner::{run_program, RunOptions, MAX_STEPS},
};
use clap::{Parser, Subcommand};
use log::LevelFilter;

mod levels;

use levels::{find_level, LEVELS};

/// HP lost by the player when a program fails or goes over budget.
const ERROR_PENALTY: u32 = 10;
/// HP lost by the player when a program halts with the wrong output.
const WRONG_ANSWER_PENALTY: u32 = 5;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    /// Raise log verbosity, repeat for more. `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Runs a program and prints the final machine state.
    Run {
        program: PathBuf,
        /// Initial value of AX.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        a: i64,
        /// Initial value of BX.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        b: i64,
        /// Maximum cycles the program may use. Unbounded if absent.
        #[arg(long)]
        budget: Option<u64>,
        /// Prints the machine state after every step.
        #[arg(long)]
        trace: bool,
    },
    /// Judges a program against a level.
    Level {
        number: u32,
        program: PathBuf,
        /// Prints the machine state after every step.
        #[arg(long)]
        trace: bool,
    },
    /// Lists the available levels.
    Levels,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .parse_default_env()
        .init();

    match args.command {
        Command::Run {
            program,
            a,
            b,
            budget,
            trace,
        } => {
            let program = read_program(&program)?;
            let machine = MachineState::new()
                .with_register(Register::AX, a)
                .with_register(Register::BX, b);
            let state = execute(&program, machine, budget, trace);
            report(&program, &state);
            Ok(if state.is_halted() && state.error().is_none() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Level {
            number,
            program,
            trace,
        } => {
            let level = find_level(number).with_context(|| {
                format!("there is no level {number}, levels go from 1 to {}", LEVELS.len())
            })?;
            let program = read_program(&program)?;
            println!(
                "Level {}: {} ({}, AX = {}, BX = {}, budget {} cycles)",
                level.level,
                level.title,
                level.skill_name,
                level.inputs.a,
                level.inputs.b,
                level.budget
            );

            let state = execute(&program, level.machine(), Some(level.budget), trace);
            report(&program, &state);
            let verdict = level.judge(&state);
            narrate(&verdict, level.budget);
            Ok(if verdict.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Levels => {
            for level in &LEVELS {
                println!(
                    "{:>2}. {:<15} {:<17} AX = {:<2} BX = {:<2} budget {:>2}",
                    level.level,
                    level.title,
                    level.skill_name,
                    level.inputs.a,
                    level.inputs.b,
                    level.budget
                );
                for line in level.hint.lines() {
                    println!("      {line}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_program(path: &Path) -> anyhow::Result<Program> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("could not read program {}", path.display()))?;
    let program = Program::parse(&source);
    log::info!("{} instructions in {}", program.len(), path.display());
    Ok(program)
}

/// Runs the program to completion, printing every step first if asked to.
fn execute(
    program: &Program,
    machine: MachineState,
    budget: Option<u64>,
    trace: bool,
) -> MachineState {
    if trace {
        let mut program_counter = machine.program_counter();
        for state in machine.clone().execution(program).take(MAX_STEPS) {
            let executed = program
                .get(program_counter)
                .map(ToString::to_string)
                .unwrap_or_default();
            let line = program
                .source_line(program_counter)
                .map_or_else(|| String::from("-"), |line| line.to_string());
            println!("{line:>4} {executed:<20} {state}");
            program_counter = state.program_counter();
            if budget.is_some_and(|budget| state.cycles_used() > budget) {
                break;
            }
        }
    }
    run_program(
        program,
        machine,
        RunOptions {
            cycle_budget: budget,
        },
    )
}

fn report(program: &Program, state: &MachineState) {
    println!("registers: {}", state.registers());
    println!("stack:     {}", state.stack());
    println!("output:    {:?}", state.output());
    println!("cycles:    {}", state.cycles_used());
    match state.error() {
        Some(
            error @ (MachineError::ProgramEndedWithoutHalt | MachineError::CycleBudgetExceeded),
        ) => println!("error:     {error}"),
        Some(error) => match program.source_line(state.program_counter()) {
            Some(line) => println!("error:     {error} (line {line})"),
            None => println!("error:     {error}"),
        },
        None if state.is_halted() => println!("halted"),
        None => println!("stopped after {MAX_STEPS} steps without halting"),
    }
}

/// Tells what the outcome of a level attempt means for the battle.
fn narrate(verdict: &Verdict, budget: u64) {
    match verdict {
        Verdict::Success(skill) => {
            println!("{}! Boss takes {} damage!", skill.name, skill.damage)
        }
        Verdict::WrongAnswer { output } => {
            println!("No skill matched. Output: {output:?} (-{WRONG_ANSWER_PENALTY} HP)")
        }
        Verdict::RuntimeError(error) => println!("Error: {error} (-{ERROR_PENALTY} HP)"),
        Verdict::BudgetExceeded { cycles_used } => println!(
            "Error: budget exceeded, {cycles_used} of {budget} cycles used (-{ERROR_PENALTY} HP)"
        ),
        Verdict::Stalled => println!("Error: program never halted (-{ERROR_PENALTY} HP)"),
    }
}
