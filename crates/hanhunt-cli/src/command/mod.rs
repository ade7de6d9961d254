use clap::{Parser, Subcommand};

use self::{generate::GenerateArg, solve::SolveArg, trace::TraceArg};

mod generate;
mod solve;
mod trace;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Generate a playable board from the radical database
    Generate(#[clap(flatten)] GenerateArg),
    /// List every character solvable on a fixed board
    Solve(#[clap(flatten)] SolveArg),
    /// Replay scripted tile selections on a fixed board and score them
    Trace(#[clap(flatten)] TraceArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Generate(GenerateArg::default())) {
        Mode::Generate(arg) => generate::run(&arg)?,
        Mode::Solve(arg) => solve::run(&arg)?,
        Mode::Trace(arg) => trace::run(&arg)?,
    }
    Ok(())
}
