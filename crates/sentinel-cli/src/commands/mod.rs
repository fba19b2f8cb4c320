//! Subcommand dispatch, grounded on `assay-cli`'s
//! `cli/commands/dispatch.rs` (`Command` variant -> `super::<name>::run`).

pub mod check;
pub mod doctor;
pub mod run;

use crate::cli::{Cli, Command};

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Command::Check(args) => check::run(args),
        Command::Doctor(args) => doctor::run(args),
        Command::Run(args) => run::run(args),
    }
}
