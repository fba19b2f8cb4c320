#![allow(unsafe_code)]
//! `sentinel`: loads a Configuration Snapshot from the three well-known
//! paths of spec §6, offers `check`/`doctor`/`run`, and installs the
//! `SIGINT`/`SIGTERM` handlers of the process exit contract.

mod cli;
mod commands;
mod config_discovery;
mod signals;

use clap::Parser;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(error) = signals::install() {
        tracing::warn!(%error, "failed to install SIGINT/SIGTERM handlers; process exit contract degrades to default disposition");
    }

    let cli = cli::Cli::parse();
    let code = match commands::dispatch(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("sentinel: {error:#}");
            2
        }
    };
    std::process::exit(code);
}
