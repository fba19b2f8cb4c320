//! Argument surface, grounded on `assay-cli`'s `clap`-derive
//! `Cli`/`Command` split (`cli/args/mod.rs`), narrowed to the three
//! subcommands SPEC_FULL §0 names for this binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sentinel",
    version,
    about = "Host-process security firewall for untrusted third-party modules"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate a single access request against a configuration and print the Verdict.
    Check(CheckArgs),
    /// Validate a configuration file and print diagnostics.
    Doctor(DoctorArgs),
    /// Replay a batch of access requests from a JSONL scenario file and print the Shutdown Report.
    Run(RunArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Path to a configuration file. When omitted, the three well-known paths are tried.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// One of: fs_read, fs_write, fs_create, fs_delete, net_connect, net_send,
    /// net_resolve, cmd_exec, cmd_spawn, env_get, env_enum, module_load.
    #[arg(long)]
    pub kind: String,
    /// The normalized target: a path, a "host:port", a joined command, or a variable name.
    #[arg(long)]
    pub target: String,
    /// The caller module identifier, if any.
    #[arg(long)]
    pub caller: Option<String>,
    /// Payload bytes to scan for credential patterns (UTF-8 on the command line).
    #[arg(long)]
    pub payload: Option<String>,
    /// Whether the fs_write/fs_create target already exists and is executable.
    #[arg(long)]
    pub existing_executable: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DoctorArgs {
    /// Path to a configuration file. When omitted, the three well-known paths are tried.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Path to a configuration file. When omitted, the three well-known paths are tried.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// JSONL file, one `AccessRequest` per line.
    #[arg(long)]
    pub scenario: PathBuf,
    /// Optional path to write the structured report to. Defaults to `reporting.reportFile`
    /// from the configuration, if set.
    #[arg(long)]
    pub report_file: Option<PathBuf>,
}
