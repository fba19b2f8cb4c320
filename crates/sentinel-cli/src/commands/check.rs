//! `sentinel check`: evaluate one `AccessRequest` against a configuration
//! and print the resulting `Verdict`. The harness a test author or a
//! host integrator uses to validate policy before wiring a real runtime
//! (SPEC_FULL §0).

use crate::cli::CheckArgs;
use crate::config_discovery;
use sentinel_common::{AccessRequest, AccessRequestKind, VerdictDecision};
use sentinel_policy::{CompiledPolicy, TrustResolver};

fn parse_kind(raw: &str) -> anyhow::Result<AccessRequestKind> {
    Ok(match raw.to_ascii_lowercase().as_str() {
        "fs_read" => AccessRequestKind::FsRead,
        "fs_write" => AccessRequestKind::FsWrite,
        "fs_create" => AccessRequestKind::FsCreate,
        "fs_delete" => AccessRequestKind::FsDelete,
        "net_connect" => AccessRequestKind::NetConnect,
        "net_send" => AccessRequestKind::NetSend,
        "net_resolve" => AccessRequestKind::NetResolve,
        "cmd_exec" => AccessRequestKind::CmdExec,
        "cmd_spawn" => AccessRequestKind::CmdSpawn,
        "env_get" => AccessRequestKind::EnvGet,
        "env_enum" => AccessRequestKind::EnvEnum,
        "module_load" => AccessRequestKind::ModuleLoad,
        other => anyhow::bail!("unknown --kind '{other}'"),
    })
}

/// Exit code follows the coarse CI convention: `0` when the request
/// would proceed (`ALLOW`/`WARN`), `1` when it would be refused
/// (`DENY`). Not part of spec §6 (which has no opinion on this
/// subcommand's exit code); recorded as an Open Question decision.
pub fn run(args: CheckArgs) -> anyhow::Result<i32> {
    let kind = parse_kind(&args.kind)?;
    let discovered = config_discovery::discover(args.config)?;
    let policy = CompiledPolicy::compile(discovered.config)?;

    let mut request = AccessRequest::new(kind, args.target, 0);
    if let Some(caller) = &args.caller {
        request = request.with_caller(caller.as_str());
    }
    if let Some(payload) = &args.payload {
        request = request.with_payload(payload.clone().into_bytes());
    }
    request = request.with_existing_executable(args.existing_executable);

    let trust = TrustResolver::from_config(&policy.config).resolve(request.caller_module.as_ref());
    let verdict = sentinel_core::decide(&request, &policy, &trust);

    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(if verdict.decision == VerdictDecision::Deny { 1 } else { 0 })
}
