//! `sentinel run`: replay a batch of `AccessRequest`s from a JSONL
//! scenario file through a `FirewallContext`, then print the Shutdown
//! Report (spec §4.8). The signal handlers installed in `main` make
//! this loop the one place that actually observes `pending()` between
//! iterations, since `check`/`doctor` are single-shot.
//!
//! Each scenario line deserializes as `AccessRequest`
//! (`{"kind":"FS_READ","target":"...","timestamp":0}`, `timestamp` as a
//! placeholder): `timestamp` is overwritten with the context's own
//! monotonic clock before the request is evaluated, so the ordering
//! guarantee of spec §5 holds regardless of what the file says.

use crate::cli::RunArgs;
use crate::{config_discovery, signals};
use sentinel_adapter_api::{evaluate, FirewallContext, InitPolicy};
use sentinel_common::AccessRequest;
use sentinel_evidence::{print_stderr_summary, steer_exit_code, write_structured_report, StructuredReport};
use sentinel_policy::CompiledPolicy;
use std::io::BufRead;

pub fn run(args: RunArgs) -> anyhow::Result<i32> {
    let discovered = config_discovery::discover(args.config)?;
    let report_file = args.report_file.or_else(|| discovered.config.reporting.report_file.clone().map(Into::into));
    let policy = CompiledPolicy::compile(discovered.config)?;
    let digest = policy.digest.clone();

    let context = FirewallContext::ready(policy, InitPolicy::FailClosed);

    let file = std::fs::File::open(&args.scenario)
        .map_err(|e| anyhow::anyhow!("failed to open {}: {e}", args.scenario.display()))?;
    let reader = std::io::BufReader::new(file);

    let mut interrupted = None;
    for (line_no, line) in reader.lines().enumerate() {
        if let Some(signal) = signals::pending() {
            interrupted = Some(signal);
            break;
        }
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut request: AccessRequest = serde_json::from_str(&line)
            .map_err(|e| anyhow::anyhow!("{}:{}: {e}", args.scenario.display(), line_no + 1))?;
        request.timestamp = context.now();
        evaluate(&context, request);
    }

    let snapshot = context.monitor().snapshot();
    print_stderr_summary(&snapshot);
    let report = StructuredReport::from_snapshot(&snapshot, &digest, &chrono::Utc::now().to_rfc3339());

    if let Some(path) = &report_file {
        match std::fs::File::create(path) {
            Ok(mut file) => write_structured_report(&report, &mut file),
            Err(error) => tracing::warn!(%error, path = %path.display(), "failed to open report file"),
        }
    } else {
        println!("{}", report.to_json().unwrap_or_default());
    }

    if let Some(signal) = interrupted {
        std::process::exit(signals::default_exit_code(signal));
    }

    Ok(steer_exit_code(snapshot.assessment.risk).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn replays_scenario_and_reports_counters() {
        let mut scenario = tempfile::NamedTempFile::new().unwrap();
        writeln!(scenario, r#"{{"kind":"FS_READ","target":"/etc/hosts","timestamp":0}}"#).unwrap();
        writeln!(scenario, r#"{{"kind":"FS_READ","target":"/home/u/.ssh/id_rsa","timestamp":0}}"#).unwrap();
        let report_out = tempfile::NamedTempFile::new().unwrap();

        let args = RunArgs {
            config: None,
            scenario: scenario.path().to_path_buf(),
            report_file: Some(report_out.path().to_path_buf()),
        };
        let code = run(args).unwrap();
        assert_eq!(code, 0);

        let written = std::fs::read_to_string(report_out.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["counters"]["fileReads"], 2);
    }
}
