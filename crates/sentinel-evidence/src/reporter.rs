//! Shutdown Reporter (spec §4.8): at process exit, obtain `assess()`
//! and `snapshot()`, print a severity-gated human-readable summary to
//! stderr, and write the structured report. Never throws; all I/O
//! errors are swallowed. Exit code is steered: high risk forces `1`,
//! everything else leaves the host's exit code unchanged.

use crate::report::StructuredReport;
use sentinel_monitor::{MonitorSnapshot, Risk};
use std::io::Write;

/// `high -> 1`, otherwise unchanged (spec §6 "process exit contract").
pub fn steer_exit_code(risk: Risk) -> Option<i32> {
    matches!(risk, Risk::High).then_some(1)
}

fn risk_icon(risk: Risk) -> &'static str {
    match risk {
        Risk::High => "\u{1f6a8}",
        Risk::Medium => "\u{26a0}\u{fe0f}",
        Risk::Low => "\u{2139}\u{fe0f}",
        Risk::Clean => "\u{2705}",
    }
}

/// Print the stderr summary, but only for risk >= medium (spec §6).
pub fn print_stderr_summary(snapshot: &MonitorSnapshot) {
    if snapshot.assessment.risk < Risk::Medium {
        return;
    }
    eprintln!();
    eprintln!(
        "{} firewall risk assessment: {:?}",
        risk_icon(snapshot.assessment.risk),
        snapshot.assessment.risk
    );
    for factor in &snapshot.assessment.contributing_factors {
        eprintln!("    - {factor}");
    }
    eprintln!(
        "    reads={} writes={} network={} spawns={} sensitive_reads={} credentials_detected={}",
        snapshot.file_reads,
        snapshot.file_writes,
        snapshot.network_requests,
        snapshot.process_spawns,
        snapshot.sensitive_reads,
        snapshot.credentials_detected,
    );
    eprintln!(
        "\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}"
    );
}

/// Write the structured report to `writer`. Never returns an error: a
/// serialization or I/O failure is logged via `tracing` and swallowed,
/// matching spec §4.8 and the "reporting failure" category of §7.
pub fn write_structured_report<W: Write>(report: &StructuredReport, writer: &mut W) {
    let json = match report.to_json() {
        Ok(json) => json,
        Err(error) => {
            tracing::warn!(%error, "failed to serialize structured report");
            return;
        }
    };
    if let Err(error) = writer.write_all(json.as_bytes()) {
        tracing::warn!(%error, "failed to write structured report");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_monitor::{BehavioralMonitor, Risk};
    use sentinel_policy::config::BehavioralConfig;

    #[test]
    fn high_risk_forces_exit_code_one() {
        assert_eq!(steer_exit_code(Risk::High), Some(1));
    }

    #[test]
    fn medium_and_below_leave_exit_code_unchanged() {
        assert_eq!(steer_exit_code(Risk::Medium), None);
        assert_eq!(steer_exit_code(Risk::Low), None);
        assert_eq!(steer_exit_code(Risk::Clean), None);
    }

    #[test]
    fn structured_report_write_never_panics_on_broken_writer() {
        struct AlwaysFails;
        impl Write for AlwaysFails {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let monitor = BehavioralMonitor::new(BehavioralConfig::default());
        let report = StructuredReport::from_snapshot(&monitor.snapshot(), "digest", "ts");
        write_structured_report(&report, &mut AlwaysFails);
    }

    #[test]
    fn writes_valid_json_to_a_buffer() {
        let monitor = BehavioralMonitor::new(BehavioralConfig::default());
        let report = StructuredReport::from_snapshot(&monitor.snapshot(), "digest", "ts");
        let mut buf = Vec::new();
        write_structured_report(&report, &mut buf);
        assert!(serde_json::from_slice::<serde_json::Value>(&buf).is_ok());
    }
}
