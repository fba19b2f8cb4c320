//! Structured report format (spec §6).

use sentinel_monitor::MonitorSnapshot;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counters {
    pub file_reads: u64,
    pub file_writes: u64,
    pub network_requests: u64,
    pub process_spawns: u64,
    pub sensitive_reads: u64,
    pub credentials_detected: u64,
}

/// JSON object with: timestamp, assessment, counters, top-K worst
/// events, configuration digest. No raw secret contents (spec §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredReport {
    pub schema_version: u32,
    pub timestamp: String,
    pub risk: sentinel_monitor::Risk,
    pub contributing_factors: Vec<String>,
    pub counters: Counters,
    pub worst_events: Vec<WorstEventRow>,
    pub configuration_digest: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorstEventRow {
    pub timestamp: u64,
    pub kind: sentinel_common::AccessRequestKind,
    pub target: String,
    pub verdict: sentinel_common::VerdictDecision,
    pub severity: sentinel_common::Severity,
    pub package: Option<String>,
}

impl StructuredReport {
    pub fn from_snapshot(snapshot: &MonitorSnapshot, configuration_digest: &str, timestamp: &str) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            timestamp: timestamp.to_string(),
            risk: snapshot.assessment.risk,
            contributing_factors: snapshot.assessment.contributing_factors.clone(),
            counters: Counters {
                file_reads: snapshot.file_reads,
                file_writes: snapshot.file_writes,
                network_requests: snapshot.network_requests,
                process_spawns: snapshot.process_spawns,
                sensitive_reads: snapshot.sensitive_reads,
                credentials_detected: snapshot.credentials_detected,
            },
            worst_events: snapshot
                .worst_events
                .iter()
                .map(|e| WorstEventRow {
                    timestamp: e.timestamp,
                    kind: e.kind,
                    target: e.target.clone(),
                    verdict: e.decision,
                    severity: e.severity,
                    package: e.package.clone(),
                })
                .collect(),
            configuration_digest: configuration_digest.to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_monitor::{BehavioralMonitor, Risk};
    use sentinel_policy::config::BehavioralConfig;

    #[test]
    fn report_counters_match_monitor_snapshot() {
        let monitor = BehavioralMonitor::new(BehavioralConfig::default());
        let snapshot = monitor.snapshot();
        let report = StructuredReport::from_snapshot(&snapshot, "deadbeef", "2026-01-01T00:00:00Z");
        assert_eq!(report.counters.file_reads, 0);
        assert_eq!(report.risk, Risk::Clean);
        assert_eq!(report.configuration_digest, "deadbeef");
    }

    #[test]
    fn serializes_to_valid_json_without_raw_payload_fields() {
        let monitor = BehavioralMonitor::new(BehavioralConfig::default());
        let report = StructuredReport::from_snapshot(&monitor.snapshot(), "digest", "ts");
        let json = report.to_json().unwrap();
        assert!(!json.contains("payload"));
        assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok());
    }
}
