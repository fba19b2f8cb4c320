//! Behavioral Monitor (spec §4.6): rolling counters and per-operation
//! ledgers, terminal risk assessment, rate-based threshold flags.
//!
//! State lives behind a single `Mutex` rather than `tokio::sync`
//! primitives: spec §5 describes a single-threaded cooperative host per
//! interception context, with the monitor "exclusive to a single
//! context"; the mutex exists to make the Rust type system honest about
//! shared ownership (a context's monitor is handed to every adapter),
//! not to model real cross-thread contention.

mod ledger;
mod risk;

pub use ledger::{
    BoundedRing, NetworkRequestRecord, SpawnRecord, SuspiciousEvent, WorstEvent,
};
pub use risk::{Risk, RiskAssessment};

use ledger::LedgerState;
use sentinel_common::{AccessRequest, AccessRequestKind, Severity, Verdict, VerdictDecision};
use sentinel_policy::config::BehavioralConfig;
use std::sync::Mutex;

/// Immutable snapshot of everything the Shutdown Reporter needs.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MonitorSnapshot {
    pub file_reads: u64,
    pub file_writes: u64,
    pub network_requests: u64,
    pub process_spawns: u64,
    pub sensitive_reads: u64,
    pub credentials_detected: u64,
    pub worst_events: Vec<WorstEvent>,
    pub assessment: RiskAssessment,
}

const WORST_EVENTS_K: usize = 10;
const RING_CAPACITY: usize = 100;

pub struct BehavioralMonitor {
    config: BehavioralConfig,
    state: Mutex<LedgerState>,
}

impl BehavioralMonitor {
    pub fn new(config: BehavioralConfig) -> Self {
        Self {
            config,
            state: Mutex::new(LedgerState::new(RING_CAPACITY, WORST_EVENTS_K)),
        }
    }

    /// Record one decided request. Updates counters, pushes into the
    /// appropriate ring, and sets threshold flags when a counter crosses
    /// `behavioral.maxX`/`alertThresholds.X`. Flags only ever transition
    /// false -> true, which is what makes `assess()` monotonic under
    /// invariant 9.
    pub fn record(&self, request: &AccessRequest, verdict: &Verdict) {
        let mut state = self.state.lock().expect("monitor mutex poisoned");
        let was_over_hard_limit = state.over_hard_limit || state.over_hard_process_spawns;

        match request.kind {
            AccessRequestKind::FsRead => {
                state.file_reads += 1;
                if verdict.is_deny() {
                    state.sensitive_reads += 1;
                    state.sensitive_path_hits.insert(request.target.clone());
                }
                if let Some(limit) = self.config.alert_thresholds.file_reads {
                    state.over_alert_threshold |= state.file_reads > limit;
                }
            }
            AccessRequestKind::FsWrite | AccessRequestKind::FsCreate | AccessRequestKind::FsDelete => {
                state.file_writes += 1;
                state.file_write_ring.push(request.target.clone());
                if let Some(limit) = self.config.max_file_writes {
                    state.over_hard_limit |= state.file_writes > limit;
                }
            }
            AccessRequestKind::NetConnect | AccessRequestKind::NetSend | AccessRequestKind::NetResolve => {
                state.network_requests += 1;
                state.network_ring.push(NetworkRequestRecord {
                    timestamp: request.timestamp,
                    target: request.target.clone(),
                    method: format!("{:?}", request.kind),
                    allowed: verdict.decision == VerdictDecision::Allow,
                });
                if verdict.reason == sentinel_common::Reason::CredentialPattern {
                    state.credentials_detected += 1;
                }
                if let Some(limit) = self.config.alert_thresholds.network_requests {
                    state.over_alert_threshold |= state.network_requests > limit;
                }
                if let Some(limit) = self.config.max_network_requests {
                    state.over_hard_limit |= state.network_requests > limit;
                }
            }
            AccessRequestKind::CmdExec | AccessRequestKind::CmdSpawn => {
                state.process_spawns += 1;
                state.spawn_records.push(SpawnRecord {
                    timestamp: request.timestamp,
                    target: request.target.clone(),
                    allowed: verdict.decision == VerdictDecision::Allow,
                });
                if let Some(limit) = self.config.alert_thresholds.process_spawns {
                    state.over_alert_threshold |= state.process_spawns > limit;
                }
                if let Some(limit) = self.config.max_process_spawns {
                    state.over_hard_process_spawns |= state.process_spawns > limit;
                }
            }
            AccessRequestKind::EnvGet | AccessRequestKind::EnvEnum | AccessRequestKind::ModuleLoad => {}
        }

        if verdict.is_deny() {
            state.any_critical_deny |= verdict.severity == Severity::Critical;
            state.any_high_deny |= verdict.severity == Severity::High;
            state.any_medium_deny |= verdict.severity == Severity::Medium;
        }

        if !was_over_hard_limit && (state.over_hard_limit || state.over_hard_process_spawns) {
            tracing::warn!(kind = ?request.kind, target = %request.target, "behavioral hard limit exceeded");
        }

        if matches!(verdict.decision, VerdictDecision::Deny | VerdictDecision::Warn) {
            state.push_suspicious(SuspiciousEvent {
                timestamp: request.timestamp,
                kind: request.kind,
                target: request.target.clone(),
                reason: verdict.reason,
                severity: verdict.severity,
            });
            state.push_worst(WorstEvent {
                timestamp: request.timestamp,
                kind: request.kind,
                target: request.target.clone(),
                decision: verdict.decision,
                severity: verdict.severity,
                package: request.caller_module.as_ref().map(|m| m.to_string()),
            });
        }
    }

    /// Terminal risk assessment per spec §4.6. A consistent snapshot of
    /// everything recorded up to this call.
    pub fn assess(&self) -> RiskAssessment {
        let state = self.state.lock().expect("monitor mutex poisoned");
        risk::assess(&state, &self.config)
    }

    /// Immutable snapshot for the Shutdown Reporter.
    pub fn snapshot(&self) -> MonitorSnapshot {
        let state = self.state.lock().expect("monitor mutex poisoned");
        let assessment = risk::assess(&state, &self.config);
        MonitorSnapshot {
            file_reads: state.file_reads,
            file_writes: state.file_writes,
            network_requests: state.network_requests,
            process_spawns: state.process_spawns,
            sensitive_reads: state.sensitive_reads,
            credentials_detected: state.credentials_detected,
            worst_events: state.worst_events.clone(),
            assessment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_common::{AccessRequestKind, Reason};

    fn req(kind: AccessRequestKind, target: &str, ts: u64) -> AccessRequest {
        AccessRequest::new(kind, target, ts)
    }

    #[test]
    fn counters_total_match_recorded_events_per_kind() {
        let monitor = BehavioralMonitor::new(BehavioralConfig::default());
        monitor.record(&req(AccessRequestKind::FsRead, "/a", 1), &Verdict::allow(Reason::Passed));
        monitor.record(&req(AccessRequestKind::FsRead, "/b", 2), &Verdict::allow(Reason::Passed));
        monitor.record(&req(AccessRequestKind::NetConnect, "x:443", 3), &Verdict::allow(Reason::Passed));
        let snap = monitor.snapshot();
        assert_eq!(snap.file_reads, 2);
        assert_eq!(snap.network_requests, 1);
    }

    #[test]
    fn risk_never_decreases_as_events_accumulate() {
        let monitor = BehavioralMonitor::new(BehavioralConfig::default());
        let mut last = Risk::Clean;
        let events: Vec<(AccessRequestKind, Verdict)> = vec![
            (AccessRequestKind::FsRead, Verdict::allow(Reason::Passed)),
            (AccessRequestKind::FsRead, Verdict::deny(Reason::BlockedRead, Severity::Medium)),
            (AccessRequestKind::NetSend, Verdict::deny(Reason::CredentialPattern, Severity::Critical)),
            (AccessRequestKind::FsRead, Verdict::allow(Reason::Passed)),
        ];
        for (i, (kind, verdict)) in events.into_iter().enumerate() {
            monitor.record(&req(kind, "/x", i as u64), &verdict);
            let risk = monitor.assess().risk;
            assert!(risk >= last, "risk decreased from {last:?} to {risk:?}");
            last = risk;
        }
    }

    #[test]
    fn credential_detection_forces_high_risk() {
        let monitor = BehavioralMonitor::new(BehavioralConfig::default());
        monitor.record(
            &req(AccessRequestKind::NetSend, "x:443", 1),
            &Verdict::deny(Reason::CredentialPattern, Severity::Critical),
        );
        assert_eq!(monitor.assess().risk, Risk::High);
    }
}
