use sentinel_common::{AccessRequestKind, Reason, Severity, Timestamp, VerdictDecision};
use std::collections::{HashSet, VecDeque};

/// Fixed-capacity FIFO ring. Pushing past capacity evicts the oldest
/// entry (spec §3: "a bounded ring (latest N=100)").
#[derive(Debug, Clone)]
pub struct BoundedRing<T> {
    capacity: usize,
    items: VecDeque<T>,
}

impl<T> BoundedRing<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct NetworkRequestRecord {
    pub timestamp: Timestamp,
    pub target: String,
    pub method: String,
    pub allowed: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SpawnRecord {
    pub timestamp: Timestamp,
    pub target: String,
    pub allowed: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SuspiciousEvent {
    pub timestamp: Timestamp,
    pub kind: AccessRequestKind,
    pub target: String,
    pub reason: Reason,
    pub severity: Severity,
}

/// One of the structured report's "top-K worst events" (spec §6).
#[derive(Debug, Clone, serde::Serialize)]
pub struct WorstEvent {
    pub timestamp: Timestamp,
    pub kind: AccessRequestKind,
    pub target: String,
    pub decision: VerdictDecision,
    pub severity: Severity,
    pub package: Option<String>,
}

pub struct LedgerState {
    pub file_reads: u64,
    pub file_writes: u64,
    pub network_requests: u64,
    pub process_spawns: u64,
    pub sensitive_reads: u64,
    pub credentials_detected: u64,

    pub sensitive_path_hits: HashSet<String>,
    pub network_ring: BoundedRing<NetworkRequestRecord>,
    pub file_write_ring: BoundedRing<String>,
    pub spawn_records: Vec<SpawnRecord>,
    pub suspicious_events: BoundedRing<SuspiciousEvent>,
    pub worst_events: Vec<WorstEvent>,
    worst_k: usize,

    pub over_alert_threshold: bool,
    pub over_hard_limit: bool,
    pub over_hard_process_spawns: bool,
    pub any_critical_deny: bool,
    pub any_high_deny: bool,
    pub any_medium_deny: bool,
}

impl LedgerState {
    pub fn new(ring_capacity: usize, worst_k: usize) -> Self {
        Self {
            file_reads: 0,
            file_writes: 0,
            network_requests: 0,
            process_spawns: 0,
            sensitive_reads: 0,
            credentials_detected: 0,
            sensitive_path_hits: HashSet::new(),
            network_ring: BoundedRing::new(ring_capacity),
            file_write_ring: BoundedRing::new(ring_capacity),
            spawn_records: Vec::new(),
            suspicious_events: BoundedRing::new(ring_capacity),
            worst_events: Vec::new(),
            worst_k,
            over_alert_threshold: false,
            over_hard_limit: false,
            over_hard_process_spawns: false,
            any_critical_deny: false,
            any_high_deny: false,
            any_medium_deny: false,
        }
    }

    pub fn push_suspicious(&mut self, event: SuspiciousEvent) {
        self.suspicious_events.push(event);
    }

    /// Keep the `worst_k` most severe events, most severe and most
    /// recent first. A linear insertion is fine at `worst_k <= 10`.
    pub fn push_worst(&mut self, event: WorstEvent) {
        let pos = self
            .worst_events
            .iter()
            .position(|existing| {
                (existing.severity, existing.timestamp) < (event.severity, event.timestamp)
            })
            .unwrap_or(self.worst_events.len());
        self.worst_events.insert(pos, event);
        self.worst_events.truncate(self.worst_k);
    }
}
