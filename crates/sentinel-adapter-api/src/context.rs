//! Explicit `FirewallContext` (REDESIGN FLAGS: "global mutable state ->
//! explicit context object"). Owns the Configuration Snapshot reference,
//! the Behavioral Monitor, the call-site module cache and an optional
//! audit sink. Adapters close over an `Arc<FirewallContext>` at install
//! time; nothing here is a process-wide singleton, so multiple contexts
//! can coexist per process for worker isolates (spec §5).

use crate::clock::Clock;
use crate::module_cache::ModuleCache;
use crate::sentinel_probe;
use sentinel_common::{AccessRequest, Reason, Timestamp, Verdict, VerdictDecision};
use sentinel_monitor::BehavioralMonitor;
use sentinel_policy::config::BehavioralConfig;
use sentinel_policy::{CompiledPolicy, ConfigHandle};
use std::sync::Arc;
use std::time::Duration;

/// Construction-time choice for spec §4.4/§7's initialization-race
/// failure mode: what an adapter does when it is asked to evaluate a
/// request before the context has ever received a Configuration
/// Snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitPolicy {
    FailClosed,
    AllowWithWarning,
}

/// Sink for notable (non-`ALLOW(passed)`) decisions, written through
/// whatever escape-I/O handle the host captured before installing
/// adapters (spec §4.4/§5: "never re-enter"). `sentinel-adapter-api`
/// only defines the seam; `sentinel-adapters`/`sentinel-cli` supply the
/// real implementation backed by `sentinel_evidence::AuditLog`, since
/// this crate does not depend on `sentinel-evidence`.
pub trait AuditSink: Send + Sync {
    fn record(&self, request: &AccessRequest, verdict: &Verdict);
}

const MODULE_CACHE_CAPACITY: usize = 512;
const MODULE_CACHE_TTL: Duration = Duration::from_secs(5);

pub struct FirewallContext {
    policy: Option<ConfigHandle>,
    monitor: BehavioralMonitor,
    init_policy: InitPolicy,
    module_cache: ModuleCache,
    audit: Option<Arc<dyn AuditSink>>,
    disabled_by_build_sentinel: bool,
    clock: Clock,
}

impl FirewallContext {
    /// Construct a fully-initialized context from a compiled Policy
    /// Decision Engine snapshot.
    pub fn ready(policy: CompiledPolicy, init_policy: InitPolicy) -> Self {
        let monitor = BehavioralMonitor::new(policy.config.behavioral.clone());
        Self {
            policy: Some(ConfigHandle::new(policy)),
            monitor,
            init_policy,
            module_cache: ModuleCache::new(MODULE_CACHE_CAPACITY, MODULE_CACHE_TTL),
            audit: None,
            disabled_by_build_sentinel: sentinel_probe::is_trusted_build_process(),
            clock: Clock::new(),
        }
    }

    /// Construct a context that has not yet received its first
    /// Configuration Snapshot (spec §7: "concurrency race during
    /// initialization"). `publish` transitions it to ready.
    pub fn not_ready(init_policy: InitPolicy) -> Self {
        Self {
            policy: None,
            monitor: BehavioralMonitor::new(BehavioralConfig::default()),
            init_policy,
            module_cache: ModuleCache::new(MODULE_CACHE_CAPACITY, MODULE_CACHE_TTL),
            audit: None,
            disabled_by_build_sentinel: sentinel_probe::is_trusted_build_process(),
            clock: Clock::new(),
        }
    }

    /// Monotonic nanosecond timestamp shared by every adapter installed
    /// on this context, so that `AccessRequest::timestamp` values stay
    /// comparable across calls (spec §5: "decisions observed per call
    /// are in program order").
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    /// Publish a freshly compiled policy. Transitions a not-ready
    /// context to ready on first call; on a ready context this is the
    /// atomic reload swap of spec §3/§9.
    pub fn publish(&mut self, policy: CompiledPolicy) {
        match &self.policy {
            Some(handle) => {
                handle.swap(policy);
            }
            None => self.policy = Some(ConfigHandle::new(policy)),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.policy.is_some()
    }

    pub fn init_policy(&self) -> InitPolicy {
        self.init_policy
    }

    /// The live Configuration Snapshot handle. Panics if called before
    /// `is_ready()` is true; callers route through `evaluate`, which
    /// always checks readiness first.
    pub fn policy(&self) -> &ConfigHandle {
        self.policy
            .as_ref()
            .expect("FirewallContext::policy called before ready; check is_ready() first")
    }

    pub fn monitor(&self) -> &BehavioralMonitor {
        &self.monitor
    }

    pub fn module_cache(&self) -> &ModuleCache {
        &self.module_cache
    }

    /// True when this process was identified at construction as a
    /// trusted native-addon build. An adapter observing this must
    /// disable itself wholesale and emit no interceptions (spec §4.4).
    pub fn disabled_by_build_sentinel(&self) -> bool {
        self.disabled_by_build_sentinel
    }

    /// Record a notable decision to the audit sink, if one is
    /// configured. No-op for `ALLOW(passed)` (the overwhelming majority
    /// of requests) and no-op while the current thread is already
    /// inside an escape-I/O write, so the audit path itself can never
    /// trigger a nested decision (spec invariant 7).
    pub fn audit_if_notable(&self, request: &AccessRequest, verdict: &Verdict) {
        if crate::escape::in_escape_write() {
            return;
        }
        if !is_notable(verdict) {
            return;
        }
        if let Some(sink) = &self.audit {
            sink.record(request, verdict);
        }
    }
}

fn is_notable(verdict: &Verdict) -> bool {
    !(verdict.decision == VerdictDecision::Allow && verdict.reason == Reason::Passed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_common::{AccessRequestKind, Severity};
    use sentinel_policy::config::Config;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn req() -> AccessRequest {
        AccessRequest::new(AccessRequestKind::FsRead, "/etc/hosts", 1)
    }

    #[test]
    fn not_ready_context_has_no_live_policy() {
        let context = FirewallContext::not_ready(InitPolicy::FailClosed);
        assert!(!context.is_ready());
    }

    #[test]
    fn publish_transitions_not_ready_context_to_ready() {
        let mut context = FirewallContext::not_ready(InitPolicy::FailClosed);
        context.publish(CompiledPolicy::compile(Config::default()).unwrap());
        assert!(context.is_ready());
    }

    struct CountingSink(AtomicUsize);
    impl AuditSink for CountingSink {
        fn record(&self, _request: &AccessRequest, _verdict: &Verdict) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn passed_allow_is_not_notable() {
        let sink = Arc::new(CountingSink(AtomicUsize::new(0)));
        let context = FirewallContext::ready(CompiledPolicy::compile(Config::default()).unwrap(), InitPolicy::FailClosed)
            .with_audit_sink(sink.clone());
        context.audit_if_notable(&req(), &Verdict::allow(Reason::Passed));
        assert_eq!(sink.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn deny_is_notable_and_reaches_the_sink() {
        let sink = Arc::new(CountingSink(AtomicUsize::new(0)));
        let context = FirewallContext::ready(CompiledPolicy::compile(Config::default()).unwrap(), InitPolicy::FailClosed)
            .with_audit_sink(sink.clone());
        context.audit_if_notable(&req(), &Verdict::deny(Reason::BlockedRead, Severity::High));
        assert_eq!(sink.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn no_sink_configured_is_a_silent_no_op() {
        let context = FirewallContext::ready(CompiledPolicy::compile(Config::default()).unwrap(), InitPolicy::FailClosed);
        context.audit_if_notable(&req(), &Verdict::deny(Reason::BlockedRead, Severity::High));
    }
}
