//! Capability-set the Interception Normalization Layer consumes (spec
//! REDESIGN FLAGS: "dynamic metaprogramming hooks -> adapter trait").
//!
//! `sentinel-adapters` implements one [`InterceptionAdapter`] per
//! platform primitive (filesystem, network, process, environment,
//! module load). Each adapter closes over a shared [`FirewallContext`]
//! at `install()` time; the Policy Decision Engine itself never knows
//! which host runtime it is embedded in.

pub mod clock;
pub mod context;
pub mod escape;
pub mod module_cache;
pub mod normalize;
pub mod sentinel_probe;

pub use clock::Clock;
pub use context::{FirewallContext, InitPolicy};
pub use escape::EscapeHandle;
pub use module_cache::ModuleCache;

use sentinel_common::{AccessRequest, ModuleId, Verdict};

/// Outcome handed back to the raw call site so it can apply the
/// blocking convention appropriate to that call shape (spec §4.4's
/// per-operation table: throw, callback-with-error, stream error
/// event, or silent pass-through).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptOutcome {
    /// Call original unmodified.
    Proceed,
    /// Refuse. The adapter decides how to surface this (throw,
    /// callback, stream error) for its call shape.
    Refuse(Verdict),
    /// Call original, but the verdict was a WARN and has already been
    /// logged; adapters may use this to attach advisory telemetry.
    ProceedWithWarning(Verdict),
}

impl InterceptOutcome {
    pub fn from_verdict(verdict: Verdict) -> Self {
        use sentinel_common::VerdictDecision::*;
        match verdict.decision {
            Allow => InterceptOutcome::Proceed,
            Deny => InterceptOutcome::Refuse(verdict),
            Warn => InterceptOutcome::ProceedWithWarning(verdict),
        }
    }
}

/// A capability-set implemented by one adapter per platform primitive
/// (REDESIGN FLAGS). The Policy Engine is unaware of the host runtime;
/// an adapter's only job is to translate a raw call into an
/// [`AccessRequest`], consult the context, and translate the
/// [`InterceptOutcome`] back into that call shape's native convention.
pub trait InterceptionAdapter {
    /// Human-readable name, used in diagnostics and `doctor` output.
    fn name(&self) -> &'static str;

    /// Patch the runtime's hook points, closing over `context`. Must be
    /// idempotent: calling `install` twice without an intervening
    /// `uninstall` is a no-op.
    fn install(&mut self, context: std::sync::Arc<FirewallContext>);

    /// Restore the original, unpatched behavior. Idempotent.
    fn uninstall(&mut self);

    /// True once `install` has patched the runtime.
    fn is_installed(&self) -> bool;
}

/// Evaluate one normalized request against the shared context: policy
/// decision, behavioral recording, and (for `MODULE_LOAD`) is left to
/// the caller since module source isn't part of `AccessRequest`. This
/// is the single chokepoint every adapter routes through, so the
/// ordering guarantees of spec §5 ("decisions observed per call are in
/// program order relative to the caller") reduce to a single function
/// call per request.
pub fn evaluate(context: &FirewallContext, request: AccessRequest) -> InterceptOutcome {
    if !context.is_ready() {
        return match context.init_policy() {
            InitPolicy::FailClosed => {
                tracing::warn!(target = %request.target, "request refused, firewall context not ready");
                InterceptOutcome::Refuse(Verdict::deny(
                    sentinel_common::Reason::FirewallNotReady,
                    sentinel_common::Severity::High,
                ))
            }
            InitPolicy::AllowWithWarning => InterceptOutcome::ProceedWithWarning(Verdict::warn(
                sentinel_common::Reason::FirewallNotReady,
                sentinel_common::Severity::Low,
            )),
        };
    }

    let policy = context.policy().load();
    let trust = policy.trust.resolve(request.caller_module.as_ref());
    let verdict = sentinel_core::decide(&request, &policy, &trust);
    context.monitor().record(&request, &verdict);
    context.audit_if_notable(&request, &verdict);
    InterceptOutcome::from_verdict(verdict)
}

/// Convenience used by adapters that only have a caller hint, not a
/// full [`ModuleId`] yet (e.g. a raw path segment pulled off the call
/// stack before scope-normalization).
pub fn caller_from_segment(segment: &str) -> ModuleId {
    ModuleId::new(segment)
}
