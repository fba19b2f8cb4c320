//! Error taxonomy (spec §7). A policy match itself is never an `Err` —
//! it is a `Verdict::Deny`/`Verdict::Warn` value, propagated through
//! whatever error channel the host adapter's call-site convention uses
//! (spec §4.4's blocking-convention table). This enum covers the other
//! four categories spec §7 names: runtime-internal, reporting,
//! config-reload and initialization-race failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FirewallError {
    /// Interception infrastructure failure (not a policy match). Logged
    /// to the audit file and the error channel when not in build-process
    /// silent mode; never propagated to the application when it is safe
    /// to degrade.
    #[error("runtime-internal failure: {0}")]
    RuntimeInternal(String),

    /// A reporting-path failure (report write, audit append). Always
    /// swallowed by the caller; exists as a typed value so callers can
    /// choose to log it before discarding.
    #[error("reporting failure: {0}")]
    Reporting(String),

    /// A config reload was rejected; the live snapshot is retained.
    #[error("configuration reload rejected, retaining live snapshot: {0}")]
    ConfigReload(String),

    /// The Policy Engine could not yet be consulted (initialization
    /// race) and the construction-time choice was "fail closed".
    #[error("firewall not ready")]
    NotReady,
}
