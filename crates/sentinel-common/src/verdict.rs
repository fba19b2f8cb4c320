use serde::{Deserialize, Serialize};

/// The three possible outcomes of a policy decision. See spec §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerdictDecision {
    Allow,
    Deny,
    Warn,
}

/// Severity of a verdict, ordered from least to most severe so that
/// the Behavioral Monitor can compute a maximum across a batch of
/// events with a plain `Ord` comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

/// Stable, surface-visible reason codes. These strings are part of the
/// external contract (spec §7: "reported reasons are surface-stable
/// strings; tests rely on them") so the `Serialize` impl must never be
/// reordered or renamed without a deliberate compatibility decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Disabled,
    Exception,
    TrustedModule,
    BlockedRead,
    BlockedWrite,
    BlockedExtension,
    ExecutableFileBlocked,
    StrictModeNotAllowed,
    BlockedDomain,
    NotInAllowlist,
    SuspiciousPort,
    CredentialPattern,
    BlockedCommand,
    ProtectedVariable,
    MaliciousCode,
    Passed,
    BuildTool,
    PackageManager,
    FirewallNotReady,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::Disabled => "disabled",
            Reason::Exception => "exception",
            Reason::TrustedModule => "trusted_module",
            Reason::BlockedRead => "blocked_read",
            Reason::BlockedWrite => "blocked_write",
            Reason::BlockedExtension => "blocked_extension",
            Reason::ExecutableFileBlocked => "executable_file_blocked",
            Reason::StrictModeNotAllowed => "strict_mode_not_allowed",
            Reason::BlockedDomain => "blocked_domain",
            Reason::NotInAllowlist => "not_in_allowlist",
            Reason::SuspiciousPort => "suspicious_port",
            Reason::CredentialPattern => "credential_pattern",
            Reason::BlockedCommand => "blocked_command",
            Reason::ProtectedVariable => "protected_variable",
            Reason::MaliciousCode => "malicious_code",
            Reason::Passed => "passed",
            Reason::BuildTool => "build_tool",
            Reason::PackageManager => "package_manager",
            Reason::FirewallNotReady => "firewall_not_ready",
        }
    }
}

/// Observations attached to a verdict for audit purposes. Never carries
/// raw payload bytes (spec §4.5, invariant 6).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl Observable {
    pub fn matched(pattern: impl Into<String>) -> Self {
        Self {
            matched_pattern: Some(pattern.into()),
            ..Default::default()
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }
}

/// The outcome of a single Policy Decision Engine call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub decision: VerdictDecision,
    pub reason: Reason,
    pub severity: Severity,
    #[serde(default)]
    pub observable: Observable,
}

impl Verdict {
    pub fn allow(reason: Reason) -> Self {
        Self {
            decision: VerdictDecision::Allow,
            reason,
            severity: Severity::Info,
            observable: Observable::default(),
        }
    }

    pub fn deny(reason: Reason, severity: Severity) -> Self {
        Self {
            decision: VerdictDecision::Deny,
            reason,
            severity,
            observable: Observable::default(),
        }
    }

    pub fn warn(reason: Reason, severity: Severity) -> Self {
        Self {
            decision: VerdictDecision::Warn,
            reason,
            severity,
            observable: Observable::default(),
        }
    }

    pub fn with_observable(mut self, observable: Observable) -> Self {
        self.observable = observable;
        self
    }

    /// Spec §4.3 post-processing: a DENY under `mode.alertOnly` becomes a
    /// WARN with identical reason and severity.
    pub fn downgrade_if_alert_only(mut self, alert_only: bool) -> Self {
        if alert_only && self.decision == VerdictDecision::Deny {
            self.decision = VerdictDecision::Warn;
        }
        self
    }

    pub fn is_deny(&self) -> bool {
        self.decision == VerdictDecision::Deny
    }
}
