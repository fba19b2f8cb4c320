//! Module Source Scanner (spec §4.7): static screen of loaded
//! third-party module source, invoked once per module load.

use sentinel_common::{Observable, Reason, Severity, Verdict};
use sentinel_policy::snapshot::CompiledPolicy;

/// Whether the loaded module's resolved URL/path is inside a
/// `node_modules`-style package root (third-party) or not
/// (project-local). The Interception Normalization Layer determines
/// this from the module URL before calling `scan`; it is not something
/// the scanner infers from source content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleOrigin {
    ThirdParty,
    ProjectLocal,
}

/// Classify `source` against the compiled malicious-source patterns and
/// produce a `Verdict` per spec §4.7's outcome table.
pub fn scan(source: &str, origin: ModuleOrigin, policy: &CompiledPolicy) -> Verdict {
    let mut best: Option<(Severity, &str)> = None;
    for rule in &policy.malicious_rules {
        if rule.regex.is_match(source) {
            let candidate = (rule.severity, rule.description.as_str());
            best = Some(match best {
                Some(current) if current.0 >= candidate.0 => current,
                _ => candidate,
            });
        }
    }

    let verdict = match (best, origin) {
        (Some((severity, desc)), ModuleOrigin::ThirdParty) if severity == Severity::Critical => {
            Verdict::deny(Reason::MaliciousCode, Severity::Critical)
                .with_observable(Observable::matched(desc))
        }
        (Some((severity, desc)), _) => {
            Verdict::warn(Reason::MaliciousCode, severity).with_observable(Observable::matched(desc))
        }
        (None, _) => Verdict::allow(Reason::Passed),
    };

    verdict.downgrade_if_alert_only(policy.config.mode.alert_only)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_common::VerdictDecision;
    use sentinel_policy::config::Config;

    fn policy() -> CompiledPolicy {
        CompiledPolicy::compile(Config::default()).unwrap()
    }

    #[test]
    fn third_party_critical_match_denies() {
        let v = scan(
            "eval(Buffer.from(data, 'base64').toString())",
            ModuleOrigin::ThirdParty,
            &policy(),
        );
        assert_eq!(v.decision, VerdictDecision::Deny);
        assert_eq!(v.reason, Reason::MaliciousCode);
        assert_eq!(v.severity, Severity::Critical);
    }

    #[test]
    fn project_local_critical_match_only_warns() {
        let v = scan(
            "eval(Buffer.from(data, 'base64').toString())",
            ModuleOrigin::ProjectLocal,
            &policy(),
        );
        assert_eq!(v.decision, VerdictDecision::Warn);
    }

    #[test]
    fn clean_source_passes() {
        let v = scan("module.exports = function add(a, b) { return a + b; };", ModuleOrigin::ThirdParty, &policy());
        assert_eq!(v.decision, VerdictDecision::Allow);
        assert_eq!(v.reason, Reason::Passed);
    }

    #[test]
    fn alert_only_downgrades_critical_third_party_denial() {
        let mut cfg = Config::default();
        cfg.mode.alert_only = true;
        let policy = CompiledPolicy::compile(cfg).unwrap();
        let v = scan("eval(Buffer.from(data, 'base64').toString())", ModuleOrigin::ThirdParty, &policy);
        assert_eq!(v.decision, VerdictDecision::Warn);
        assert_eq!(v.reason, Reason::MaliciousCode);
    }
}
