use crate::ledger::LedgerState;
use sentinel_policy::config::BehavioralConfig;
use serde::{Deserialize, Serialize};

/// Four-valued terminal risk classification (spec §4.6, GLOSSARY).
/// Declared in ascending severity order so `Risk::High > Risk::Clean`
/// and invariant 9 ("adding an event never decreases assessed risk")
/// can be checked with a plain `>=` in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    Clean,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub risk: Risk,
    pub contributing_factors: Vec<String>,
}

pub fn assess(state: &LedgerState, config: &BehavioralConfig) -> RiskAssessment {
    let mut factors = Vec::new();

    let process_spawns_over_max = config
        .max_process_spawns
        .is_some_and(|max| state.process_spawns > max);

    let high = state.any_critical_deny
        || state.credentials_detected > 0
        || state.sensitive_reads > 0
        || process_spawns_over_max;

    if state.any_critical_deny {
        factors.push("a critical-severity deny occurred".to_string());
    }
    if state.credentials_detected > 0 {
        factors.push(format!("{} credential pattern(s) detected", state.credentials_detected));
    }
    if state.sensitive_reads > 0 {
        factors.push(format!("{} sensitive path read(s) blocked", state.sensitive_reads));
    }
    if process_spawns_over_max {
        factors.push("process spawn count exceeded behavioral.maxProcessSpawns".to_string());
    }

    if high {
        return RiskAssessment { risk: Risk::High, contributing_factors: factors };
    }

    let medium = state.over_alert_threshold || state.over_hard_limit || state.any_high_deny;
    if state.over_alert_threshold || state.over_hard_limit {
        factors.push("an operation counter crossed its configured threshold".to_string());
    }
    if state.any_high_deny {
        factors.push("a high-severity deny occurred".to_string());
    }

    if medium {
        return RiskAssessment { risk: Risk::Medium, contributing_factors: factors };
    }

    if state.any_medium_deny {
        factors.push("a medium-severity deny occurred".to_string());
        return RiskAssessment { risk: Risk::Low, contributing_factors: factors };
    }

    RiskAssessment { risk: Risk::Clean, contributing_factors: factors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerState;

    #[test]
    fn clean_when_nothing_recorded() {
        let state = LedgerState::new(10, 5);
        let assessment = assess(&state, &BehavioralConfig::default());
        assert_eq!(assessment.risk, Risk::Clean);
        assert!(assessment.contributing_factors.is_empty());
    }

    #[test]
    fn high_when_any_sensitive_read_occurred() {
        let mut state = LedgerState::new(10, 5);
        state.sensitive_reads = 1;
        let assessment = assess(&state, &BehavioralConfig::default());
        assert_eq!(assessment.risk, Risk::High);
        assert!(!assessment.contributing_factors.is_empty());
    }

    #[test]
    fn ordering_supports_monotonic_checks() {
        assert!(Risk::High > Risk::Medium);
        assert!(Risk::Medium > Risk::Low);
        assert!(Risk::Low > Risk::Clean);
    }
}
