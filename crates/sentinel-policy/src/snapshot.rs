//! Configuration Snapshot (spec §3/§9): an immutable value derived once
//! from a `Config`, combining the raw policy tables with compiled regex
//! primitives and a `TrustResolver`. Shared read-only; reload produces a
//! brand new `CompiledPolicy` rather than mutating this one.

use crate::config::{BlockedCommandPattern, Config, MaliciousSourcePattern};
use crate::defaults;
use crate::digest::compute_digest;
use crate::trust::TrustResolver;
use regex::Regex;
use sentinel_common::Severity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("invalid regex in {section} ({pattern:?}): {source}")]
    InvalidRegex {
        section: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A single compiled command rule, carrying the severity and description
/// the raw config line named so the Policy Decision Engine can report
/// them without re-parsing the config.
#[derive(Debug)]
pub struct CompiledCommandRule {
    pub regex: Regex,
    pub severity: Severity,
    pub description: String,
}

#[derive(Debug)]
pub struct CompiledMaliciousRule {
    pub regex: Regex,
    pub severity: Severity,
    pub description: String,
}

/// The immutable, compiled form of a `Config`. This is what
/// `sentinel-core`'s Policy Decision Engine actually consults.
#[derive(Debug)]
pub struct CompiledPolicy {
    pub config: Config,
    pub trust: TrustResolver,
    pub command_rules: Vec<CompiledCommandRule>,
    pub credential_patterns: Vec<Regex>,
    pub malicious_rules: Vec<CompiledMaliciousRule>,
    pub digest: String,
}

impl CompiledPolicy {
    pub fn compile(config: Config) -> Result<Self, CompileError> {
        let digest = compute_digest(&config);
        let trust = TrustResolver::from_config(&config);

        let command_rules = config
            .commands
            .blocked_patterns
            .iter()
            .map(|p: &BlockedCommandPattern| {
                Ok(CompiledCommandRule {
                    regex: compile_regex("commands.blockedPatterns", &p.regex)?,
                    severity: p.severity,
                    description: p.description.clone(),
                })
            })
            .collect::<Result<Vec<_>, CompileError>>()?;

        let credential_patterns = config
            .network
            .credential_patterns
            .iter()
            .map(|p| compile_regex("network.credentialPatterns", p))
            .collect::<Result<Vec<_>, CompileError>>()?;

        let mut malicious_rules = defaults::builtin_malicious_patterns()
            .into_iter()
            .map(|(pattern, severity, description)| {
                Ok(CompiledMaliciousRule {
                    regex: compile_regex("moduleScanner.builtin", pattern)?,
                    severity,
                    description: description.to_string(),
                })
            })
            .collect::<Result<Vec<_>, CompileError>>()?;
        malicious_rules.extend(
            config
                .module_scanner
                .malicious_patterns
                .iter()
                .map(|p: &MaliciousSourcePattern| {
                    Ok(CompiledMaliciousRule {
                        regex: compile_regex("moduleScanner.maliciousPatterns", &p.regex)?,
                        severity: p.severity,
                        description: p.description.clone(),
                    })
                })
                .collect::<Result<Vec<_>, CompileError>>()?,
        );

        tracing::debug!(digest = %digest, command_rules = command_rules.len(), malicious_rules = malicious_rules.len(), "compiled configuration snapshot");

        Ok(Self {
            config,
            trust,
            command_rules,
            credential_patterns,
            malicious_rules,
            digest,
        })
    }
}

fn compile_regex(section: &'static str, pattern: &str) -> Result<Regex, CompileError> {
    Regex::new(pattern).map_err(|source| CompileError::InvalidRegex {
        section,
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_default_config() {
        let policy = CompiledPolicy::compile(Config::default()).unwrap();
        assert!(!policy.malicious_rules.is_empty());
        assert!(policy.command_rules.is_empty());
        assert!(!policy.digest.is_empty());
    }

    #[test]
    fn rejects_invalid_regex_with_section_context() {
        let mut cfg = Config::default();
        cfg.commands.blocked_patterns.push(BlockedCommandPattern {
            regex: "(unterminated".into(),
            severity: Severity::High,
            description: "broken".into(),
        });
        let err = CompiledPolicy::compile(cfg).unwrap_err();
        assert!(err.to_string().contains("commands.blockedPatterns"));
    }

    #[test]
    fn digest_is_deterministic_for_identical_config() {
        let a = CompiledPolicy::compile(Config::default()).unwrap();
        let b = CompiledPolicy::compile(Config::default()).unwrap();
        assert_eq!(a.digest, b.digest);
    }
}
