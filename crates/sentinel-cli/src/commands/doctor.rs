//! `sentinel doctor`: validates a configuration file and prints
//! diagnostics that never change a `Verdict` (SPEC_FULL §2), grounded on
//! `assay-core`'s `doctor/analyzers/policy.rs` diagnostic-pass pattern —
//! narrowed here to config-shape checks this lineage's analyzer runs
//! against a parsed policy rather than a live trace.

use crate::cli::DoctorArgs;
use crate::config_discovery;
use std::collections::HashSet;

pub enum DiagnosticSeverity {
    Warning,
    Info,
}

pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,
}

/// Additive, host-side advisories (SPEC_FULL §2): an `allowedDomains`
/// entry that can never be hit because `network.enabled=false`, a
/// `trustedModules` entry listed more than once, and an
/// `exceptions.modules` entry naming a module absent from
/// `trustedModules`.
fn diagnose(config: &sentinel_policy::Config) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if !config.network.enabled && !config.network.allowed_domains.is_empty() {
        diagnostics.push(Diagnostic {
            severity: DiagnosticSeverity::Warning,
            message: format!(
                "network.allowedDomains has {} entries but network.enabled=false; they can never be reached",
                config.network.allowed_domains.len()
            ),
        });
    }

    let mut seen = HashSet::new();
    for module in &config.trusted_modules {
        if !seen.insert(module.as_str()) {
            diagnostics.push(Diagnostic {
                severity: DiagnosticSeverity::Warning,
                message: format!("trustedModules lists '{module}' more than once"),
            });
        }
    }

    let trusted: HashSet<&str> = config.trusted_modules.iter().map(String::as_str).collect();
    for module in config.exceptions.modules.keys() {
        if !trusted.contains(module.as_str()) {
            diagnostics.push(Diagnostic {
                severity: DiagnosticSeverity::Info,
                message: format!(
                    "exceptions.modules['{module}'] has no corresponding trustedModules entry; \
                     the exception still applies, it does not grant filesystem/network trust bypass"
                ),
            });
        }
    }

    diagnostics
}

pub fn run(args: DoctorArgs) -> anyhow::Result<i32> {
    let discovered = config_discovery::discover(args.config)?;
    match &discovered.source {
        Some(path) => println!("config: {}", path.display()),
        None => println!("config: none found; strict-defaults mode active"),
    }

    let policy = sentinel_policy::CompiledPolicy::compile(discovered.config.clone())?;
    println!("digest: {}", policy.digest);

    let diagnostics = diagnose(&discovered.config);
    if diagnostics.is_empty() {
        println!("no issues found");
        return Ok(0);
    }

    let mut warnings = 0;
    for diagnostic in &diagnostics {
        let prefix = match diagnostic.severity {
            DiagnosticSeverity::Warning => {
                warnings += 1;
                "warning"
            }
            DiagnosticSeverity::Info => "info",
        };
        println!("[{prefix}] {}", diagnostic.message);
    }
    Ok(if warnings > 0 { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_policy::config::ModuleException;
    use sentinel_policy::Config;

    #[test]
    fn flags_unreachable_allowed_domains() {
        let mut cfg = Config::default();
        cfg.network.enabled = false;
        cfg.network.allowed_domains = vec!["example.com".to_string()];
        let diagnostics = diagnose(&cfg);
        assert!(diagnostics.iter().any(|d| d.message.contains("can never be reached")));
    }

    #[test]
    fn flags_duplicate_trusted_module() {
        let mut cfg = Config::default();
        cfg.trusted_modules = vec!["left-pad".to_string(), "left-pad".to_string()];
        let diagnostics = diagnose(&cfg);
        assert!(diagnostics.iter().any(|d| d.message.contains("more than once")));
    }

    #[test]
    fn flags_orphaned_exception() {
        let mut cfg = Config::default();
        cfg.exceptions.modules.insert("mystery-pkg".to_string(), ModuleException::default());
        let diagnostics = diagnose(&cfg);
        assert!(diagnostics.iter().any(|d| d.message.contains("mystery-pkg")));
    }

    #[test]
    fn clean_config_has_no_diagnostics() {
        assert!(diagnose(&Config::default()).is_empty());
    }
}
