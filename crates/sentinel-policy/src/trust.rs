//! Trust Resolver (spec §4.2).

use crate::config::{Config, ModuleException};
use sentinel_common::ModuleId;
use std::collections::{HashMap, HashSet};

/// Per-request trust annotation. `trusted` and `exception` are
/// independent: a module can be trusted with no exception, have an
/// exception without being globally trusted, both, or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustDecision {
    pub trusted: bool,
    pub exception: Option<ModuleException>,
}

impl TrustDecision {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Resolves a `ModuleId` against the Configuration Snapshot's
/// `trustedModules` list and `exceptions.modules` map. Built once per
/// snapshot and held read-only.
#[derive(Debug, Clone)]
pub struct TrustResolver {
    trusted: HashSet<String>,
    exceptions: HashMap<String, ModuleException>,
}

impl TrustResolver {
    pub fn from_config(config: &Config) -> Self {
        Self {
            trusted: config.trusted_modules.iter().cloned().collect(),
            exceptions: config.exceptions.modules.clone(),
        }
    }

    /// Resolve trust for `caller`. A `None` caller is never trusted and
    /// has no exception (spec §4.2).
    pub fn resolve(&self, caller: Option<&ModuleId>) -> TrustDecision {
        let Some(caller) = caller else {
            return TrustDecision::none();
        };
        TrustDecision {
            trusted: self.trusted.contains(caller.as_str()),
            exception: self.exceptions.get(caller.as_str()).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(trusted: &[&str], exception_module: Option<(&str, ModuleException)>) -> Config {
        let mut cfg = Config::default();
        cfg.trusted_modules = trusted.iter().map(|s| s.to_string()).collect();
        if let Some((name, exc)) = exception_module {
            cfg.exceptions.modules.insert(name.to_string(), exc);
        }
        cfg
    }

    #[test]
    fn null_caller_is_never_trusted() {
        let resolver = TrustResolver::from_config(&config_with(&["left-pad"], None));
        let decision = resolver.resolve(None);
        assert!(!decision.trusted);
        assert!(decision.exception.is_none());
    }

    #[test]
    fn exact_match_including_scoped_form() {
        let resolver = TrustResolver::from_config(&config_with(&["@scope/name"], None));
        assert!(resolver.resolve(Some(&ModuleId::new("@scope/name"))).trusted);
        assert!(!resolver.resolve(Some(&ModuleId::new("name"))).trusted);
    }

    #[test]
    fn trust_and_exception_are_independent() {
        let exc = ModuleException {
            allow_filesystem: vec!["/home/u/.ssh/".into()],
            ..Default::default()
        };
        let resolver = TrustResolver::from_config(&config_with(&[], Some(("ok-pkg", exc.clone()))));
        let decision = resolver.resolve(Some(&ModuleId::new("ok-pkg")));
        assert!(!decision.trusted);
        assert_eq!(decision.exception, Some(exc));
    }

    #[test]
    fn exception_locality_other_module_unaffected() {
        let exc = ModuleException {
            allow_filesystem: vec!["/home/u/.ssh/".into()],
            ..Default::default()
        };
        let resolver = TrustResolver::from_config(&config_with(&[], Some(("ok-pkg", exc))));
        let decision = resolver.resolve(Some(&ModuleId::new("other-pkg")));
        assert!(decision.exception.is_none());
    }
}
