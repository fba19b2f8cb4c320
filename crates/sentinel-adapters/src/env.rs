//! Environment adapter (spec §4.3 "Environment kind", §4.4's table:
//! `ENV_GET` returns undefined on deny; §9 Open Question (a): `ENV_ENUM`
//! is always `ALLOW` at the Policy Decision Engine, and the returned key
//! set is filtered here, on the adapter side, per spec §6's surface
//! contract rather than by a `Verdict`.

use crate::AdapterError;
use sentinel_adapter_api::{evaluate, FirewallContext, InterceptOutcome, InterceptionAdapter};
use sentinel_common::{AccessRequest, AccessRequestKind, ModuleId};
use std::sync::Arc;

pub struct EnvironmentAdapter {
    context: Option<Arc<FirewallContext>>,
}

impl EnvironmentAdapter {
    pub fn new() -> Self {
        Self { context: None }
    }

    fn context(&self) -> Result<&Arc<FirewallContext>, AdapterError> {
        self.context.as_ref().ok_or(AdapterError::NotInstalled)
    }

    /// `ENV_GET(name)`. A `DENY` here means the caller must return
    /// `undefined` to its own caller, not propagate an error (spec §4.4).
    pub fn check_get(&self, name: &str, caller: Option<ModuleId>) -> Result<(), AdapterError> {
        let context = self.context()?;
        let mut request = AccessRequest::new(AccessRequestKind::EnvGet, name, context.now());
        if let Some(caller) = caller {
            request = request.with_caller(caller);
        }
        match evaluate(context, request) {
            InterceptOutcome::Proceed | InterceptOutcome::ProceedWithWarning(_) => Ok(()),
            InterceptOutcome::Refuse(verdict) => Err(AdapterError::Denied(verdict)),
        }
    }

    /// `ENV_ENUM`: records the enumeration (always `ALLOW`) and returns
    /// `keys` with every `environment.protectedVariables` entry removed.
    pub fn enumerate(&self, keys: Vec<String>, caller: Option<ModuleId>) -> Result<Vec<String>, AdapterError> {
        let context = self.context()?;
        let mut request = AccessRequest::new(AccessRequestKind::EnvEnum, "*", context.now());
        if let Some(caller) = caller {
            request = request.with_caller(caller);
        }
        evaluate(context, request);

        let protected = &context.policy().load().config.environment.protected_variables;
        Ok(keys.into_iter().filter(|k| !protected.contains(k)).collect())
    }
}

impl Default for EnvironmentAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl InterceptionAdapter for EnvironmentAdapter {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn install(&mut self, context: Arc<FirewallContext>) {
        if self.context.is_none() {
            self.context = Some(context);
        }
    }

    fn uninstall(&mut self) {
        self.context = None;
    }

    fn is_installed(&self) -> bool {
        self.context.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_adapter_api::InitPolicy;
    use sentinel_policy::{CompiledPolicy, Config};

    fn installed_adapter(config: Config) -> EnvironmentAdapter {
        let policy = CompiledPolicy::compile(config).unwrap();
        let context = Arc::new(FirewallContext::ready(policy, InitPolicy::FailClosed));
        let mut adapter = EnvironmentAdapter::new();
        adapter.install(context);
        adapter
    }

    #[test]
    fn protected_variable_is_denied_for_untrusted_caller() {
        let mut cfg = Config::default();
        cfg.environment.protected_variables = vec!["GITHUB_TOKEN".to_string()];
        let adapter = installed_adapter(cfg);
        let err = adapter.check_get("GITHUB_TOKEN", None).unwrap_err();
        assert!(matches!(err, AdapterError::Denied(v) if v.reason == sentinel_common::Reason::ProtectedVariable));
    }

    #[test]
    fn trusted_caller_still_denied_when_bypass_disabled() {
        let mut cfg = Config::default();
        cfg.environment.protected_variables = vec!["GITHUB_TOKEN".to_string()];
        cfg.environment.allow_trusted_modules_access = false;
        cfg.trusted_modules = vec!["left-pad".to_string()];
        let adapter = installed_adapter(cfg);
        let err = adapter.check_get("GITHUB_TOKEN", Some(ModuleId::new("left-pad"))).unwrap_err();
        assert!(matches!(err, AdapterError::Denied(v) if v.reason == sentinel_common::Reason::ProtectedVariable));
    }

    #[test]
    fn enumerate_filters_out_protected_variables() {
        let mut cfg = Config::default();
        cfg.environment.protected_variables = vec!["GITHUB_TOKEN".to_string()];
        let adapter = installed_adapter(cfg);
        let keys = vec!["PATH".to_string(), "GITHUB_TOKEN".to_string(), "HOME".to_string()];
        let filtered = adapter.enumerate(keys, None).unwrap();
        assert_eq!(filtered, vec!["PATH".to_string(), "HOME".to_string()]);
    }
}
