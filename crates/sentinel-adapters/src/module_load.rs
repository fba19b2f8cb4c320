//! Module-load adapter (spec §4.3 "Module load", §4.7 Module Source
//! Scanner, §4.4's table: "throw from the loader hook"). `MODULE_LOAD`
//! carries no source bytes in an `AccessRequest`, so this adapter calls
//! `sentinel_core::module_scanner::scan` directly rather than routing
//! through `sentinel_adapter_api::evaluate`; it still goes through the
//! shared context for the build-sentinel check and the audit sink.

use crate::AdapterError;
use sentinel_adapter_api::{FirewallContext, InterceptionAdapter};
use sentinel_common::{AccessRequest, AccessRequestKind, ModuleId, Reason, Verdict, VerdictDecision};
use sentinel_core::module_scanner::{self, ModuleOrigin};
use std::sync::Arc;

const PACKAGE_ROOT_MARKERS: &[&str] = &["node_modules/", ".pnpm/"];

fn classify_origin(url: &str) -> ModuleOrigin {
    if PACKAGE_ROOT_MARKERS.iter().any(|marker| url.contains(marker)) {
        ModuleOrigin::ThirdParty
    } else {
        ModuleOrigin::ProjectLocal
    }
}

pub struct ModuleLoadAdapter {
    context: Option<Arc<FirewallContext>>,
}

impl ModuleLoadAdapter {
    pub fn new() -> Self {
        Self { context: None }
    }

    fn context(&self) -> Result<&Arc<FirewallContext>, AdapterError> {
        self.context.as_ref().ok_or(AdapterError::NotInstalled)
    }

    /// Scan `source` loaded from `url` and translate the outcome into
    /// the loader hook's throw-on-deny convention. A `WARN` still lets
    /// the load proceed (spec §4.7's "loading proceeds").
    pub fn check_load(&self, url: &str, source: &str, caller: Option<ModuleId>) -> Result<(), AdapterError> {
        let context = self.context()?;
        if context.disabled_by_build_sentinel() {
            return Ok(());
        }
        let policy = context.policy().load();
        let origin = classify_origin(url);
        let verdict = module_scanner::scan(source, origin, &policy);

        let mut request = AccessRequest::new(AccessRequestKind::ModuleLoad, url, context.now());
        if let Some(caller) = caller {
            request = request.with_caller(caller);
        }
        context.audit_if_notable(&request, &verdict);

        if verdict.decision == VerdictDecision::Deny {
            tracing::warn!(url, ?origin, "module load denied by source scanner");
            return Err(AdapterError::Denied(verdict));
        }
        Ok(())
    }

    /// Strict-defaults fallback for the no-config-file case (spec §6):
    /// block a fixed minimal set of sensitive path substrings, used only
    /// when the host could not locate a configuration file at all.
    pub fn check_strict_default_path(&self, url: &str) -> Result<(), AdapterError> {
        if sentinel_policy::defaults::STRICT_DEFAULTS_SENSITIVE_PATHS
            .iter()
            .any(|frag| url.contains(frag))
        {
            return Err(AdapterError::Denied(Verdict::deny(
                Reason::BlockedRead,
                sentinel_common::Severity::High,
            )));
        }
        Ok(())
    }
}

impl Default for ModuleLoadAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl InterceptionAdapter for ModuleLoadAdapter {
    fn name(&self) -> &'static str {
        "module_load"
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
