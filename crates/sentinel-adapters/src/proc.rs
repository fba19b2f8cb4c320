//! Process adapter (spec §4.3 "Command kinds", §4.4's table: `CMD_EXEC`
//! throws synchronously or calls back with an error asynchronously;
//! `CMD_SPAWN` always throws — "no synchronous-allow-but-kill").

use crate::AdapterError;
use sentinel_adapter_api::normalize::join_argv;
use sentinel_adapter_api::{evaluate, FirewallContext, InterceptOutcome, InterceptionAdapter};
use sentinel_common::{AccessRequest, AccessRequestKind, ModuleId};
use std::sync::Arc;

pub struct ProcessAdapter {
    context: Option<Arc<FirewallContext>>,
}

impl ProcessAdapter {
    pub fn new() -> Self {
        Self { context: None }
    }

    fn context(&self) -> Result<&Arc<FirewallContext>, AdapterError> {
        self.context.as_ref().ok_or(AdapterError::NotInstalled)
    }

    fn check(&self, kind: AccessRequestKind, full_command: String, caller: Option<ModuleId>) -> Result<(), AdapterError> {
        let context = self.context()?;
        let mut request = AccessRequest::new(kind, full_command, context.now());
        if let Some(caller) = caller {
            request = request.with_caller(caller);
        }
        match evaluate(context, request) {
            InterceptOutcome::Proceed | InterceptOutcome::ProceedWithWarning(_) => Ok(()),
            InterceptOutcome::Refuse(verdict) => Err(AdapterError::Denied(verdict)),
        }
    }

    /// `command` is already the single-string representation spec §3
    /// requires for `CMD_EXEC`.
    pub fn check_exec(&self, command: &str, caller: Option<ModuleId>) -> Result<(), AdapterError> {
        self.check(AccessRequestKind::CmdExec, command.to_string(), caller)
    }

    /// `argv` is joined into `argv0 + " " + argv[1..]` per spec §4.3
    /// before the Policy Decision Engine ever sees it.
    pub fn check_spawn(&self, argv: &[String], caller: Option<ModuleId>) -> Result<(), AdapterError> {
        self.check(AccessRequestKind::CmdSpawn, join_argv(argv), caller)
    }
}

impl Default for ProcessAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl InterceptionAdapter for ProcessAdapter {
    fn name(&self) -> &'static str {
        "process"
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
