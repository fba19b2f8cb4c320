//! Filesystem adapter (spec §4.3 "Filesystem kinds", §4.4's table: throw
//! on sync read, callback-with-error on async read, stream error event).
//! This crate has no opinion on which of those three shapes the host
//! call site uses; it only produces the `Result` the call site then
//! renders into its own convention.

use crate::AdapterError;
use sentinel_adapter_api::normalize::{normalize_path, PathArg};
use sentinel_adapter_api::{evaluate, FirewallContext, InterceptOutcome, InterceptionAdapter};
use sentinel_common::{AccessRequest, AccessRequestKind, ModuleId};
use std::path::PathBuf;
use std::sync::Arc;

pub struct FilesystemAdapter {
    context: Option<Arc<FirewallContext>>,
    cwd: PathBuf,
}

impl FilesystemAdapter {
    pub fn new(cwd: PathBuf) -> Self {
        Self { context: None, cwd }
    }

    fn context(&self) -> Result<&Arc<FirewallContext>, AdapterError> {
        self.context.as_ref().ok_or(AdapterError::NotInstalled)
    }

    fn check(
        &self,
        kind: AccessRequestKind,
        path: impl Into<PathArg>,
        caller: Option<ModuleId>,
        existing_target_executable: bool,
        payload: Option<&[u8]>,
    ) -> Result<(), AdapterError> {
        let context = self.context()?;
        let target = normalize_path(path, &self.cwd);
        let mut request = AccessRequest::new(kind, target, context.now()).with_existing_executable(existing_target_executable);
        if let Some(caller) = caller {
            request = request.with_caller(caller);
        }
        if let Some(payload) = payload {
            request = request.with_payload(payload.to_vec());
        }
        match evaluate(context, request) {
            InterceptOutcome::Proceed | InterceptOutcome::ProceedWithWarning(_) => Ok(()),
            InterceptOutcome::Refuse(verdict) => Err(AdapterError::Denied(verdict)),
        }
    }

    pub fn check_read(&self, path: impl Into<PathArg>, caller: Option<ModuleId>) -> Result<(), AdapterError> {
        self.check(AccessRequestKind::FsRead, path, caller, false, None)
    }

    pub fn check_write(
        &self,
        path: impl Into<PathArg>,
        payload: Option<&[u8]>,
        existing_target_executable: bool,
        caller: Option<ModuleId>,
    ) -> Result<(), AdapterError> {
        self.check(AccessRequestKind::FsWrite, path, caller, existing_target_executable, payload)
    }

    pub fn check_create(
        &self,
        path: impl Into<PathArg>,
        payload: Option<&[u8]>,
        caller: Option<ModuleId>,
    ) -> Result<(), AdapterError> {
        self.check(AccessRequestKind::FsCreate, path, caller, false, payload)
    }

    pub fn check_delete(&self, path: impl Into<PathArg>, caller: Option<ModuleId>) -> Result<(), AdapterError> {
        self.check(AccessRequestKind::FsDelete, path, caller, false, None)
    }
}

impl InterceptionAdapter for FilesystemAdapter {
    fn name(&self) -> &'static str {
        "filesystem"
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
