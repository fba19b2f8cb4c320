//! Audit log format (spec §6): append-only, one NDJSON record per line,
//! UTC ISO timestamp, action, operation, normalized target, caller
//! module, threat descriptions (never raw payloads), and a trimmed call
//! stack. Errors during writing are swallowed (spec §7, §4.8): a full
//! disk or a broken pipe must never propagate into the host application.

use serde::Serialize;
use std::io::Write;
use std::sync::Mutex;

/// Call stacks longer than this are truncated before being written,
/// as a defensive cap independent of whatever trimming the caller
/// already did (spec §4.4: "capped").
const MAX_CALL_STACK_FRAMES: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub timestamp: String,
    pub action: String,
    pub operation: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller_module: Option<String>,
    pub threats: Vec<String>,
    pub call_stack: Vec<String>,
}

impl AuditEvent {
    pub fn new(
        timestamp: impl Into<String>,
        action: impl Into<String>,
        operation: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            action: action.into(),
            operation: operation.into(),
            target: target.into(),
            caller_module: None,
            threats: Vec::new(),
            call_stack: Vec::new(),
        }
    }

    pub fn with_caller(mut self, caller: impl Into<String>) -> Self {
        self.caller_module = Some(caller.into());
        self
    }

    pub fn with_threats(mut self, threats: Vec<String>) -> Self {
        self.threats = threats;
        self
    }

    pub fn with_call_stack(mut self, mut frames: Vec<String>) -> Self {
        frames.truncate(MAX_CALL_STACK_FRAMES);
        self.call_stack = frames;
        self
    }
}

/// Append-only audit log over any `Write` destination. The caller is
/// responsible for supplying a writer captured via the escape hatch of
/// spec §4.4/§5 (an original I/O handle that bypasses interception), so
/// this type has no opinion on file paths.
pub struct AuditLog<W: Write> {
    writer: Mutex<W>,
}

impl<W: Write> AuditLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    /// Append one record. Never returns an error to the caller: a write
    /// failure is logged via `tracing` and otherwise swallowed.
    pub fn append(&self, event: &AuditEvent) {
        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(error) => {
                tracing::warn!(%error, "failed to serialize audit event");
                return;
            }
        };
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(error) = writeln!(writer, "{line}") {
            tracing::warn!(%error, "failed to append audit event");
        }
    }
}
