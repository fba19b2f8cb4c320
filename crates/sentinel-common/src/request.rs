use crate::{ModuleId, Timestamp};
use serde::{Deserialize, Serialize};

/// The canonical operation classes a hook can report. See spec §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessRequestKind {
    FsRead,
    FsWrite,
    FsCreate,
    FsDelete,
    NetConnect,
    NetSend,
    NetResolve,
    CmdExec,
    CmdSpawn,
    EnvGet,
    EnvEnum,
    ModuleLoad,
}

impl AccessRequestKind {
    pub fn is_filesystem(self) -> bool {
        matches!(self, Self::FsRead | Self::FsWrite | Self::FsCreate | Self::FsDelete)
    }

    pub fn is_network(self) -> bool {
        matches!(self, Self::NetConnect | Self::NetSend | Self::NetResolve)
    }

    pub fn is_command(self) -> bool {
        matches!(self, Self::CmdExec | Self::CmdSpawn)
    }

    pub fn is_environment(self) -> bool {
        matches!(self, Self::EnvGet | Self::EnvEnum)
    }
}

/// A normalized access request produced by the Interception Normalization
/// Layer. `target` is already canonicalized by the time it reaches the
/// Policy Decision Engine: absolute/symlink-resolved paths, lowercased
/// domains, single-string commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRequest {
    pub kind: AccessRequestKind,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "payload_b64")]
    pub payload: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_module: Option<ModuleId>,
    pub timestamp: Timestamp,
    /// Set by the filesystem adapter when the write/create target already
    /// exists on disk and has an execute bit set. Consulted by the
    /// `FS_WRITE`/`FS_CREATE` rule (spec §4.3) for the "executable by
    /// content" check. The Policy Decision Engine never stats the
    /// filesystem itself: it only ever sees what the adapter already
    /// observed, so it stays a pure function of its inputs.
    #[serde(default)]
    pub existing_target_executable: bool,
}

impl AccessRequest {
    pub fn new(kind: AccessRequestKind, target: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            kind,
            target: target.into(),
            payload: None,
            caller_module: None,
            timestamp,
            existing_target_executable: false,
        }
    }

    pub fn with_existing_executable(mut self, executable: bool) -> Self {
        self.existing_target_executable = executable;
        self
    }

    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn with_caller(mut self, caller: impl Into<ModuleId>) -> Self {
        self.caller_module = Some(caller.into());
        self
    }
}

mod payload_b64 {
    //! Payloads are opaque bytes and may contain secret-shaped content; we
    //! never serialize them as UTF-8 text. When a request does round-trip
    //! through JSON (scenario replay in `sentinel-cli`) the bytes are kept
    //! as a plain array of integers rather than pulled in a base64 crate
    //! the rest of the workspace has no other use for.
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(v: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        v.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<Vec<u8>>::deserialize(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_classification() {
        assert!(AccessRequestKind::FsRead.is_filesystem());
        assert!(AccessRequestKind::NetSend.is_network());
        assert!(AccessRequestKind::CmdSpawn.is_command());
        assert!(AccessRequestKind::EnvEnum.is_environment());
        assert!(!AccessRequestKind::ModuleLoad.is_filesystem());
    }

    #[test]
    fn builder_sets_optional_fields() {
        let req = AccessRequest::new(AccessRequestKind::NetSend, "example.com:443", 42)
            .with_payload(b"hello".to_vec())
            .with_caller("left-pad");
        assert_eq!(req.payload.as_deref(), Some(&b"hello"[..]));
        assert_eq!(req.caller_module.unwrap().as_str(), "left-pad");
    }

    #[test]
    fn serializes_without_payload_field_when_absent() {
        let req = AccessRequest::new(AccessRequestKind::FsRead, "/etc/hosts", 1);
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("payload"));
    }
}
