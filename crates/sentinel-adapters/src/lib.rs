//! One adapter per platform primitive (spec §4.4/§9's capability-set
//! redesign), implementing [`sentinel_adapter_api::InterceptionAdapter`]
//! and the blocking-convention table of spec §4.4/§6. The concrete
//! runtime hooks (actual `open()`/`connect()`/`exec()` monkey-patching)
//! are out of scope per spec §1: each adapter method here takes
//! already-raw arguments — a path, a `host:port`, an argv, a variable
//! name — normalizes them, and routes the result through
//! `sentinel_adapter_api::evaluate`.

pub mod env;
pub mod fs;
pub mod module_load;
pub mod net;
pub mod proc;

pub use env::EnvironmentAdapter;
pub use fs::FilesystemAdapter;
pub use module_load::ModuleLoadAdapter;
pub use net::NetworkAdapter;
pub use proc::ProcessAdapter;

use sentinel_common::Verdict;

/// Surfaced by every `check_*` method. `NotInstalled` covers the case
/// where a caller reaches a check before `InterceptionAdapter::install`
/// has handed the adapter a context; `Denied` carries the full verdict
/// so the raw call site can pick whichever of throw/callback/stream-
/// error its own blocking convention requires.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("adapter not installed")]
    NotInstalled,
    #[error("permission denied: {0:?}")]
    Denied(Verdict),
}

impl AdapterError {
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            AdapterError::Denied(verdict) => Some(verdict),
            AdapterError::NotInstalled => None,
        }
    }
}
