//! Wire-level value types shared by every `sentinel` crate.
//!
//! This crate carries no logic and no I/O: it exists so that
//! `sentinel-policy`, `sentinel-core`, `sentinel-monitor` and
//! `sentinel-evidence` can all agree on the shape of an access request
//! and a verdict without depending on each other.

mod module;
mod request;
mod verdict;

pub use module::ModuleId;
pub use request::{AccessRequest, AccessRequestKind};
pub use verdict::{Observable, Reason, Severity, Verdict, VerdictDecision};

/// Monotonic nanosecond timestamp. Callers obtain this from a single
/// process-wide monotonic clock (see `sentinel_adapter_api::clock`); the
/// type here is a plain integer so that requests and verdicts remain
/// `Serialize`/`Deserialize` without smuggling a non-serializable
/// `std::time::Instant` across crate boundaries.
pub type Timestamp = u64;
