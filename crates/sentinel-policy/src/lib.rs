//! Configuration Snapshot, Pattern Library and Trust Resolver.
//!
//! See `SPEC_FULL.md` §0 for how this crate fits the rest of the
//! workspace: it owns the typed shape of the config file (not its
//! discovery or I/O) and compiles it once into immutable matcher
//! primitives that `sentinel-core` consumes on every decision.

pub mod config;
pub mod defaults;
pub mod digest;
pub mod handle;
pub mod network;
pub mod pattern;
pub mod snapshot;
pub mod trust;

pub use config::{Config, ConfigError};
pub use handle::ConfigHandle;
pub use snapshot::CompiledPolicy;
pub use trust::{TrustDecision, TrustResolver};
