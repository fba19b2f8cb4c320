//! Policy Decision Engine, Credential Scanner, Module Source Scanner and
//! the crate-wide error taxonomy (spec §4.3, §4.5, §4.7, §7).

pub mod credential;
pub mod engine;
pub mod error;
pub mod module_scanner;

pub use engine::decide;
pub use error::FirewallError;
