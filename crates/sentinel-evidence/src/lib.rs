pub mod audit;
pub mod report;
pub mod reporter;

pub use audit::{AuditEvent, AuditLog};
pub use report::{Counters, StructuredReport, WorstEventRow, SCHEMA_VERSION};
pub use reporter::{print_stderr_summary, steer_exit_code, write_structured_report};
