pub mod types;

pub use types::{AuditReport, Clause, ClauseLabel, RiskFinding, SafeFinding};
