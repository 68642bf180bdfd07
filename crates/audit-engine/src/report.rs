//! Report assembly

use shared_types::AuditReport;

use crate::aggregate::Aggregate;
use crate::summarizer::ExecutiveSummary;

/// Compose the aggregate and summary into the final report
pub fn assemble(
    aggregate: Aggregate,
    summary: ExecutiveSummary,
    truncated_clauses: usize,
) -> AuditReport {
    AuditReport {
        risk_density: aggregate.risk_density,
        risks: aggregate.risks,
        safe_points: aggregate.safe_points,
        summary: summary.into_text(),
        classified_clauses: aggregate.classified_clauses,
        truncated_clauses,
        safe_points_omitted: aggregate.safe_points_omitted,
    }
}
