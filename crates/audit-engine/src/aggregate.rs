//! Aggregation of routing decisions into report sections

use shared_types::{RiskFinding, SafeFinding};

use crate::router::RoutingDecision;

/// Findings and metrics for one document, in document order
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub risk_density: f64,
    pub risks: Vec<RiskFinding>,
    pub safe_points: Vec<SafeFinding>,
    /// Safe findings beyond the cap
    pub safe_points_omitted: usize,
    pub classified_clauses: usize,
}

/// Fraction of classified clauses that produced a risk finding
pub fn risk_density(risk_count: usize, classified: usize) -> f64 {
    if classified == 0 {
        0.0
    } else {
        risk_count as f64 / classified as f64
    }
}

/// Collapse per-clause decisions into the report sections.
///
/// Every decision counts toward the density denominator, dropped ones
/// included. Risk findings are never truncated; safe findings keep the
/// first `safe_cap` entries.
pub fn aggregate(decisions: Vec<RoutingDecision>, safe_cap: usize) -> Aggregate {
    let classified_clauses = decisions.len();
    let mut risks = Vec::new();
    let mut safe_points = Vec::new();

    for decision in decisions {
        match decision {
            RoutingDecision::Risk(finding) => risks.push(finding),
            RoutingDecision::Safe(finding) => safe_points.push(finding),
            RoutingDecision::Dropped => {}
        }
    }

    let safe_points_omitted = safe_points.len().saturating_sub(safe_cap);
    safe_points.truncate(safe_cap);

    Aggregate {
        risk_density: risk_density(risks.len(), classified_clauses),
        risks,
        safe_points,
        safe_points_omitted,
        classified_clauses,
    }
}
