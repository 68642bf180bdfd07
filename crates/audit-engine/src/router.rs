//! Threshold routing of classified clauses
//!
//! Each clause is routed on its top label only:
//! - risk label scoring above the risk threshold: risk finding with a tip
//! - any other label scoring above the safe threshold: safe finding
//! - otherwise: dropped from both lists, still counted as classified
//!
//! Both comparisons are strict.

use shared_types::{Clause, RiskFinding, SafeFinding};

use crate::advisor::NegotiationAdvisor;
use crate::classifier::ClassificationResult;
use crate::config::AuditConfig;

/// The two independent score thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPolicy {
    pub risk_threshold: f64,
    pub safe_threshold: f64,
}

impl From<&AuditConfig> for ThresholdPolicy {
    fn from(config: &AuditConfig) -> Self {
        Self {
            risk_threshold: config.risk_threshold,
            safe_threshold: config.safe_threshold,
        }
    }
}

/// Where a single clause ends up
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingDecision {
    Risk(RiskFinding),
    Safe(SafeFinding),
    Dropped,
}

/// Applies the threshold policy and attaches negotiation tips
#[derive(Debug, Clone)]
pub struct RiskRouter {
    policy: ThresholdPolicy,
    advisor: NegotiationAdvisor,
}

impl RiskRouter {
    pub fn new(policy: ThresholdPolicy, advisor: NegotiationAdvisor) -> Self {
        Self { policy, advisor }
    }

    pub fn route(&self, clause: &Clause, result: &ClassificationResult) -> RoutingDecision {
        let (label, score) = result.top();

        if label.is_risk() && score > self.policy.risk_threshold {
            RoutingDecision::Risk(RiskFinding {
                clause: clause.text.clone(),
                label,
                score,
                tip: self.advisor.tip(label).to_string(),
            })
        } else if score > self.policy.safe_threshold {
            RoutingDecision::Safe(SafeFinding {
                clause: clause.text.clone(),
            })
        } else {
            RoutingDecision::Dropped
        }
    }

    /// Route clauses and their classifications pairwise, keeping clause order
    pub fn route_all(
        &self,
        clauses: &[Clause],
        results: &[ClassificationResult],
    ) -> Vec<RoutingDecision> {
        debug_assert_eq!(clauses.len(), results.len());
        clauses
            .iter()
            .zip(results)
            .map(|(clause, result)| self.route(clause, result))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::LabelTaxonomy;
    use proptest::prelude::*;
    use shared_types::ClauseLabel;

    const LIABILITY_CLAUSE: &str = "The provider shall not be liable for any damages, incidental or consequential, arising from the use of the service";

    fn router() -> RiskRouter {
        RiskRouter::new(
            ThresholdPolicy {
                risk_threshold: 0.35,
                safe_threshold: 0.50,
            },
            NegotiationAdvisor::new(),
        )
    }

    /// Classification with `top` scoring `score` and the rest sharing the remainder
    fn result_with_top(top: ClauseLabel, score: f64) -> ClassificationResult {
        let rest = ((1.0 - score) / 4.0).min(score / 2.0);
        let raw = ClauseLabel::ALL
            .into_iter()
            .map(|l| {
                let s = if l == top { score } else { rest };
                (l.as_str().to_string(), s)
            })
            .collect();
        ClassificationResult::from_raw(&LabelTaxonomy, raw).unwrap()
    }

    #[test]
    fn test_hidden_liability_becomes_risk_finding() {
        let clause = Clause::new(0, LIABILITY_CLAUSE);
        let result = result_with_top(ClauseLabel::HiddenLiability, 0.82);

        match router().route(&clause, &result) {
            RoutingDecision::Risk(finding) => {
                assert_eq!(finding.label, ClauseLabel::HiddenLiability);
                assert_eq!(finding.score, 0.82);
                assert_eq!(finding.clause, LIABILITY_CLAUSE);
                assert!(finding.tip.contains("cap on damages"));
            }
            other => panic!("Expected risk finding, got {:?}", other),
        }
    }

    #[test]
    fn test_risk_threshold_is_strict() {
        let clause = Clause::new(0, LIABILITY_CLAUSE);
        let result = result_with_top(ClauseLabel::UnfairArbitration, 0.35);
        // Not above the risk threshold and not above the safe threshold either
        assert_eq!(router().route(&clause, &result), RoutingDecision::Dropped);
    }

    #[test]
    fn test_standard_clause_above_safe_threshold_is_safe() {
        let clause = Clause::new(0, "Either party may terminate with thirty days notice");
        let result = result_with_top(ClauseLabel::StandardClause, 0.71);
        assert_eq!(
            router().route(&clause, &result),
            RoutingDecision::Safe(SafeFinding {
                clause: clause.text.clone()
            })
        );
    }

    #[test]
    fn test_low_confidence_safe_label_is_dropped() {
        let clause = Clause::new(0, "Either party may terminate with thirty days notice");
        let result = result_with_top(ClauseLabel::BeneficialClause, 0.50);
        assert_eq!(router().route(&clause, &result), RoutingDecision::Dropped);
    }

    #[test]
    fn test_route_all_preserves_order() {
        let clauses = vec![
            Clause::new(0, "first clause with enough length"),
            Clause::new(1, "second clause with enough length"),
            Clause::new(2, "third clause with enough length"),
        ];
        let results = vec![
            result_with_top(ClauseLabel::StandardClause, 0.9),
            result_with_top(ClauseLabel::AdversarialTrap, 0.6),
            result_with_top(ClauseLabel::BeneficialClause, 0.3),
        ];

        let decisions = router().route_all(&clauses, &results);
        assert!(matches!(decisions[0], RoutingDecision::Safe(_)));
        assert!(matches!(decisions[1], RoutingDecision::Risk(_)));
        assert_eq!(decisions[2], RoutingDecision::Dropped);
    }

    fn label_strategy() -> impl Strategy<Value = ClauseLabel> {
        prop_oneof![
            Just(ClauseLabel::AdversarialTrap),
            Just(ClauseLabel::UnfairArbitration),
            Just(ClauseLabel::HiddenLiability),
            Just(ClauseLabel::StandardClause),
            Just(ClauseLabel::BeneficialClause),
        ]
    }

    proptest! {
        /// Property: a risk label above the risk threshold yields a risk finding, never a safe one
        #[test]
        fn risk_above_threshold_always_risk(
            label in label_strategy(),
            score in 0.2f64..=1.0,
            risk_threshold in 0.05f64..0.95,
            safe_threshold in 0.05f64..0.95,
        ) {
            let router = RiskRouter::new(
                ThresholdPolicy { risk_threshold, safe_threshold },
                NegotiationAdvisor::new(),
            );
            let clause = Clause::new(0, LIABILITY_CLAUSE);
            let decision = router.route(&clause, &result_with_top(label, score));

            if label.is_risk() && score > risk_threshold {
                prop_assert!(matches!(decision, RoutingDecision::Risk(ref f) if f.label == label));
            } else {
                prop_assert!(!matches!(decision, RoutingDecision::Risk(_)));
            }
        }
    }
}
