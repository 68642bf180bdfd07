//! The fixed label taxonomy clauses are classified against

use shared_types::ClauseLabel;

/// Ordered label set handed to the zero-shot classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelTaxonomy;

impl LabelTaxonomy {
    pub fn labels(&self) -> &'static [ClauseLabel] {
        &ClauseLabel::ALL
    }

    /// Candidate label strings in taxonomy order
    pub fn names(&self) -> Vec<&'static str> {
        ClauseLabel::ALL.iter().map(ClauseLabel::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_in_taxonomy_order() {
        assert_eq!(
            LabelTaxonomy.names(),
            vec![
                "Adversarial/Risky Trap",
                "Unfair Arbitration",
                "Hidden Liability",
                "Standard Clause",
                "Beneficial Clause",
            ]
        );
    }

    #[test]
    fn test_risk_partition() {
        assert_eq!(
            LabelTaxonomy.labels().iter().filter(|l| l.is_risk()).count(),
            3
        );
        assert!(LabelTaxonomy
            .labels()
            .iter()
            .filter(|l| !l.is_risk())
            .all(|l| matches!(l, ClauseLabel::StandardClause | ClauseLabel::BeneficialClause)));
    }
}
