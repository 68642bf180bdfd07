//! Negotiation guidance per risk label

use shared_types::ClauseLabel;

/// Guidance for labels without a dedicated tip
pub const DEFAULT_TIP: &str = "Review carefully.";

/// Maps risk labels to fixed negotiation tips
#[derive(Debug, Clone, Copy, Default)]
pub struct NegotiationAdvisor;

impl NegotiationAdvisor {
    pub fn new() -> Self {
        Self
    }

    pub fn tip(&self, label: ClauseLabel) -> &'static str {
        match label {
            ClauseLabel::AdversarialTrap => {
                "Request specific definition or removal of ambiguous terms."
            }
            ClauseLabel::UnfairArbitration => {
                "Propose mutual arbitration or a neutral venue (e.g., AAA rules)."
            }
            ClauseLabel::HiddenLiability => {
                "Explicitly request mutual liability or a cap on damages (e.g., 1x contract value)."
            }
            ClauseLabel::StandardClause | ClauseLabel::BeneficialClause => DEFAULT_TIP,
        }
    }
}
