use serde::{Deserialize, Serialize};

/// A segmented clause: trimmed text plus its position in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub index: usize, // Document-order position among all segmented clauses
    pub text: String,
}

impl Clause {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// Labels of the risk taxonomy, in taxonomy order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClauseLabel {
    #[serde(rename = "Adversarial/Risky Trap")]
    AdversarialTrap,
    #[serde(rename = "Unfair Arbitration")]
    UnfairArbitration,
    #[serde(rename = "Hidden Liability")]
    HiddenLiability,
    #[serde(rename = "Standard Clause")]
    StandardClause,
    #[serde(rename = "Beneficial Clause")]
    BeneficialClause,
}

impl ClauseLabel {
    /// Every label, in the order the classifier receives them
    pub const ALL: [ClauseLabel; 5] = [
        ClauseLabel::AdversarialTrap,
        ClauseLabel::UnfairArbitration,
        ClauseLabel::HiddenLiability,
        ClauseLabel::StandardClause,
        ClauseLabel::BeneficialClause,
    ];

    /// Candidate label text as sent to the zero-shot classifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseLabel::AdversarialTrap => "Adversarial/Risky Trap",
            ClauseLabel::UnfairArbitration => "Unfair Arbitration",
            ClauseLabel::HiddenLiability => "Hidden Liability",
            ClauseLabel::StandardClause => "Standard Clause",
            ClauseLabel::BeneficialClause => "Beneficial Clause",
        }
    }

    /// Parse the exact candidate label text returned by a classifier
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.as_str() == name)
    }

    pub fn is_risk(&self) -> bool {
        matches!(
            self,
            ClauseLabel::AdversarialTrap
                | ClauseLabel::UnfairArbitration
                | ClauseLabel::HiddenLiability
        )
    }
}

impl std::fmt::Display for ClauseLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A clause routed to the risk bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFinding {
    pub clause: String,
    pub label: ClauseLabel,
    pub score: f64,
    pub tip: String, // Negotiation guidance for the label
}

/// A clause routed to the safe bucket; serialized as the bare clause text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SafeFinding {
    pub clause: String,
}

/// Final triage report for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub risk_density: f64,
    pub risks: Vec<RiskFinding>,
    pub safe_points: Vec<SafeFinding>,
    pub summary: String,
    /// Clauses that went through classification (the density denominator)
    #[serde(default)]
    pub classified_clauses: usize,
    /// Clauses dropped by the per-document cap before classification
    #[serde(default)]
    pub truncated_clauses: usize,
    /// Safe points found beyond the reported cap
    #[serde(default)]
    pub safe_points_omitted: usize,
}
