//! Classification adapter
//!
//! Wraps one zero-shot classifier call per clause and normalizes the raw
//! backend output into a [`ClassificationResult`]: every taxonomy label
//! exactly once, scores in [0, 1], sorted by descending score.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use shared_types::{Clause, ClauseLabel};
use tracing::debug;

use crate::backend::ClassificationBackend;
use crate::error::AuditError;
use crate::taxonomy::LabelTaxonomy;

/// Ranked label scores for one clause
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    ranked: Vec<(ClauseLabel, f64)>,
}

impl ClassificationResult {
    /// Normalize raw `(label, score)` pairs against the taxonomy.
    ///
    /// Fails when a label is unknown or repeated, a taxonomy label is
    /// missing, or a score is not a finite number in [0, 1]. Ties keep the
    /// backend's order.
    pub fn from_raw(
        taxonomy: &LabelTaxonomy,
        raw: Vec<(String, f64)>,
    ) -> Result<Self, String> {
        let mut seen = HashSet::with_capacity(raw.len());
        let mut ranked = Vec::with_capacity(raw.len());

        for (name, score) in raw {
            let label = ClauseLabel::from_name(&name)
                .ok_or_else(|| format!("unknown label '{}'", name))?;
            if !seen.insert(label) {
                return Err(format!("label '{}' returned more than once", name));
            }
            if !score.is_finite() || !(0.0..=1.0).contains(&score) {
                return Err(format!("score {} for '{}' outside [0, 1]", score, name));
            }
            ranked.push((label, score));
        }

        if let Some(missing) = taxonomy.labels().iter().find(|l| !seen.contains(*l)) {
            return Err(format!("label '{}' missing from response", missing));
        }

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(Self { ranked })
    }

    /// Highest-scoring label
    pub fn top(&self) -> (ClauseLabel, f64) {
        self.ranked[0]
    }
}

/// Classifies clauses through a shared backend with a per-call timeout
#[derive(Clone)]
pub struct ClauseClassifier {
    backend: Arc<dyn ClassificationBackend>,
    taxonomy: LabelTaxonomy,
    timeout: Duration,
}

impl ClauseClassifier {
    pub fn new(backend: Arc<dyn ClassificationBackend>, timeout: Duration) -> Self {
        Self {
            backend,
            taxonomy: LabelTaxonomy,
            timeout,
        }
    }

    pub async fn classify(&self, clause: &Clause) -> Result<ClassificationResult, AuditError> {
        let labels = self.taxonomy.names();

        let raw = tokio::time::timeout(self.timeout, self.backend.classify(&clause.text, &labels))
            .await
            .map_err(|_| AuditError::Timeout {
                operation: "classification",
                timeout_ms: self.timeout.as_millis() as u64,
            })?
            .map_err(|source| AuditError::ClassificationFailed {
                clause_index: clause.index,
                source,
            })?;

        let result = ClassificationResult::from_raw(&self.taxonomy, raw).map_err(|reason| {
            AuditError::MalformedClassification {
                clause_index: clause.index,
                reason,
            }
        })?;

        let (label, score) = result.top();
        debug!(
            "Clause {} classified by {}: {} ({:.2})",
            clause.index,
            self.backend.name(),
            label,
            score
        );

        Ok(result)
    }
}
