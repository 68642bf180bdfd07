//! Audit Engine - first-pass legal risk triage over contract text
//!
//! Pipeline per document:
//! 1. Segment text into clauses and cap the clause count
//! 2. Classify every clause against the label taxonomy (bounded concurrency)
//! 3. Route each clause to risk / safe / neither by threshold policy
//! 4. Aggregate risk density and finding lists
//! 5. Summarize the document prefix concurrently with steps 2-4
//! 6. Assemble the immutable report

pub mod advisor;
pub mod aggregate;
pub mod backend;
pub mod classifier;
pub mod config;
pub mod error;
pub mod progress;
pub mod render;
pub mod report;
pub mod router;
pub mod segmenter;
pub mod summarizer;
pub mod taxonomy;

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use shared_types::{AuditReport, Clause};
use tracing::info;

pub use advisor::NegotiationAdvisor;
pub use backend::{
    BackendBundle, BackendCell, ClassificationBackend, SummarizationBackend, SummaryRequest,
};
pub use classifier::{ClassificationResult, ClauseClassifier};
pub use config::AuditConfig;
pub use error::{AuditError, BackendError};
pub use progress::{NoProgress, ProgressObserver};
pub use router::{RiskRouter, RoutingDecision, ThresholdPolicy};
pub use summarizer::{ExecutiveSummarizer, ExecutiveSummary};

/// AuditEngine entry point
pub struct AuditEngine {
    config: AuditConfig,
    classifier: ClauseClassifier,
    summarizer: ExecutiveSummarizer,
    router: RiskRouter,
}

impl AuditEngine {
    pub fn new(config: AuditConfig, backends: Arc<BackendBundle>) -> Result<Self, AuditError> {
        config.validate()?;

        let classifier =
            ClauseClassifier::new(Arc::clone(&backends.classifier), config.classify_timeout());
        let summarizer = ExecutiveSummarizer::new(Arc::clone(&backends.summarizer), &config);
        let router = RiskRouter::new(ThresholdPolicy::from(&config), NegotiationAdvisor::new());

        Ok(Self {
            config,
            classifier,
            summarizer,
            router,
        })
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Analyze one document
    pub async fn analyze(&self, text: &str) -> Result<AuditReport, AuditError> {
        self.analyze_with_progress(text, &NoProgress).await
    }

    /// Analyze one document, notifying `observer` as clauses complete
    pub async fn analyze_with_progress(
        &self,
        text: &str,
        observer: &dyn ProgressObserver,
    ) -> Result<AuditReport, AuditError> {
        if text.trim().is_empty() {
            return Err(AuditError::ExtractionEmpty);
        }

        let deadline = self.config.document_deadline();
        tokio::time::timeout(deadline, self.run(text, observer))
            .await
            .map_err(|_| AuditError::Timeout {
                operation: "document analysis",
                timeout_ms: self.config.document_deadline_ms,
            })?
    }

    async fn run(
        &self,
        text: &str,
        observer: &dyn ProgressObserver,
    ) -> Result<AuditReport, AuditError> {
        let started = Instant::now();

        let segmented = segmenter::segment(text, self.config.min_clause_len);
        let found = segmented.len();
        let (clauses, truncated) = segmenter::cap(segmented, self.config.max_clauses);
        if truncated > 0 {
            info!("Analyzing first {} clauses of {}", clauses.len(), found);
        } else {
            info!("Analyzing {} clauses", clauses.len());
        }

        if clauses.is_empty() {
            let report = report::assemble(
                aggregate::aggregate(Vec::new(), self.config.safe_points_cap),
                self.summarizer.fallback(),
                0,
            );
            return Ok(report);
        }

        // A classification failure drops the in-flight summary as well
        let (results, summary) = tokio::try_join!(
            self.classify_all(&clauses, observer),
            async { Ok::<_, AuditError>(self.summarizer.summarize(text).await) }
        )?;

        let decisions = self.router.route_all(&clauses, &results);
        let aggregate = aggregate::aggregate(decisions, self.config.safe_points_cap);

        info!(
            "Audit complete: {} risks, {} safe points, density {:.3}, summary {} ({}ms)",
            aggregate.risks.len(),
            aggregate.safe_points.len() + aggregate.safe_points_omitted,
            aggregate.risk_density,
            if summary.is_fallback() { "degraded" } else { "generated" },
            started.elapsed().as_millis()
        );

        Ok(report::assemble(aggregate, summary, truncated))
    }

    /// Classify clauses with bounded concurrency; results come back in clause order.
    ///
    /// The first failure aborts the remaining classifications.
    async fn classify_all(
        &self,
        clauses: &[Clause],
        observer: &dyn ProgressObserver,
    ) -> Result<Vec<ClassificationResult>, AuditError> {
        let total = clauses.len();
        let calls: Vec<_> = clauses
            .iter()
            .map(|clause| self.classifier.classify(clause))
            .collect();
        let mut pending = stream::iter(calls).buffered(self.config.classify_concurrency);

        let mut results = Vec::with_capacity(total);
        while let Some(result) = pending.next().await {
            results.push(result?);
            observer.clause_classified(results.len(), total);
        }

        Ok(results)
    }
}
