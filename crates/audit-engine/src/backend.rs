//! Inference backend contracts and their process-wide construction
//!
//! The engine only depends on the two call contracts below. Concrete
//! backends (HTTP, local models, test stubs) are built once behind a
//! [`BackendCell`] and shared read-only afterwards.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::info;

use crate::error::{AuditError, BackendError};

/// Zero-shot text classifier
#[async_trait]
pub trait ClassificationBackend: Send + Sync {
    /// Score `text` against every candidate label.
    ///
    /// Returns one `(label, score)` pair per input label, ordered by
    /// descending score.
    async fn classify(
        &self,
        text: &str,
        labels: &[&str],
    ) -> Result<Vec<(String, f64)>, BackendError>;

    /// Name used in logs
    fn name(&self) -> &str;
}

/// Parameters for one abstractive summarization call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub text: String,
    pub max_length: usize,
    pub min_length: usize,
    /// Greedy decoding, no sampling
    pub deterministic: bool,
}

/// Abstractive summarizer
#[async_trait]
pub trait SummarizationBackend: Send + Sync {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, BackendError>;

    /// Name used in logs
    fn name(&self) -> &str;
}

/// The pair of backends an analysis runs against
#[derive(Clone)]
pub struct BackendBundle {
    pub classifier: Arc<dyn ClassificationBackend>,
    pub summarizer: Arc<dyn SummarizationBackend>,
}

impl BackendBundle {
    pub fn new(
        classifier: Arc<dyn ClassificationBackend>,
        summarizer: Arc<dyn SummarizationBackend>,
    ) -> Self {
        Self {
            classifier,
            summarizer,
        }
    }
}

impl std::fmt::Debug for BackendBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendBundle")
            .field("classifier", &self.classifier.name())
            .field("summarizer", &self.summarizer.name())
            .finish()
    }
}

/// Single-initialization barrier for the backend bundle.
///
/// Concurrent callers of [`BackendCell::get_or_init`] wait for one
/// construction; a failed construction leaves the cell empty so a later
/// call can retry.
#[derive(Default)]
pub struct BackendCell {
    cell: OnceCell<Arc<BackendBundle>>,
}

impl BackendCell {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Return the shared bundle, constructing it with `init` on first use
    pub async fn get_or_init<F, Fut>(&self, init: F) -> Result<Arc<BackendBundle>, AuditError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<BackendBundle, AuditError>>,
    {
        let bundle = self
            .cell
            .get_or_try_init(|| async {
                info!("Initializing inference backends...");
                let bundle = init().await?;
                info!(
                    "Backends ready: classifier={}, summarizer={}",
                    bundle.classifier.name(),
                    bundle.summarizer.name()
                );
                Ok::<_, AuditError>(Arc::new(bundle))
            })
            .await?;
        Ok(Arc::clone(bundle))
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NullBackend;

    #[async_trait]
    impl ClassificationBackend for NullBackend {
        async fn classify(
            &self,
            _text: &str,
            labels: &[&str],
        ) -> Result<Vec<(String, f64)>, BackendError> {
            Ok(labels.iter().map(|l| (l.to_string(), 0.2)).collect())
        }

        fn name(&self) -> &str {
            "null"
        }
    }

    #[async_trait]
    impl SummarizationBackend for NullBackend {
        async fn summarize(&self, _request: &SummaryRequest) -> Result<String, BackendError> {
            Ok(String::new())
        }

        fn name(&self) -> &str {
            "null"
        }
    }

    fn null_bundle() -> BackendBundle {
        BackendBundle::new(Arc::new(NullBackend), Arc::new(NullBackend))
    }

    #[tokio::test]
    async fn test_concurrent_init_constructs_once() {
        let cell = Arc::new(BackendCell::new());
        let constructions = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let cell = Arc::clone(&cell);
            let constructions = Arc::clone(&constructions);
            handles.push(tokio::spawn(async move {
                cell.get_or_init(|| async move {
                    constructions.fetch_add(1, Ordering::SeqCst);
                    tokio::task::yield_now().await;
                    Ok(null_bundle())
                })
                .await
                .map(|_| ())
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(constructions.load(Ordering::SeqCst), 1);
        assert!(cell.is_initialized());
    }

    #[tokio::test]
    async fn test_failed_init_can_retry() {
        let cell = BackendCell::new();

        let first = cell
            .get_or_init(|| async { Err(AuditError::BackendInit("model missing".into())) })
            .await;
        assert!(matches!(first, Err(AuditError::BackendInit(_))));
        assert!(!cell.is_initialized());

        let second = cell.get_or_init(|| async { Ok(null_bundle()) }).await;
        assert!(second.is_ok());
        assert!(cell.is_initialized());
    }

    #[test]
    fn test_bundle_debug_names_backends() {
        let debug = format!("{:?}", null_bundle());
        assert!(debug.contains("null"));
    }
}
