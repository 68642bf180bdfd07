//! Shared application state

use std::sync::Arc;

use audit_engine::{AuditConfig, AuditEngine, AuditError, BackendBundle, BackendCell};

/// Builds the backend bundle on first use
pub type BackendFactory = Arc<dyn Fn() -> Result<BackendBundle, AuditError> + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    config: Arc<AuditConfig>,
    backends: Arc<BackendCell>,
    factory: BackendFactory,
}

impl AppState {
    pub fn new(config: AuditConfig, factory: BackendFactory) -> Self {
        Self {
            config: Arc::new(config),
            backends: Arc::new(BackendCell::new()),
            factory,
        }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    pub fn backends_ready(&self) -> bool {
        self.backends.is_initialized()
    }

    /// Construct the backends if no request has done so yet
    pub async fn warm(&self) -> Result<(), AuditError> {
        let factory = Arc::clone(&self.factory);
        self.backends
            .get_or_init(|| async move { factory() })
            .await
            .map(|_| ())
    }

    /// An engine over the shared backends
    pub async fn engine(&self) -> Result<AuditEngine, AuditError> {
        let factory = Arc::clone(&self.factory);
        let bundle = self
            .backends
            .get_or_init(|| async move { factory() })
            .await?;
        AuditEngine::new(self.config.as_ref().clone(), bundle)
    }
}
