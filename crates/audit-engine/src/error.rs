//! Error types for the audit pipeline

use thiserror::Error;

/// Failure reported by an inference backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

/// Errors that abort the analysis of a document
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Could not extract text from the document")]
    ExtractionEmpty,

    #[error("Classification failed for clause {clause_index}: {source}")]
    ClassificationFailed {
        clause_index: usize,
        #[source]
        source: BackendError,
    },

    #[error("Malformed classification for clause {clause_index}: {reason}")]
    MalformedClassification { clause_index: usize, reason: String },

    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout {
        operation: &'static str,
        timeout_ms: u64,
    },

    #[error("Backend initialization failed: {0}")]
    BackendInit(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AuditError {
    /// True for failures caused by the classification backend
    pub fn is_classification_failure(&self) -> bool {
        matches!(
            self,
            AuditError::ClassificationFailed { .. } | AuditError::MalformedClassification { .. }
        )
    }
}
