//! Executive summary adapter
//!
//! Summarizes a fixed-length prefix of the document. Backend failures and
//! timeouts degrade to the configured fallback text instead of failing the
//! report.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::backend::{SummarizationBackend, SummaryRequest};
use crate::config::AuditConfig;

/// Outcome of a summary attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutiveSummary {
    Generated(String),
    Fallback(String),
}

impl ExecutiveSummary {
    pub fn text(&self) -> &str {
        match self {
            ExecutiveSummary::Generated(text) | ExecutiveSummary::Fallback(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ExecutiveSummary::Generated(text) | ExecutiveSummary::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ExecutiveSummary::Fallback(_))
    }
}

/// Wraps one summarization call per document
#[derive(Clone)]
pub struct ExecutiveSummarizer {
    backend: Arc<dyn SummarizationBackend>,
    prefix_len: usize,
    max_len: usize,
    min_len: usize,
    fallback: String,
    timeout: Duration,
}

impl ExecutiveSummarizer {
    pub fn new(backend: Arc<dyn SummarizationBackend>, config: &AuditConfig) -> Self {
        Self {
            backend,
            prefix_len: config.summary_prefix_len,
            max_len: config.summary_max_len,
            min_len: config.summary_min_len,
            fallback: config.summary_fallback.clone(),
            timeout: config.summary_timeout(),
        }
    }

    /// The request sent to the backend for `text`
    pub fn request_for(&self, text: &str) -> SummaryRequest {
        SummaryRequest {
            text: truncate_chars(text, self.prefix_len).to_string(),
            max_length: self.max_len,
            min_length: self.min_len,
            deterministic: true,
        }
    }

    pub fn fallback(&self) -> ExecutiveSummary {
        ExecutiveSummary::Fallback(self.fallback.clone())
    }

    pub async fn summarize(&self, text: &str) -> ExecutiveSummary {
        let request = self.request_for(text);
        debug!(
            "Summarizing {} characters with {}",
            request.text.chars().count(),
            self.backend.name()
        );

        match tokio::time::timeout(self.timeout, self.backend.summarize(&request)).await {
            Ok(Ok(summary)) if !summary.trim().is_empty() => {
                ExecutiveSummary::Generated(summary.trim().to_string())
            }
            Ok(Ok(_)) => {
                warn!("Summary backend returned empty text");
                self.fallback()
            }
            Ok(Err(e)) => {
                warn!("Summary failed: {}", e);
                self.fallback()
            }
            Err(_) => {
                warn!("Summary timed out after {}ms", self.timeout.as_millis());
                self.fallback()
            }
        }
    }
}

/// Longest prefix of `text` holding at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
