//! Endpoint configuration for the hosted inference backends

use audit_engine::AuditError;

pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_CLASSIFIER_MODEL: &str = "facebook/bart-large-mnli";
pub const DEFAULT_SUMMARIZER_MODEL: &str = "facebook/bart-large-cnn";

/// Inference endpoint configuration
#[derive(Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    /// Base URL of the inference API
    pub base_url: String,
    /// Bearer token, if the endpoint requires one
    pub api_token: Option<String>,
    /// Zero-shot classification model id
    pub classifier_model: String,
    /// Summarization model id
    pub summarizer_model: String,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            classifier_model: DEFAULT_CLASSIFIER_MODEL.to_string(),
            summarizer_model: DEFAULT_SUMMARIZER_MODEL.to_string(),
        }
    }
}

impl InferenceConfig {
    /// Load configuration from environment variables
    ///
    /// Expected variables:
    /// - AUDIT_INFERENCE_URL: Base URL (default: Hugging Face hosted inference)
    /// - AUDIT_INFERENCE_TOKEN: Bearer token
    /// - AUDIT_CLASSIFIER_MODEL: Zero-shot model (default: facebook/bart-large-mnli)
    /// - AUDIT_SUMMARIZER_MODEL: Summarization model (default: facebook/bart-large-cnn)
    pub fn from_env() -> Result<Self, AuditError> {
        let defaults = Self::default();

        let base_url = std::env::var("AUDIT_INFERENCE_URL").unwrap_or(defaults.base_url);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AuditError::InvalidConfig(format!(
                "AUDIT_INFERENCE_URL must be an http(s) URL, got {}",
                base_url
            )));
        }

        let api_token = std::env::var("AUDIT_INFERENCE_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        Ok(Self {
            base_url,
            api_token,
            classifier_model: std::env::var("AUDIT_CLASSIFIER_MODEL")
                .unwrap_or(defaults.classifier_model),
            summarizer_model: std::env::var("AUDIT_SUMMARIZER_MODEL")
                .unwrap_or(defaults.summarizer_model),
        })
    }

    /// Task endpoint for a model id
    pub fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url.trim_end_matches('/'), model)
    }
}

impl std::fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("classifier_model", &self.classifier_model)
            .field("summarizer_model", &self.summarizer_model)
            .finish()
    }
}
