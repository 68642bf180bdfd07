//! Hosted inference backends over HTTP

use std::sync::Arc;

use async_trait::async_trait;
use audit_engine::{
    AuditError, BackendBundle, BackendError, ClassificationBackend, SummarizationBackend,
    SummaryRequest,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::InferenceConfig;
use crate::response::{
    parse_summary, parse_zero_shot, SummaryParameters, SummaryRequestBody, ZeroShotRequest,
};

/// Shared request plumbing for both task endpoints
#[derive(Clone)]
struct InferenceEndpoint {
    client: reqwest::Client,
    url: String,
    api_token: Option<String>,
    model: String,
}

impl InferenceEndpoint {
    fn new(client: reqwest::Client, config: &InferenceConfig, model: &str) -> Self {
        Self {
            client,
            url: config.model_url(model),
            api_token: config.api_token.clone(),
            model: model.to_string(),
        }
    }

    /// POST a JSON body and return the raw response text
    async fn post<B: Serialize + ?Sized>(&self, body: &B) -> Result<String, BackendError> {
        let mut request = self.client.post(&self.url).json(body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(format!("{}: {}", self.model, e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Unavailable(format!("{}: {}", self.model, e)))?;

        if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            return Err(BackendError::Unavailable(format!(
                "{} returned 503: {}",
                self.model, text
            )));
        }
        if !status.is_success() {
            return Err(BackendError::Http(format!(
                "{} returned {}: {}",
                self.model, status, text
            )));
        }

        debug!("{} responded with {} bytes", self.model, text.len());
        Ok(text)
    }
}

/// Zero-shot classifier behind the inference API
#[derive(Clone)]
pub struct HostedClassifier {
    endpoint: InferenceEndpoint,
}

impl HostedClassifier {
    pub fn new(client: reqwest::Client, config: &InferenceConfig) -> Self {
        Self {
            endpoint: InferenceEndpoint::new(client, config, &config.classifier_model),
        }
    }
}

#[async_trait]
impl ClassificationBackend for HostedClassifier {
    async fn classify(
        &self,
        text: &str,
        labels: &[&str],
    ) -> Result<Vec<(String, f64)>, BackendError> {
        let body = ZeroShotRequest::single_label(text, labels);
        let raw = self.endpoint.post(&body).await?;

        let mut pairs = parse_zero_shot(&raw)?;
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(pairs)
    }

    fn name(&self) -> &str {
        &self.endpoint.model
    }
}

/// Abstractive summarizer behind the inference API
#[derive(Clone)]
pub struct HostedSummarizer {
    endpoint: InferenceEndpoint,
}

impl HostedSummarizer {
    pub fn new(client: reqwest::Client, config: &InferenceConfig) -> Self {
        Self {
            endpoint: InferenceEndpoint::new(client, config, &config.summarizer_model),
        }
    }
}

#[async_trait]
impl SummarizationBackend for HostedSummarizer {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, BackendError> {
        let body = SummaryRequestBody {
            inputs: &request.text,
            parameters: SummaryParameters {
                max_length: request.max_length,
                min_length: request.min_length,
                do_sample: !request.deterministic,
            },
        };
        let raw = self.endpoint.post(&body).await?;
        parse_summary(&raw)
    }

    fn name(&self) -> &str {
        &self.endpoint.model
    }
}

/// Build both hosted backends over one shared connection pool
pub fn build_backends(config: &InferenceConfig) -> Result<BackendBundle, AuditError> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("inference-client/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AuditError::BackendInit(format!("HTTP client: {}", e)))?;

    info!(
        "Inference backends: classifier={} summarizer={} at {}",
        config.classifier_model, config.summarizer_model, config.base_url
    );

    Ok(BackendBundle::new(
        Arc::new(HostedClassifier::new(client.clone(), config)),
        Arc::new(HostedSummarizer::new(client, config)),
    ))
}
