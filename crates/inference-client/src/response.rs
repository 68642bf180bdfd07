//! Wire formats of the inference API

use audit_engine::BackendError;
use serde::{Deserialize, Serialize};

/// Zero-shot classification request body
#[derive(Debug, Serialize)]
pub struct ZeroShotRequest<'a> {
    pub inputs: &'a str,
    pub parameters: ZeroShotParameters<'a>,
}

#[derive(Debug, Serialize)]
pub struct ZeroShotParameters<'a> {
    pub candidate_labels: &'a [&'a str],
    /// `false` normalizes scores across the candidate labels so they sum
    /// to 1 and the labels compete for the clause
    pub multi_label: bool,
}

impl<'a> ZeroShotRequest<'a> {
    /// Single-label request: one softmax over all candidate labels
    pub fn single_label(inputs: &'a str, candidate_labels: &'a [&'a str]) -> Self {
        Self {
            inputs,
            parameters: ZeroShotParameters {
                candidate_labels,
                multi_label: false,
            },
        }
    }
}

/// Summarization request body
#[derive(Debug, Serialize)]
pub struct SummaryRequestBody<'a> {
    pub inputs: &'a str,
    pub parameters: SummaryParameters,
}

#[derive(Debug, Serialize)]
pub struct SummaryParameters {
    pub max_length: usize,
    pub min_length: usize,
    pub do_sample: bool,
}

#[derive(Debug, Deserialize)]
struct LabelScores {
    labels: Vec<String>,
    scores: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Columns(LabelScores),
    Batched(Vec<LabelScores>),
    Rows(Vec<LabelScore>),
    Error(ApiError),
}

#[derive(Debug, Deserialize)]
struct SummaryText {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SummaryResponse {
    Single(SummaryText),
    Batched(Vec<SummaryText>),
    Error(ApiError),
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: String,
    #[serde(default)]
    estimated_time: Option<f64>,
}

impl From<ApiError> for BackendError {
    fn from(err: ApiError) -> Self {
        match err.estimated_time {
            Some(seconds) => BackendError::Unavailable(format!(
                "{} (ready in ~{:.0}s)",
                err.error, seconds
            )),
            None => BackendError::Unavailable(err.error),
        }
    }
}

/// Parse a zero-shot response into `(label, score)` pairs
pub fn parse_zero_shot(body: &str) -> Result<Vec<(String, f64)>, BackendError> {
    let response: ZeroShotResponse = serde_json::from_str(body)
        .map_err(|e| BackendError::InvalidResponse(format!("zero-shot body: {}", e)))?;

    match response {
        ZeroShotResponse::Columns(columns) => zip_columns(columns),
        ZeroShotResponse::Batched(mut batch) => {
            if batch.len() != 1 {
                return Err(BackendError::InvalidResponse(format!(
                    "expected one classification, got {}",
                    batch.len()
                )));
            }
            zip_columns(batch.remove(0))
        }
        ZeroShotResponse::Rows(rows) => Ok(rows.into_iter().map(|r| (r.label, r.score)).collect()),
        ZeroShotResponse::Error(err) => Err(err.into()),
    }
}

fn zip_columns(columns: LabelScores) -> Result<Vec<(String, f64)>, BackendError> {
    if columns.labels.len() != columns.scores.len() {
        return Err(BackendError::InvalidResponse(format!(
            "{} labels but {} scores",
            columns.labels.len(),
            columns.scores.len()
        )));
    }
    Ok(columns.labels.into_iter().zip(columns.scores).collect())
}

/// Parse a summarization response into the summary text
pub fn parse_summary(body: &str) -> Result<String, BackendError> {
    let response: SummaryResponse = serde_json::from_str(body)
        .map_err(|e| BackendError::InvalidResponse(format!("summary body: {}", e)))?;

    match response {
        SummaryResponse::Single(summary) => Ok(summary.summary_text),
        SummaryResponse::Batched(batch) => batch
            .into_iter()
            .next()
            .map(|s| s.summary_text)
            .ok_or_else(|| BackendError::InvalidResponse("empty summary list".to_string())),
        SummaryResponse::Error(err) => Err(err.into()),
    }
}
