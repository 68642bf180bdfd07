//! API handlers for the audit server
//!
//! Provides REST endpoints for:
//! - Contract analysis
//! - Label taxonomy listing

use audit_engine::{taxonomy::LabelTaxonomy, NegotiationAdvisor};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shared_types::AuditReport;
use tracing::info;

use crate::error::ServerError;
use crate::state::AppState;

/// Build the API router over shared state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/analyze", post(handle_analyze))
        .route("/api/taxonomy", get(handle_taxonomy))
        .with_state(state)
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub backends_ready: bool,
}

/// Handler: GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "audit-api",
        version: env!("CARGO_PKG_VERSION"),
        backends_ready: state.backends_ready(),
    })
}

/// Analysis request body
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    /// Extracted contract text
    pub text: String,
}

/// Handler: POST /api/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AuditReport>, ServerError> {
    let Json(req) = body?;
    info!("Analyze request: {} chars", req.text.chars().count());
    if req.text.trim().is_empty() {
        return Err(ServerError::ExtractionEmpty);
    }

    let engine = state.engine().await?;
    let report = engine.analyze(&req.text).await?;

    Ok(Json(report))
}

/// One taxonomy entry
#[derive(Serialize)]
pub struct LabelInfo {
    pub label: &'static str,
    pub risk: bool,
    /// Negotiation tip, for risk labels
    pub tip: Option<&'static str>,
}

/// Taxonomy response
#[derive(Serialize)]
pub struct TaxonomyResponse {
    pub success: bool,
    pub labels: Vec<LabelInfo>,
    pub risk_threshold: f64,
    pub safe_threshold: f64,
}

/// Handler: GET /api/taxonomy
pub async fn handle_taxonomy(State(state): State<AppState>) -> Json<TaxonomyResponse> {
    let advisor = NegotiationAdvisor::new();
    let labels = LabelTaxonomy
        .labels()
        .iter()
        .map(|label| LabelInfo {
            label: label.as_str(),
            risk: label.is_risk(),
            tip: label.is_risk().then(|| advisor.tip(*label)),
        })
        .collect();

    Json(TaxonomyResponse {
        success: true,
        labels,
        risk_threshold: state.config().risk_threshold,
        safe_threshold: state.config().safe_threshold,
    })
}
