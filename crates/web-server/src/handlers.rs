use crate::models::{AnalyzeRequest, AnalyzeResponse, MetricsRequest, MetricsResponse};
use crate::{error::AppError, AppState};
use analytics::{compute_metrics, make_executive_summary, ExecutiveSummary};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use core_types::{CoreError, MetricSet};
use database::NewAnalysis;
use narrator::{AiSummary, AnalysisContext};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

/// # GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "service": "pyra-api", "status": "ok" }))
}

/// # GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// # POST /v1/analyze
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = payload?;
    let response = run_analysis(&state, request).await?;
    Ok(Json(response))
}

/// Runs the full pipeline: metrics, executive summary, optional AI commentary
/// and optional persistence. Only the request itself can make this fail.
pub async fn run_analysis(
    state: &AppState,
    request: AnalyzeRequest,
) -> Result<AnalyzeResponse, CoreError> {
    request.validate()?;

    let currency = request
        .currency
        .clone()
        .unwrap_or_else(|| state.settings.analysis.default_currency.clone());

    let thresholds = state.settings.thresholds;
    let metrics = compute_metrics(&request.values, &thresholds);
    let executive = make_executive_summary(&metrics);

    let context = AnalysisContext {
        company: &request.company,
        period: &request.period,
        currency: &currency,
    };
    let ai = narrate(state, &metrics, &context).await;
    let id = persist(state, &request, &context, &metrics, &executive, ai.as_ref()).await;

    tracing::info!(
        company = %request.company,
        period = %request.period,
        headline = executive.headline,
        persisted = id.is_some(),
        "Analysis completed."
    );

    Ok(AnalyzeResponse {
        id,
        thresholds,
        executive,
        ai,
        metrics,
    })
}

/// # POST /v1/metrics
/// Metrics only, no side effects.
pub async fn metrics(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MetricsRequest>, JsonRejection>,
) -> Result<Json<MetricsResponse>, AppError> {
    let Json(request) = payload?;
    let thresholds = state.settings.thresholds;
    let metrics = compute_metrics(&request.values, &thresholds);
    Ok(Json(MetricsResponse {
        metrics,
        thresholds,
    }))
}

async fn narrate(
    state: &AppState,
    metrics: &MetricSet,
    context: &AnalysisContext<'_>,
) -> Option<AiSummary> {
    let narrator = state.narrator.as_ref()?;
    match narrator.interpret(metrics, context).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!(error = %e, "AI narrative unavailable; responding without it.");
            None
        }
    }
}

async fn persist(
    state: &AppState,
    request: &AnalyzeRequest,
    context: &AnalysisContext<'_>,
    metrics: &MetricSet,
    executive: &ExecutiveSummary,
    ai: Option<&AiSummary>,
) -> Option<Uuid> {
    let store = state.store.as_ref()?;

    let record = NewAnalysis::new(
        context.company,
        context.period,
        context.currency,
        &request.values,
        metrics,
        executive,
        ai.map(|ai| ai.summary.clone()),
    );
    let result = match record {
        Ok(record) => store.save_analysis(&record).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to persist analysis; responding without an id.");
            None
        }
    }
}
