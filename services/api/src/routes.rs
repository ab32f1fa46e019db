use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use maintenance_advisor::criteria::CriteriaSet;
use maintenance_advisor::error::AppError;
use maintenance_advisor::ranking::{DecisionTrace, RankedResult, RankingEngine};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationRequest {
    pub(crate) category: String,
    #[serde(default)]
    pub(crate) top_k: Option<usize>,
    #[serde(default)]
    pub(crate) include_trace: bool,
    /// Classifier input supplied by the caller, echoed back unchanged.
    #[serde(default)]
    pub(crate) vehicle: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecommendationResponse {
    pub(crate) status: &'static str,
    pub(crate) requested_category: String,
    pub(crate) category: String,
    pub(crate) fallback_applied: bool,
    pub(crate) evaluated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) vehicle: Option<serde_json::Value>,
    pub(crate) recommendations: Vec<RankedResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) trace: Option<DecisionTrace>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CategoryEntry {
    pub(crate) category: String,
    pub(crate) alternatives: usize,
    pub(crate) fallback: bool,
}

pub(crate) fn advisor_routes(engine: Arc<RankingEngine>) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/criteria", get(criteria_endpoint))
        .route("/api/v1/categories", get(categories_endpoint))
        .route("/api/v1/recommendations", post(recommendations_endpoint))
        .with_state(engine)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn criteria_endpoint(
    State(engine): State<Arc<RankingEngine>>,
) -> Json<CriteriaSet> {
    Json(engine.criteria().clone())
}

pub(crate) async fn categories_endpoint(
    State(engine): State<Arc<RankingEngine>>,
) -> Json<Vec<CategoryEntry>> {
    let catalog = engine.catalog();
    let entries = catalog
        .categories()
        .map(|(category, alternatives)| CategoryEntry {
            category: category.to_string(),
            alternatives: alternatives.len(),
            fallback: catalog.fallback() == Some(category),
        })
        .collect();
    Json(entries)
}

pub(crate) async fn recommendations_endpoint(
    State(engine): State<Arc<RankingEngine>>,
    Json(payload): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let RecommendationRequest {
        category,
        top_k,
        include_trace,
        vehicle,
    } = payload;

    let requested_category = category.trim().to_string();
    let ranking = engine.rank(&requested_category)?;

    let recommendations = match top_k {
        Some(k) => ranking.top(k).to_vec(),
        None => ranking.results.clone(),
    };
    info!(
        category = %ranking.category,
        returned = recommendations.len(),
        "recommendations served"
    );

    Ok(Json(RecommendationResponse {
        status: "ok",
        requested_category,
        category: ranking.category,
        fallback_applied: ranking.fallback_applied,
        evaluated_at: Utc::now(),
        vehicle,
        recommendations,
        trace: if include_trace { ranking.trace } else { None },
    }))
}
