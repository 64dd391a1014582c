use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{IndexStats, RecommendationRequest, RecommendationResponse, TitleSummary},
    services::recommendations,
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    q: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Lists catalog titles in index order, optionally filtered by substring
pub async fn list_titles(
    State(state): State<AppState>,
    Query(params): Query<TitleQuery>,
) -> Json<Vec<TitleSummary>> {
    let context = state.current().await;
    let needle = params
        .q
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let titles = context
        .catalog()
        .records()
        .iter()
        .filter(|record| match &needle {
            Some(needle) => record.title.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .map(TitleSummary::from)
        .collect();

    Json(titles)
}

/// Recommends similar titles and ranks platforms for them
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        title = %request.title,
        "Processing recommendation request"
    );

    let context = state.current().await;
    let response = recommendations::get_recommendations(&context, &request.title)?;

    tracing::info!(
        request_id = %request_id,
        recommended = response.recommendations.len(),
        top_platform = response.ranking.first().map(String::as_str).unwrap_or(""),
        "Recommendation completed"
    );

    Ok(Json(response))
}

/// Statistics about the index currently serving requests
pub async fn index_stats(State(state): State<AppState>) -> Json<IndexStats> {
    let context = state.current().await;
    Json(context.stats().clone())
}

/// Rebuilds the index from the catalog sources
pub async fn reload(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<IndexStats>> {
    tracing::info!(request_id = %request_id, "Reloading catalogs");
    let stats = state.reload().await?;
    Ok(Json(stats))
}
