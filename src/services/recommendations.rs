use crate::{
    error::{AppError, AppResult},
    models::{RecommendationResponse, RecommendedTitle},
    services::{context::RecommenderContext, platforms, recommender},
};

/// Recommends titles similar to `query` and ranks platforms by how many of
/// them they carry
///
/// The ranking lists every platform, best first; the raw tally is returned
/// alongside it for display.
pub fn get_recommendations(
    context: &RecommenderContext,
    query: &str,
) -> AppResult<RecommendationResponse> {
    if query.trim().is_empty() {
        return Err(AppError::InvalidInput("title must not be empty".to_string()));
    }

    let query_row = context.row_of(query)?;
    let neighbors = recommender::recommend_scored(query, context)?;

    let records = neighbors
        .iter()
        .map(|n| {
            context.catalog().get(n.row).ok_or_else(|| {
                AppError::InvariantViolation(format!("index row {} has no catalog entry", n.row))
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    // rows are already resolved, so same-titled movies and shows vote separately
    let tally = platforms::tally_records(records.iter().copied());

    let recommendations = neighbors
        .iter()
        .zip(&records)
        .map(|(neighbor, record)| RecommendedTitle {
            title: record.title.clone(),
            title_type: record.title_type.clone(),
            score: neighbor.score,
            platforms: record.platforms.platforms(),
        })
        .collect();

    let query_title = context
        .catalog()
        .get(query_row)
        .map(|r| r.title.clone())
        .unwrap_or_else(|| query.to_string());

    Ok(RecommendationResponse {
        query: query_title,
        recommendations,
        ranking: tally.ranked().iter().map(|p| p.to_string()).collect(),
        tally,
    })
}
