use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecommendParams, RecommendationResponse, UserId},
};

use super::AppState;

/// Parses the raw `user_id` query value
pub fn parse_user_id(raw: Option<&str>) -> AppResult<UserId> {
    let raw = raw.ok_or_else(|| {
        AppError::InvalidInput("Missing required query parameter: user_id".to_string())
    })?;
    raw.trim().parse::<UserId>().map_err(|_| {
        AppError::InvalidInput(format!("Invalid user_id '{}': expected an integer", raw))
    })
}

/// Liveness probe, with a summary of the fitted model when one is loaded
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "model": state.model_summary.as_deref(),
    }))
}

/// Top recommendations for the user named in the query string
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<RecommendationResponse>> {
    let params = RecommendParams::from(pairs);
    let user_id = parse_user_id(params.user_id.as_deref())?;

    if !state.users.user_exists(user_id) {
        tracing::info!(request_id = %request_id, user_id, "Unknown user");
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let recommendations = state.recommender.recommend(user_id)?;

    tracing::info!(
        request_id = %request_id,
        user_id,
        returned = recommendations.len(),
        "Recommendations served"
    );

    Ok(Json(RecommendationResponse {
        user_id,
        recommendations,
    }))
}
