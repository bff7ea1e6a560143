use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::AppResult, middleware::RequestId, models::CoachingKind, routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CoachingRequest {
    /// Free-form context (recent logs, goals, mood) forwarded to the gateway
    pub user_context: Value,
    pub recommendation_type: CoachingKind,
}

#[derive(Debug, Serialize)]
pub struct CoachingResponse {
    pub recommendations: String,
}

/// Handler for the coaching-recommendation proxy
///
/// Unlike the assessment path there is no default fallback: a gateway
/// failure surfaces as a JSON error body.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<CoachingRequest>,
) -> AppResult<Json<CoachingResponse>> {
    tracing::info!(
        request_id = %request_id,
        kind = ?request.recommendation_type,
        "Processing coaching recommendation request"
    );

    let recommendations = state
        .gateway
        .coaching_recommendations(&request.user_context, request.recommendation_type)
        .await?;

    Ok(Json(CoachingResponse { recommendations }))
}
