use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{AssessmentRecord, PersonalityProfile},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SubmitAssessmentRequest {
    pub user_id: Uuid,
    /// Selected answer per question, in wizard order
    pub answers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub personality_type: String,
    pub strengths: Vec<String>,
    pub areas_for_growth: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AssessmentRecord> for AssessmentResponse {
    fn from(record: AssessmentRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            personality_type: record.personality_type,
            strengths: record.strengths,
            areas_for_growth: record.areas_for_growth,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub personality_type: String,
    pub strengths: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PersonalityProfile> for ProfileResponse {
    fn from(profile: PersonalityProfile) -> Self {
        Self {
            user_id: profile.user_id,
            personality_type: profile.personality_type,
            strengths: profile.strengths,
            created_at: profile.created_at,
        }
    }
}

/// Submit a completed personality assessment
pub async fn submit(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SubmitAssessmentRequest>,
) -> AppResult<(StatusCode, Json<AssessmentResponse>)> {
    tracing::info!(
        request_id = %request_id,
        user_id = %request.user_id,
        answers = request.answers.len(),
        "Processing assessment submission"
    );

    let record = state
        .assessments
        .submit(request.user_id, request.answers)
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Latest personality profile for a user
pub async fn profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ProfileResponse>> {
    let profile = state
        .assessments
        .latest_profile(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no assessment found for user {}", user_id)))?;

    Ok(Json(profile.into()))
}
