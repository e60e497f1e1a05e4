//! Test score endpoints

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/scores
pub async fn log(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<LogTestRequest>,
) -> Result<Json<ApiTestScore>> {
    let today = Utc::now().date_naive();

    // Validation rejects the entry before anything reaches the store.
    let mut score = TestScore::new(today, payload.section, payload.correct, payload.total)?;
    score.time_taken_minutes = payload.time_taken_minutes;
    score.difficulty_level = payload.difficulty_level;
    score.notes = payload.notes;
    score.details = payload.details;

    let row = state.db.insert_score(auth.user_id, &score).await?;

    Ok(Json(row.to_api_score()))
}

/// GET /api/scores
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<ScoreListQuery>,
) -> Result<Json<ScoreListResponse>> {
    let limit = query.limit.unwrap_or(100).clamp(1, 500);
    let scores = state
        .db
        .list_scores(auth.user_id, query.section, limit)
        .await?
        .iter()
        .map(|s| s.to_api_score())
        .collect();

    Ok(Json(ScoreListResponse { scores }))
}

/// DELETE /api/scores/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(score_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let deleted = state.db.delete_score(auth.user_id, score_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("score {score_id}")));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
