//! Profile and badge endpoints

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/profile
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<Profile>> {
    let profile = state.db.get_profile(auth.user_id).await?;
    Ok(Json(profile.to_api_profile()))
}

/// PUT /api/profile
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>> {
    // Get current profile
    let mut current = state.db.get_profile(auth.user_id).await?;

    // Apply updates
    if let Some(level) = request.jlpt_level {
        current.jlpt_level = Some(level.as_str().to_string());
    }
    if let Some(exam_date) = request.exam_date {
        current.exam_date = Some(exam_date);
    }
    if let Some(minutes) = request.daily_target_minutes {
        current.daily_target_minutes = minutes as i32;
    }
    if let Some(kanji) = request.daily_target_kanji {
        current.daily_target_kanji = kanji as i32;
    }
    if let Some(vocabulary) = request.daily_target_vocabulary {
        current.daily_target_vocabulary = vocabulary as i32;
    }
    if let Some(grammar) = request.daily_target_grammar {
        current.daily_target_grammar = grammar as i32;
    }
    if let Some(listening) = request.daily_target_listening_minutes {
        current.daily_target_listening_minutes = listening as i32;
    }
    if let Some(reading) = request.daily_target_reading_passages {
        current.daily_target_reading_passages = reading as i32;
    }
    if let Some(flag) = request.notification_daily_reminder {
        current.notification_daily_reminder = flag;
    }
    if let Some(flag) = request.notification_streak_reminder {
        current.notification_streak_reminder = flag;
    }
    if let Some(flag) = request.notification_exam_reminder {
        current.notification_exam_reminder = flag;
    }
    if let Some(avatar_url) = request.avatar_url {
        current.avatar_url = Some(avatar_url);
    }

    // Save
    state.db.upsert_profile(auth.user_id, &current).await?;

    Ok(Json(current.to_api_profile()))
}

/// GET /api/badges
pub async fn badges(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<BadgeListResponse>> {
    let badges = state
        .db
        .list_badges(auth.user_id)
        .await?
        .iter()
        .map(|b| b.to_api_badge())
        .collect();

    Ok(Json(BadgeListResponse { badges }))
}
