//! Progress ledger endpoints

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::{achievements, streaks};
use crate::AppState;
use michi_core::{CoreError, UndoRecord};

/// POST /api/progress/log
///
/// One logical operation, in strict order: capture the undo baseline,
/// apply the write, re-read, recompute the streak, re-evaluate badges.
pub async fn log(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<LogStudyRequest>,
) -> Result<Json<LogStudyResponse>> {
    if payload.amount == 0 {
        return Err(CoreError::InvalidAmount(0).into());
    }

    let now = Utc::now();
    let today = now.date_naive();

    // Capture the pre-write state for undo (None when this log creates
    // the day's record).
    let previous = state
        .db
        .get_progress_on(auth.user_id, today)
        .await?
        .map(|p| p.to_api_progress());

    // Single-statement increment; concurrent logs against the same day
    // both land.
    let updated = state
        .db
        .increment_progress(auth.user_id, today, payload.section, payload.amount)
        .await?;

    state.undo.arm(
        auth.user_id,
        UndoRecord {
            section: payload.section,
            amount: payload.amount,
            previous,
            timestamp: now,
        },
    );

    // Streak bookkeeping on the profile.
    let profile = state.db.get_profile(auth.user_id).await?;
    let streak = streaks::advance(
        profile.current_streak,
        profile.longest_streak,
        profile.last_study_date,
        today,
    );
    state
        .db
        .update_streak(
            auth.user_id,
            streak.current_streak,
            streak.longest_streak,
            streak.last_study_date,
        )
        .await?;

    // Badge evaluation observes the freshly written state.
    let totals = state.db.category_totals(auth.user_id).await?;
    let new_badges = achievements::evaluate_and_award(
        &state.db,
        auth.user_id,
        streak.current_streak as u32,
        &totals,
    )
    .await?;

    Ok(Json(LogStudyResponse {
        progress: updated.to_api_progress(),
        current_streak: streak.current_streak as u32,
        longest_streak: streak.longest_streak as u32,
        new_badges,
    }))
}

/// GET /api/progress/today
pub async fn today(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<TodayResponse>> {
    let today = Utc::now().date_naive();
    let progress = state
        .db
        .get_progress_on(auth.user_id, today)
        .await?
        .map(|p| p.to_api_progress());

    Ok(Json(TodayResponse { progress }))
}

/// GET /api/progress
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<ProgressListQuery>,
) -> Result<Json<ProgressListResponse>> {
    let limit = query.limit.unwrap_or(60).clamp(1, 365);
    let progress = state
        .db
        .list_progress(auth.user_id, limit)
        .await?
        .iter()
        .map(|p| p.to_api_progress())
        .collect();

    Ok(Json(ProgressListResponse { progress }))
}

/// POST /api/progress/undo
///
/// Reverses the last log if its slot is still within the undo window:
/// restores the captured previous state, or deletes the day's record
/// when the log created it. Expired or empty slots report failure
/// without touching anything.
pub async fn undo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<UndoResponse>> {
    let now = Utc::now();

    let Some(record) = state.undo.fresh(auth.user_id, now) else {
        return Ok(Json(UndoResponse { undone: false }));
    };

    // The compensating action targets the day the log landed on, which
    // can differ from today when the undo crosses midnight.
    let undone = match record.previous {
        Some(previous) => state.db.restore_progress(auth.user_id, &previous).await?,
        None => {
            let log_date = record.timestamp.date_naive();
            state.db.delete_progress(auth.user_id, log_date).await?
        }
    };

    // Consume the slot only after the compensating write landed.
    if undone {
        state.undo.disarm(auth.user_id);
    }

    Ok(Json(UndoResponse { undone }))
}
