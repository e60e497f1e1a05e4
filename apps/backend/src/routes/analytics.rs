//! Range-filtered analytics reads

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;
use michi_core::{default_kind, fallback_kind, filter_by_range, resolve, DateRange};

/// GET /api/analytics
///
/// An explicit `range` parameter is a manual selection and is applied
/// as-is. With no parameter the default is picked from the history size
/// and the one-shot fallback scan widens an empty named range. Read
/// failures degrade to empty datasets; the dashboard never errors on a
/// transient read.
pub async fn summary(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>> {
    let today = Utc::now().date_naive();

    let progress_rows = state
        .db
        .list_progress(auth.user_id, 60)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "progress read failed, rendering empty");
            Vec::new()
        });
    let score_rows = state
        .db
        .list_scores(auth.user_id, None, 100)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "score read failed, rendering empty");
            Vec::new()
        });

    let progress: Vec<DailyProgress> = progress_rows.iter().map(|p| p.to_api_progress()).collect();

    let (kind, bounds) = match query.range {
        Some(RangeKind::Custom) => {
            let (Some(from), Some(to)) = (query.from, query.to) else {
                return Err(ApiError::BadRequest(
                    "custom range requires from and to".to_string(),
                ));
            };
            (RangeKind::Custom, DateRange::new(from, to)?)
        }
        // Manual selection: no fallback.
        Some(kind) => (kind, resolve(kind, today, None)),
        // Fresh load: default by history size, then the one-shot fallback.
        None => {
            let mut kind = default_kind(progress.len());
            if filter_by_range(&progress, &resolve(kind, today, None)).is_empty() {
                if let Some(wider) = fallback_kind(&progress, kind, today) {
                    kind = wider;
                }
            }
            (kind, resolve(kind, today, None))
        }
    };

    let filtered_progress: Vec<DailyProgress> = filter_by_range(&progress, &bounds)
        .into_iter()
        .cloned()
        .collect();
    let totals = CategoryTotals::accumulate(&filtered_progress);
    let total_minutes = filtered_progress.iter().map(|p| p.total_minutes).sum();

    let scores: Vec<ApiTestScore> = score_rows
        .iter()
        .map(|s| s.to_api_score())
        .filter(|s| bounds.contains(s.score.date))
        .collect();

    Ok(Json(AnalyticsResponse {
        range: kind,
        from: bounds.from,
        to: bounds.to,
        progress: filtered_progress,
        scores,
        totals,
        total_minutes,
    }))
}
