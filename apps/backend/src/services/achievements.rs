//! Badge evaluation against the milestone table.

use uuid::Uuid;

use crate::db::Database;
use crate::error::Result;
use crate::models::Badge;
use michi_core::CategoryTotals;

/// Evaluate all milestones and persist any that are newly satisfied.
///
/// Runs after every successful log; re-running with the same inputs
/// awards nothing new. A failed insert for one milestone (e.g. a race
/// with another session crossing the same threshold) is logged and
/// skipped so the remaining milestones still get evaluated; the
/// (user_id, badge_type) uniqueness constraint keeps the set duplicate
/// free either way. Returns the badges actually inserted by this call.
pub async fn evaluate_and_award(
    db: &Database,
    user_id: Uuid,
    current_streak: u32,
    totals: &CategoryTotals,
) -> Result<Vec<Badge>> {
    let existing = db.list_badges(user_id).await?;
    let existing_types: Vec<&str> = existing.iter().map(|b| b.badge_type.as_str()).collect();

    let mut awarded = Vec::new();
    for milestone in michi_core::newly_earned(current_streak, totals, existing_types) {
        match db.insert_badge(user_id, milestone).await {
            Ok(true) => {
                tracing::info!(badge_type = milestone.badge_type, "badge earned");
                awarded.push(milestone);
            }
            Ok(false) => {
                // Another session got there first; nothing to announce.
            }
            Err(e) => {
                tracing::warn!(badge_type = milestone.badge_type, error = %e, "badge insert failed");
            }
        }
    }

    if awarded.is_empty() {
        return Ok(Vec::new());
    }

    // Re-read so earned_at timestamps come from the store.
    let badges = db.list_badges(user_id).await?;
    Ok(badges
        .iter()
        .filter(|b| awarded.iter().any(|m| m.badge_type == b.badge_type))
        .map(|b| b.to_api_badge())
        .collect())
}
