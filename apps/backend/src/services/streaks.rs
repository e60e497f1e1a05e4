//! Consecutive-day streak bookkeeping.

use chrono::NaiveDate;

/// Streak counters after a study action on `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_study_date: NaiveDate,
}

/// Advance the streak for a log on `today`: a second log on the same day
/// changes nothing, a log on the day after the last study extends the
/// run, anything else starts over at 1.
pub fn advance(
    current_streak: i32,
    longest_streak: i32,
    last_study_date: Option<NaiveDate>,
    today: NaiveDate,
) -> StreakUpdate {
    let current = match last_study_date {
        Some(last) if last == today => current_streak,
        Some(last) if last + chrono::Duration::days(1) == today => current_streak + 1,
        _ => 1,
    };

    StreakUpdate {
        current_streak: current,
        longest_streak: longest_streak.max(current),
        last_study_date: today,
    }
}
