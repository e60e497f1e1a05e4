//! Core types for the JLPT study tracker.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Study section tracked by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Kanji,
    Vocabulary,
    Grammar,
    Listening,
    Reading,
}

impl Section {
    /// All sections, in display order.
    pub const ALL: [Section; 5] = [
        Self::Kanji,
        Self::Vocabulary,
        Self::Grammar,
        Self::Listening,
        Self::Reading,
    ];

    /// Get the section name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kanji => "kanji",
            Self::Vocabulary => "vocabulary",
            Self::Grammar => "grammar",
            Self::Listening => "listening",
            Self::Reading => "reading",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "kanji" => Some(Self::Kanji),
            "vocabulary" => Some(Self::Vocabulary),
            "grammar" => Some(Self::Grammar),
            "listening" => Some(Self::Listening),
            "reading" => Some(Self::Reading),
            _ => None,
        }
    }

    /// Unit label shown next to logged amounts.
    pub fn unit_label(&self) -> &'static str {
        match self {
            Self::Kanji => "kanji",
            Self::Vocabulary => "words",
            Self::Grammar => "points",
            Self::Listening => "min",
            Self::Reading => "passages",
        }
    }
}

/// JLPT target level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JlptLevel {
    N5,
    N4,
    N3,
    N2,
    N1,
}

impl JlptLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::N5 => "N5",
            Self::N4 => "N4",
            Self::N3 => "N3",
            Self::N2 => "N2",
            Self::N1 => "N1",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "N5" => Some(Self::N5),
            "N4" => Some(Self::N4),
            "N3" => Some(Self::N3),
            "N2" => Some(Self::N2),
            "N1" => Some(Self::N1),
            _ => None,
        }
    }
}

/// One day of logged study activity. At most one record exists per
/// (user, date); counters only grow except when an undo restores the
/// previous state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub date: NaiveDate,
    pub kanji: u32,
    pub vocabulary: u32,
    pub grammar: u32,
    pub listening_minutes: u32,
    pub reading_passages: u32,
    pub total_minutes: u32,
}

/// Lifetime per-section sums across all of a user's daily records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub kanji: u32,
    pub vocabulary: u32,
    pub grammar: u32,
    pub listening_minutes: u32,
    pub reading_passages: u32,
}

/// Daily study targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTarget {
    pub study_minutes: u32,
    pub kanji: u32,
    pub vocabulary: u32,
    pub grammar: u32,
    pub listening_minutes: u32,
    pub reading_passages: u32,
}

impl Default for DailyTarget {
    fn default() -> Self {
        Self {
            study_minutes: 60,
            kanji: 5,
            vocabulary: 20,
            grammar: 3,
            listening_minutes: 15,
            reading_passages: 2,
        }
    }
}

/// User profile: exam goal, targets, streak counters, notification flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jlpt_level: Option<JlptLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_date: Option<NaiveDate>,
    pub daily_target: DailyTarget,
    pub current_streak: u32,
    pub longest_streak: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_study_date: Option<NaiveDate>,
    pub notification_daily_reminder: bool,
    pub notification_streak_reminder: bool,
    pub notification_exam_reminder: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            jlpt_level: None,
            exam_date: None,
            daily_target: DailyTarget::default(),
            current_streak: 0,
            longest_streak: 0,
            last_study_date: None,
            notification_daily_reminder: true,
            notification_streak_reminder: true,
            notification_exam_reminder: true,
            avatar_url: None,
        }
    }
}

impl Profile {
    /// Whole days remaining until the exam, clamped at zero.
    pub fn days_until_exam(&self, today: NaiveDate) -> Option<i64> {
        self.exam_date.map(|exam| (exam - today).num_days().max(0))
    }
}

/// An earned achievement badge. Append-only: a given badge type is
/// inserted at most once per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub badge_type: String,
    pub badge_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub earned_at: DateTime<Utc>,
}
