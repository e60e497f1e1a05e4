//! Database models and API types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from michi-core
pub use michi_core::{
    Badge, CategoryTotals, DailyProgress, DailyTarget, DifficultyLevel, JlptLevel, Profile,
    RangeKind, Section, TestDetails, TestScore,
};

// === Database Entity Types ===

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub token: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Profile row in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProfile {
    pub user_id: Uuid,
    pub jlpt_level: Option<String>,
    pub exam_date: Option<NaiveDate>,
    pub daily_target_minutes: i32,
    pub daily_target_kanji: i32,
    pub daily_target_vocabulary: i32,
    pub daily_target_grammar: i32,
    pub daily_target_listening_minutes: i32,
    pub daily_target_reading_passages: i32,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_study_date: Option<NaiveDate>,
    pub notification_daily_reminder: bool,
    pub notification_streak_reminder: bool,
    pub notification_exam_reminder: bool,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbProfile {
    /// Default profile created at registration
    pub fn default_for_user(user_id: Uuid) -> Self {
        let target = DailyTarget::default();
        Self {
            user_id,
            jlpt_level: None,
            exam_date: None,
            daily_target_minutes: target.study_minutes as i32,
            daily_target_kanji: target.kanji as i32,
            daily_target_vocabulary: target.vocabulary as i32,
            daily_target_grammar: target.grammar as i32,
            daily_target_listening_minutes: target.listening_minutes as i32,
            daily_target_reading_passages: target.reading_passages as i32,
            current_streak: 0,
            longest_streak: 0,
            last_study_date: None,
            notification_daily_reminder: true,
            notification_streak_reminder: true,
            notification_exam_reminder: true,
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Convert to API profile type
    pub fn to_api_profile(&self) -> Profile {
        Profile {
            jlpt_level: self.jlpt_level.as_deref().and_then(JlptLevel::from_str),
            exam_date: self.exam_date,
            daily_target: DailyTarget {
                study_minutes: self.daily_target_minutes as u32,
                kanji: self.daily_target_kanji as u32,
                vocabulary: self.daily_target_vocabulary as u32,
                grammar: self.daily_target_grammar as u32,
                listening_minutes: self.daily_target_listening_minutes as u32,
                reading_passages: self.daily_target_reading_passages as u32,
            },
            current_streak: self.current_streak as u32,
            longest_streak: self.longest_streak as u32,
            last_study_date: self.last_study_date,
            notification_daily_reminder: self.notification_daily_reminder,
            notification_streak_reminder: self.notification_streak_reminder,
            notification_exam_reminder: self.notification_exam_reminder,
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// Daily progress row in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDailyProgress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub kanji: i32,
    pub vocabulary: i32,
    pub grammar: i32,
    pub listening_minutes: i32,
    pub reading_passages: i32,
    pub total_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbDailyProgress {
    /// Convert to API progress type
    pub fn to_api_progress(&self) -> DailyProgress {
        DailyProgress {
            date: self.date,
            kanji: self.kanji as u32,
            vocabulary: self.vocabulary as u32,
            grammar: self.grammar as u32,
            listening_minutes: self.listening_minutes as u32,
            reading_passages: self.reading_passages as u32,
            total_minutes: self.total_minutes as u32,
        }
    }
}

/// Test score row in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTestScore {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub section: String,
    pub correct: i32,
    pub total: i32,
    pub score: i32,
    pub time_taken_minutes: Option<i32>,
    pub difficulty_level: Option<String>,
    pub notes: Option<String>,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl DbTestScore {
    /// Convert to API score type
    pub fn to_api_score(&self) -> ApiTestScore {
        ApiTestScore {
            id: self.id,
            score: TestScore {
                date: self.date,
                section: Section::from_str(&self.section).unwrap_or(Section::Kanji),
                correct: self.correct as u32,
                total: self.total as u32,
                score: self.score as u32,
                time_taken_minutes: self.time_taken_minutes.map(|m| m as u32),
                difficulty_level: self
                    .difficulty_level
                    .as_deref()
                    .and_then(DifficultyLevel::from_str),
                notes: self.notes.clone(),
                details: self
                    .details
                    .clone()
                    .and_then(|v| serde_json::from_value(v).ok()),
            },
            created_at: self.created_at,
        }
    }
}

/// Test score with its row id, for listing and deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTestScore {
    pub id: Uuid,
    #[serde(flatten)]
    pub score: TestScore,
    pub created_at: DateTime<Utc>,
}

/// Badge row in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBadge {
    pub id: Uuid,
    pub user_id: Uuid,
    pub badge_type: String,
    pub badge_name: String,
    pub description: Option<String>,
    pub earned_at: DateTime<Utc>,
}

impl DbBadge {
    /// Convert to API badge type
    pub fn to_api_badge(&self) -> Badge {
        Badge {
            badge_type: self.badge_type.clone(),
            badge_name: self.badge_name.clone(),
            description: self.description.clone(),
            earned_at: self.earned_at,
        }
    }
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub display_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountStatusResponse {
    pub user_id: Uuid,
    pub last_seen_at: DateTime<Utc>,
}

// Progress types

#[derive(Debug, Serialize, Deserialize)]
pub struct LogStudyRequest {
    pub section: Section,
    pub amount: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogStudyResponse {
    pub progress: DailyProgress,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Badges newly awarded by this log, for the caller to announce.
    pub new_badges: Vec<Badge>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub progress: Option<DailyProgress>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressListQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressListResponse {
    pub progress: Vec<DailyProgress>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UndoResponse {
    pub undone: bool,
}

// Score types

#[derive(Debug, Serialize, Deserialize)]
pub struct LogTestRequest {
    pub section: Section,
    pub correct: u32,
    pub total: u32,
    pub time_taken_minutes: Option<u32>,
    pub difficulty_level: Option<DifficultyLevel>,
    pub notes: Option<String>,
    pub details: Option<TestDetails>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreListQuery {
    pub section: Option<Section>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreListResponse {
    pub scores: Vec<ApiTestScore>,
}

// Profile types

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub jlpt_level: Option<JlptLevel>,
    pub exam_date: Option<NaiveDate>,
    pub daily_target_minutes: Option<u32>,
    pub daily_target_kanji: Option<u32>,
    pub daily_target_vocabulary: Option<u32>,
    pub daily_target_grammar: Option<u32>,
    pub daily_target_listening_minutes: Option<u32>,
    pub daily_target_reading_passages: Option<u32>,
    pub notification_daily_reminder: Option<bool>,
    pub notification_streak_reminder: Option<bool>,
    pub notification_exam_reminder: Option<bool>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BadgeListResponse {
    pub badges: Vec<Badge>,
}

// Analytics types

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyticsQuery {
    pub range: Option<RangeKind>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    /// Range kind actually applied, after any automatic fallback.
    pub range: RangeKind,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub progress: Vec<DailyProgress>,
    pub scores: Vec<ApiTestScore>,
    pub totals: CategoryTotals,
    pub total_minutes: u32,
}
