//! PostgreSQL database operations

use chrono::NaiveDate;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use michi_core::{Milestone, Section, TestScore};

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Internal(format!("migration failed: {e}")))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    /// Create a new user with generated token and a default profile
    pub async fn create_user(&self, display_name: Option<&str>) -> Result<User> {
        let token = Uuid::new_v4().to_string();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (token, display_name)
            VALUES ($1, $2)
            RETURNING id, token, display_name, created_at, last_seen_at
            "#,
        )
        .bind(&token)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await?;

        // Create default profile for the user
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id)
            VALUES ($1)
            "#,
        )
        .bind(user.id)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get user by token
    pub async fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, token, display_name, created_at, last_seen_at
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user last_seen_at timestamp
    pub async fn update_last_seen(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Profile Repository ===

    /// Get a user's profile, defaulting if the row is missing
    pub async fn get_profile(&self, user_id: Uuid) -> Result<DbProfile> {
        let profile = sqlx::query_as::<_, DbProfile>(
            r#"
            SELECT user_id, jlpt_level, exam_date, daily_target_minutes, daily_target_kanji,
                   daily_target_vocabulary, daily_target_grammar, daily_target_listening_minutes,
                   daily_target_reading_passages, current_streak, longest_streak, last_study_date,
                   notification_daily_reminder, notification_streak_reminder,
                   notification_exam_reminder, avatar_url, created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .unwrap_or_else(|| DbProfile::default_for_user(user_id));

        Ok(profile)
    }

    /// Upsert a user's profile
    pub async fn upsert_profile(&self, user_id: Uuid, profile: &DbProfile) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, jlpt_level, exam_date, daily_target_minutes,
                                  daily_target_kanji, daily_target_vocabulary, daily_target_grammar,
                                  daily_target_listening_minutes, daily_target_reading_passages,
                                  current_streak, longest_streak, last_study_date,
                                  notification_daily_reminder, notification_streak_reminder,
                                  notification_exam_reminder, avatar_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ON CONFLICT (user_id) DO UPDATE SET
                jlpt_level = EXCLUDED.jlpt_level,
                exam_date = EXCLUDED.exam_date,
                daily_target_minutes = EXCLUDED.daily_target_minutes,
                daily_target_kanji = EXCLUDED.daily_target_kanji,
                daily_target_vocabulary = EXCLUDED.daily_target_vocabulary,
                daily_target_grammar = EXCLUDED.daily_target_grammar,
                daily_target_listening_minutes = EXCLUDED.daily_target_listening_minutes,
                daily_target_reading_passages = EXCLUDED.daily_target_reading_passages,
                current_streak = EXCLUDED.current_streak,
                longest_streak = EXCLUDED.longest_streak,
                last_study_date = EXCLUDED.last_study_date,
                notification_daily_reminder = EXCLUDED.notification_daily_reminder,
                notification_streak_reminder = EXCLUDED.notification_streak_reminder,
                notification_exam_reminder = EXCLUDED.notification_exam_reminder,
                avatar_url = EXCLUDED.avatar_url,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(&profile.jlpt_level)
        .bind(profile.exam_date)
        .bind(profile.daily_target_minutes)
        .bind(profile.daily_target_kanji)
        .bind(profile.daily_target_vocabulary)
        .bind(profile.daily_target_grammar)
        .bind(profile.daily_target_listening_minutes)
        .bind(profile.daily_target_reading_passages)
        .bind(profile.current_streak)
        .bind(profile.longest_streak)
        .bind(profile.last_study_date)
        .bind(profile.notification_daily_reminder)
        .bind(profile.notification_streak_reminder)
        .bind(profile.notification_exam_reminder)
        .bind(&profile.avatar_url)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Update only the streak counters on a profile
    pub async fn update_streak(
        &self,
        user_id: Uuid,
        current_streak: i32,
        longest_streak: i32,
        last_study_date: NaiveDate,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE profiles
            SET current_streak = $2, longest_streak = $3, last_study_date = $4, updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(current_streak)
        .bind(longest_streak)
        .bind(last_study_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Progress Repository ===

    /// Get the progress record for a specific date
    pub async fn get_progress_on(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<DbDailyProgress>> {
        let progress = sqlx::query_as::<_, DbDailyProgress>(
            r#"
            SELECT id, user_id, date, kanji, vocabulary, grammar, listening_minutes,
                   reading_passages, total_minutes, created_at, updated_at
            FROM study_progress
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(progress)
    }

    /// Get recent progress records, newest first
    pub async fn list_progress(&self, user_id: Uuid, limit: i64) -> Result<Vec<DbDailyProgress>> {
        let rows = sqlx::query_as::<_, DbDailyProgress>(
            r#"
            SELECT id, user_id, date, kanji, vocabulary, grammar, listening_minutes,
                   reading_passages, total_minutes, created_at, updated_at
            FROM study_progress
            WHERE user_id = $1
            ORDER BY date DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Atomically add a study increment to the day's record, creating it
    /// on first log. A single statement, so overlapping in-flight logs
    /// against the same day converge to the correct cumulative counters.
    pub async fn increment_progress(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        section: Section,
        amount: u32,
    ) -> Result<DbDailyProgress> {
        // The increment row is exactly a single-section seed; the
        // section -> counter mapping stays in michi-core.
        let delta = DailyProgress::seed(date, section, amount);

        let progress = sqlx::query_as::<_, DbDailyProgress>(
            r#"
            INSERT INTO study_progress (user_id, date, kanji, vocabulary, grammar,
                                        listening_minutes, reading_passages, total_minutes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id, date) DO UPDATE SET
                kanji = study_progress.kanji + EXCLUDED.kanji,
                vocabulary = study_progress.vocabulary + EXCLUDED.vocabulary,
                grammar = study_progress.grammar + EXCLUDED.grammar,
                listening_minutes = study_progress.listening_minutes + EXCLUDED.listening_minutes,
                reading_passages = study_progress.reading_passages + EXCLUDED.reading_passages,
                total_minutes = study_progress.total_minutes + EXCLUDED.total_minutes,
                updated_at = NOW()
            RETURNING id, user_id, date, kanji, vocabulary, grammar, listening_minutes,
                      reading_passages, total_minutes, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(delta.kanji as i32)
        .bind(delta.vocabulary as i32)
        .bind(delta.grammar as i32)
        .bind(delta.listening_minutes as i32)
        .bind(delta.reading_passages as i32)
        .bind(delta.total_minutes as i32)
        .fetch_one(&self.pool)
        .await?;

        Ok(progress)
    }

    /// Overwrite a day's counters with a previously captured state (undo)
    pub async fn restore_progress(
        &self,
        user_id: Uuid,
        previous: &DailyProgress,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE study_progress
            SET kanji = $3, vocabulary = $4, grammar = $5, listening_minutes = $6,
                reading_passages = $7, total_minutes = $8, updated_at = NOW()
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id)
        .bind(previous.date)
        .bind(previous.kanji as i32)
        .bind(previous.vocabulary as i32)
        .bind(previous.grammar as i32)
        .bind(previous.listening_minutes as i32)
        .bind(previous.reading_passages as i32)
        .bind(previous.total_minutes as i32)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a day's record entirely (undo of a fresh creation)
    pub async fn delete_progress(&self, user_id: Uuid, date: NaiveDate) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM study_progress
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id)
        .bind(date)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lifetime per-section totals across all progress records
    pub async fn category_totals(&self, user_id: Uuid) -> Result<CategoryTotals> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(kanji), 0)::BIGINT as kanji,
                   COALESCE(SUM(vocabulary), 0)::BIGINT as vocabulary,
                   COALESCE(SUM(grammar), 0)::BIGINT as grammar,
                   COALESCE(SUM(listening_minutes), 0)::BIGINT as listening_minutes,
                   COALESCE(SUM(reading_passages), 0)::BIGINT as reading_passages
            FROM study_progress
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(CategoryTotals {
            kanji: row.get::<i64, _>("kanji") as u32,
            vocabulary: row.get::<i64, _>("vocabulary") as u32,
            grammar: row.get::<i64, _>("grammar") as u32,
            listening_minutes: row.get::<i64, _>("listening_minutes") as u32,
            reading_passages: row.get::<i64, _>("reading_passages") as u32,
        })
    }

    // === Badge Repository ===

    /// Insert a badge if not already awarded. Returns whether a row was
    /// inserted; the (user_id, badge_type) constraint is the final word.
    pub async fn insert_badge(&self, user_id: Uuid, milestone: &Milestone) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO badges (user_id, badge_type, badge_name, description)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, badge_type) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(milestone.badge_type)
        .bind(milestone.name)
        .bind(milestone.description)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All badges for a user, newest first
    pub async fn list_badges(&self, user_id: Uuid) -> Result<Vec<DbBadge>> {
        let badges = sqlx::query_as::<_, DbBadge>(
            r#"
            SELECT id, user_id, badge_type, badge_name, description, earned_at
            FROM badges
            WHERE user_id = $1
            ORDER BY earned_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(badges)
    }

    // === Test Score Repository ===

    /// Insert a validated test score
    pub async fn insert_score(&self, user_id: Uuid, score: &TestScore) -> Result<DbTestScore> {
        let details = score
            .details
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ApiError::Internal(format!("details serialization failed: {e}")))?;

        let row = sqlx::query_as::<_, DbTestScore>(
            r#"
            INSERT INTO test_scores (user_id, date, section, correct, total, score,
                                     time_taken_minutes, difficulty_level, notes, details)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, user_id, date, section, correct, total, score,
                      time_taken_minutes, difficulty_level, notes, details, created_at
            "#,
        )
        .bind(user_id)
        .bind(score.date)
        .bind(score.section.as_str())
        .bind(score.correct as i32)
        .bind(score.total as i32)
        .bind(score.score as i32)
        .bind(score.time_taken_minutes.map(|m| m as i32))
        .bind(score.difficulty_level.map(|d| d.as_str()))
        .bind(&score.notes)
        .bind(details)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Recent scores, newest first, optionally filtered by section
    pub async fn list_scores(
        &self,
        user_id: Uuid,
        section: Option<Section>,
        limit: i64,
    ) -> Result<Vec<DbTestScore>> {
        let scores = match section {
            Some(section) => {
                sqlx::query_as::<_, DbTestScore>(
                    r#"
                    SELECT id, user_id, date, section, correct, total, score,
                           time_taken_minutes, difficulty_level, notes, details, created_at
                    FROM test_scores
                    WHERE user_id = $1 AND section = $2
                    ORDER BY date DESC, created_at DESC
                    LIMIT $3
                    "#,
                )
                .bind(user_id)
                .bind(section.as_str())
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DbTestScore>(
                    r#"
                    SELECT id, user_id, date, section, correct, total, score,
                           time_taken_minutes, difficulty_level, notes, details, created_at
                    FROM test_scores
                    WHERE user_id = $1
                    ORDER BY date DESC, created_at DESC
                    LIMIT $2
                    "#,
                )
                .bind(user_id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(scores)
    }

    /// Delete a score owned by the user
    pub async fn delete_score(&self, user_id: Uuid, score_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM test_scores
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(score_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
