//! Common test utilities and fixtures for integration tests.
//!
//! # Requirements
//! Integration tests require a PostgreSQL database (set DATABASE_URL).

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use uuid::Uuid;

use michi_backend::db::Database;
use michi_backend::{build_router, AppState, UndoSlots};

/// Test context containing database connection and test server.
///
/// Use this to set up integration tests with a real database connection.
/// Requires DATABASE_URL environment variable to be set.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations().await.expect("Failed to run migrations");

        let db = Arc::new(db);

        let state = AppState {
            db: db.clone(),
            undo: Arc::new(UndoSlots::default()),
        };

        let app = build_router(state);

        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create a test user and return its ID and token.
    pub async fn create_test_user(&self, name: Option<&str>) -> (Uuid, String) {
        let user = self
            .db
            .create_user(name)
            .await
            .expect("Failed to create test user");
        (user.id, user.token)
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Clean up test data for a user.
    ///
    /// Call this after tests to remove test data.
    pub async fn cleanup_user(&self, user_id: Uuid) {
        // Delete in order due to foreign keys
        let _ = sqlx::query("DELETE FROM badges WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM test_scores WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM study_progress WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;
    }
}
