//! Progress ledger API tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL before running.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};

use common::fixtures;
use common::TestContext;

/// First log of the day creates the record with one counter seeded.
#[tokio::test]
#[ignore = "requires database"]
async fn test_first_log_creates_today_record() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let response = server
        .post("/api/progress/log")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&fixtures::log_study_request("kanji", 5))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    assert_eq!(body["progress"]["kanji"], 5);
    assert_eq!(body["progress"]["total_minutes"], 10);
    assert_eq!(body["progress"]["vocabulary"], 0);
    assert_eq!(body["progress"]["grammar"], 0);
    assert_eq!(body["progress"]["listening_minutes"], 0);
    assert_eq!(body["progress"]["reading_passages"], 0);
    assert_eq!(body["current_streak"], 1);

    ctx.cleanup_user(user_id).await;
}

/// Second log on the same day updates in place, never duplicates.
#[tokio::test]
#[ignore = "requires database"]
async fn test_same_day_log_updates_not_duplicates() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    for (section, amount) in [("kanji", 5), ("grammar", 3), ("listening", 7)] {
        let response = server
            .post("/api/progress/log")
            .add_header(
                axum::http::header::AUTHORIZATION,
                TestContext::auth_header_value(&token),
            )
            .json(&fixtures::log_study_request(section, amount))
            .await;
        response.assert_status_ok();
    }

    let response = server
        .get("/api/progress")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let records = body["progress"].as_array().unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["kanji"], 5);
    assert_eq!(records[0]["grammar"], 3);
    assert_eq!(records[0]["listening_minutes"], 7);
    // 5 kanji * 2 + 3 grammar * 5 + 7 listening * 1
    assert_eq!(records[0]["total_minutes"], 10 + 15 + 7);

    ctx.cleanup_user(user_id).await;
}

/// Vocabulary minutes round half-units up.
#[tokio::test]
#[ignore = "requires database"]
async fn test_vocabulary_time_weight() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let response = server
        .post("/api/progress/log")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&fixtures::log_study_request("vocabulary", 9))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["progress"]["total_minutes"], 5);

    ctx.cleanup_user(user_id).await;
}

/// Zero amounts are rejected before any write.
#[tokio::test]
#[ignore = "requires database"]
async fn test_zero_amount_rejected() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let response = server
        .post("/api/progress/log")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&fixtures::log_study_request("kanji", 0))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .get("/api/progress/today")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;
    let body: serde_json::Value = response.json();
    assert!(body["progress"].is_null());

    ctx.cleanup_user(user_id).await;
}

/// Undo of the first log of the day removes the record entirely.
#[tokio::test]
#[ignore = "requires database"]
async fn test_undo_of_fresh_creation_deletes_record() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    server
        .post("/api/progress/log")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&fixtures::log_study_request("reading", 2))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/progress/undo")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["undone"], true);

    let response = server
        .get("/api/progress/today")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;
    let body: serde_json::Value = response.json();
    assert!(body["progress"].is_null());

    ctx.cleanup_user(user_id).await;
}

/// Undo after a second log restores the exact prior counters, and the
/// consumed slot cannot be undone twice.
#[tokio::test]
#[ignore = "requires database"]
async fn test_undo_restores_previous_state_once() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    server
        .post("/api/progress/log")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&fixtures::log_study_request("kanji", 5))
        .await
        .assert_status_ok();

    server
        .post("/api/progress/log")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&fixtures::log_study_request("grammar", 4))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/progress/undo")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["undone"], true);

    let response = server
        .get("/api/progress/today")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["progress"]["kanji"], 5);
    assert_eq!(body["progress"]["grammar"], 0);
    assert_eq!(body["progress"]["total_minutes"], 10);

    // The slot was consumed; a second undo reverses nothing.
    let response = server
        .post("/api/progress/undo")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["undone"], false);

    ctx.cleanup_user(user_id).await;
}

/// Undo with nothing logged reports failure.
#[tokio::test]
#[ignore = "requires database"]
async fn test_undo_with_empty_slot_fails() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let response = server
        .post("/api/progress/undo")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["undone"], false);

    ctx.cleanup_user(user_id).await;
}

/// Advancing the streak to 7 awards the streak badge exactly once.
#[tokio::test]
#[ignore = "requires database"]
async fn test_streak_badge_awarded_once() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    // Simulate six consecutive prior study days.
    let yesterday = Utc::now().date_naive() - Duration::days(1);
    ctx.db
        .update_streak(user_id, 6, 6, yesterday)
        .await
        .unwrap();

    let response = server
        .post("/api/progress/log")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&fixtures::log_study_request("listening", 10))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    assert_eq!(body["current_streak"], 7);
    let new_badges = body["new_badges"].as_array().unwrap();
    assert_eq!(new_badges.len(), 1);
    assert_eq!(new_badges[0]["badge_type"], "streak_7");

    // A second evaluation with the streak still at 7 awards nothing.
    let response = server
        .post("/api/progress/log")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&fixtures::log_study_request("listening", 10))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["current_streak"], 7);
    assert!(body["new_badges"].as_array().unwrap().is_empty());

    ctx.cleanup_user(user_id).await;
}

/// Crossing a lifetime total threshold awards the category badge once.
#[tokio::test]
#[ignore = "requires database"]
async fn test_category_badge_idempotent() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let response = server
        .post("/api/progress/log")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&fixtures::log_study_request("kanji", 50))
        .await;
    let body: serde_json::Value = response.json();
    let types: Vec<&str> = body["new_badges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["badge_type"].as_str().unwrap())
        .collect();
    assert!(types.contains(&"kanji_50"));

    let response = server
        .post("/api/progress/log")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&fixtures::log_study_request("kanji", 1))
        .await;
    let body: serde_json::Value = response.json();
    assert!(body["new_badges"].as_array().unwrap().is_empty());

    ctx.cleanup_user(user_id).await;
}

/// Progress endpoints require authentication.
#[tokio::test]
#[ignore = "requires database"]
async fn test_progress_requires_auth() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .post("/api/progress/log")
        .json(&fixtures::log_study_request("kanji", 5))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
