//! Test fixtures and factory functions for creating test data.

use serde_json::json;

/// Create a log study request body.
pub fn log_study_request(section: &str, amount: u32) -> serde_json::Value {
    json!({ "section": section, "amount": amount })
}

/// Create a register request body.
pub fn register_request(name: Option<&str>) -> serde_json::Value {
    match name {
        Some(n) => json!({ "display_name": n }),
        None => json!({}),
    }
}

/// Create a log test score request body.
pub fn log_test_request(section: &str, correct: u32, total: u32) -> serde_json::Value {
    json!({ "section": section, "correct": correct, "total": total })
}

/// Create a listening test request with a structured details payload.
pub fn listening_test_request(correct: u32, total: u32) -> serde_json::Value {
    json!({
        "section": "listening",
        "correct": correct,
        "total": total,
        "time_taken_minutes": 20,
        "difficulty_level": "exam",
        "details": {
            "audioType": "exam-style",
            "timeTakenMinutes": 20,
            "difficultyLevel": "exam"
        }
    })
}

/// Create an update profile request body.
pub fn update_profile_request(level: Option<&str>, target_kanji: Option<u32>) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    if let Some(l) = level {
        obj.insert("jlpt_level".to_string(), json!(l));
    }
    if let Some(k) = target_kanji {
        obj.insert("daily_target_kanji".to_string(), json!(k));
    }
    serde_json::Value::Object(obj)
}
