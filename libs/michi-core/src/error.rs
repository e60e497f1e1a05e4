//! Error types for michi-core.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Validation and state errors, rejected before anything is persisted.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("study amount must be at least 1, got {0}")]
    InvalidAmount(i64),

    #[error("test total must be greater than zero")]
    EmptyTest,

    #[error("correct answers ({correct}) exceed total questions ({total})")]
    ScoreOutOfRange { correct: u32, total: u32 },

    #[error("custom range start {from} is after end {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}
