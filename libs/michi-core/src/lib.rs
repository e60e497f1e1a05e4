//! Core study-tracking library shared by the michi applications.
//!
//! Provides:
//! - The five study sections and their time-weight table
//! - Daily-progress ledger arithmetic and lifetime totals
//! - Practice-test scores with section-specific detail payloads
//! - The achievement milestone table and badge evaluator
//! - Date-range filtering with one-shot fallback selection
//! - A single-slot, time-bounded undo buffer
//! - A local snapshot store with an explicit save/restore contract

pub mod badges;
pub mod error;
pub mod ledger;
pub mod range;
pub mod score;
pub mod store;
pub mod types;
pub mod undo;

pub use badges::{newly_earned, Metric, Milestone, MILESTONES};
pub use error::{CoreError, Result};
pub use range::{
    default_kind, fallback_kind, filter_by_range, resolve, DateRange, Dated, RangeKind,
    RangeSelection,
};
pub use score::{
    percentage, DifficultyLevel, GrammarDetails, KanjiDetails, ListeningAudioType,
    ListeningDetails, ReadingDetails, TestDetails, TestScore, VocabularyDetails,
};
pub use store::{LocalStore, Snapshot};
pub use types::{
    Badge, CategoryTotals, DailyProgress, DailyTarget, JlptLevel, Profile, Section,
};
pub use undo::{UndoBuffer, UndoRecord, UNDO_WINDOW_SECS};
