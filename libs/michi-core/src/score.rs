//! Practice-test scores.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::types::Section;

/// Difficulty of a logged practice test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
    Exam,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Exam => "exam",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            "exam" => Some(Self::Exam),
            _ => None,
        }
    }
}

/// Audio format of a listening test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListeningAudioType {
    Dialogue,
    Monologue,
    ExamStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListeningDetails {
    pub audio_type: ListeningAudioType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_taken_minutes: Option<u32>,
    pub difficulty_level: DifficultyLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingDetails {
    pub passage_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_taken_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanjiDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrong_kanji_list: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weak_words_list: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confusing_patterns: Option<Vec<String>>,
}

/// Section-specific structured payload attached to a test score.
///
/// Untagged: the wire shape is the bare details object, distinguished by
/// its field names. Listening and reading carry required fields and must
/// come first so the list-only variants don't shadow them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TestDetails {
    Listening(ListeningDetails),
    Reading(ReadingDetails),
    Kanji(KanjiDetails),
    Vocabulary(VocabularyDetails),
    Grammar(GrammarDetails),
}

/// One logged practice test. Immutable once created except for deletion
/// by the owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestScore {
    pub date: NaiveDate,
    pub section: Section,
    pub correct: u32,
    pub total: u32,
    /// Percentage, `round(100 * correct / total)`.
    pub score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_taken_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<DifficultyLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<TestDetails>,
}

impl TestScore {
    /// Validate and build a score entry. Fails on `total == 0` or
    /// `correct > total` before anything reaches a store.
    pub fn new(date: NaiveDate, section: Section, correct: u32, total: u32) -> Result<Self> {
        if total == 0 {
            return Err(CoreError::EmptyTest);
        }
        if correct > total {
            return Err(CoreError::ScoreOutOfRange { correct, total });
        }
        Ok(Self {
            date,
            section,
            correct,
            total,
            score: percentage(correct, total),
            time_taken_minutes: None,
            difficulty_level: None,
            notes: None,
            details: None,
        })
    }

    pub fn with_time_taken(mut self, minutes: u32) -> Self {
        self.time_taken_minutes = Some(minutes);
        self
    }

    pub fn with_difficulty(mut self, level: DifficultyLevel) -> Self {
        self.difficulty_level = Some(level);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_details(mut self, details: TestDetails) -> Self {
        self.details = Some(details);
        self
    }
}

/// Rounded percentage score.
pub fn percentage(correct: u32, total: u32) -> u32 {
    (f64::from(correct) / f64::from(total) * 100.0).round() as u32
}
