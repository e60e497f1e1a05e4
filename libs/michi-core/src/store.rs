//! Local snapshot store: the in-process variant of the ledger.
//!
//! Owned by the application shell and constructed once at startup. State
//! changes go through explicit methods; persistence is an explicit
//! save/restore contract over a JSON snapshot. The undo buffer is
//! deliberately not part of the snapshot.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::score::TestScore;
use crate::types::{DailyProgress, DailyTarget, JlptLevel, Section};
use crate::undo::{UndoBuffer, UndoRecord};

/// Serializable application state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_level: Option<JlptLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_date: Option<NaiveDate>,
    #[serde(default)]
    pub daily_target: DailyTarget,
    #[serde(default)]
    pub progress: Vec<DailyProgress>,
    #[serde(default)]
    pub scores: Vec<TestScore>,
    #[serde(default)]
    pub current_streak: u32,
}

/// State container over a [`Snapshot`] plus the ephemeral undo slot.
#[derive(Debug, Default)]
pub struct LocalStore {
    snapshot: Snapshot,
    undo: UndoBuffer,
}

impl LocalStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            undo: UndoBuffer::default(),
        }
    }

    /// Restore from a previously saved snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Serialize the snapshot for persistence.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot)?)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn set_level(&mut self, level: JlptLevel) {
        self.snapshot.selected_level = Some(level);
    }

    pub fn set_exam_date(&mut self, date: NaiveDate) {
        self.snapshot.exam_date = Some(date);
    }

    pub fn set_daily_target(&mut self, target: DailyTarget) {
        self.snapshot.daily_target = target;
    }

    pub fn today_progress(&self, today: NaiveDate) -> Option<&DailyProgress> {
        self.snapshot.progress.iter().find(|p| p.date == today)
    }

    /// Whole days remaining until the exam, clamped at zero.
    pub fn days_until_exam(&self, today: NaiveDate) -> Option<i64> {
        self.snapshot
            .exam_date
            .map(|exam| (exam - today).num_days().max(0))
    }

    /// Record `amount` units of study against today, creating the day's
    /// record on first log. Arms the undo slot with the pre-write state.
    pub fn log_study(
        &mut self,
        section: Section,
        amount: u32,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<&DailyProgress> {
        if amount == 0 {
            return Err(CoreError::InvalidAmount(0));
        }

        let previous = self.today_progress(today).cloned();
        let index = match self.snapshot.progress.iter().position(|p| p.date == today) {
            Some(i) => {
                self.snapshot.progress[i].apply(section, amount);
                i
            }
            None => {
                self.snapshot
                    .progress
                    .push(DailyProgress::seed(today, section, amount));
                self.snapshot.progress.len() - 1
            }
        };

        self.undo.arm(UndoRecord {
            section,
            amount,
            previous,
            timestamp: now,
        });

        Ok(&self.snapshot.progress[index])
    }

    /// Reverse the last log if the slot is still fresh. Restores the
    /// prior state, or removes the day's record when the log created it.
    pub fn undo_last(&mut self, today: NaiveDate, now: DateTime<Utc>) -> bool {
        let Some(record) = self.undo.fresh(now) else {
            return false;
        };
        let Some(index) = self.snapshot.progress.iter().position(|p| p.date == today) else {
            return false;
        };

        match record.previous.clone() {
            Some(previous) => self.snapshot.progress[index] = previous,
            None => {
                self.snapshot.progress.remove(index);
            }
        }
        self.undo.disarm();
        true
    }

    pub fn log_test(&mut self, score: TestScore) {
        self.snapshot.scores.push(score);
    }

    pub fn scores(&self) -> &[TestScore] {
        &self.snapshot.scores
    }
}
