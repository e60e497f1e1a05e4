//! Single-slot undo buffer for the last ledger write.

use chrono::{DateTime, Utc};

use crate::types::{DailyProgress, Section};

/// Seconds after a log during which it can still be undone. Hard cutoff,
/// measured once when undo is invoked.
pub const UNDO_WINDOW_SECS: i64 = 5 * 60;

/// Everything needed to reverse exactly one ledger write.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoRecord {
    pub section: Section,
    pub amount: u32,
    /// Full record state before the write; None when the write created
    /// the day's record.
    pub previous: Option<DailyProgress>,
    pub timestamp: DateTime<Utc>,
}

impl UndoRecord {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        (now - self.timestamp).num_seconds() <= UNDO_WINDOW_SECS
    }
}

/// Two-state machine over the most recent ledger write.
///
/// A successful log arms the buffer, replacing any prior slot. Only a
/// successful undo or a new log changes the state; intervening reads and
/// failed undo attempts leave it untouched, so an expired slot stays
/// armed but unusable.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum UndoBuffer {
    #[default]
    Empty,
    Armed(UndoRecord),
}

impl UndoBuffer {
    /// Arm with a new record, overwriting any prior slot.
    pub fn arm(&mut self, record: UndoRecord) {
        *self = Self::Armed(record);
    }

    /// The armed record if it is still inside the undo window.
    pub fn fresh(&self, now: DateTime<Utc>) -> Option<&UndoRecord> {
        match self {
            Self::Armed(record) if record.is_fresh(now) => Some(record),
            _ => None,
        }
    }

    /// Clear after a successful compensating action.
    pub fn disarm(&mut self) -> Option<UndoRecord> {
        match std::mem::take(self) {
            Self::Armed(record) => Some(record),
            Self::Empty => None,
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, Self::Armed(_))
    }
}
