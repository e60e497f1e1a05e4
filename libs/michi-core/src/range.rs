//! Date-range selection for progress and score reads.
//!
//! Ranges are inclusive on both ends and compared at day granularity.
//! When a fresh dataset leaves the selected range empty, the selection
//! falls back to the next wider named range exactly once, unless the
//! user has already picked a range by hand.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::score::TestScore;
use crate::types::DailyProgress;

/// Named range kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeKind {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "7days")]
    Last7Days,
    #[serde(rename = "30days")]
    Last30Days,
    #[serde(rename = "all")]
    All,
    #[serde(rename = "custom")]
    Custom,
}

impl RangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Last7Days => "7days",
            Self::Last30Days => "30days",
            Self::All => "all",
            Self::Custom => "custom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "today" => Some(Self::Today),
            "7days" => Some(Self::Last7Days),
            "30days" => Some(Self::Last30Days),
            "all" => Some(Self::All),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Fallback scan order, narrowest to widest. Custom is exempt.
const FALLBACK_ORDER: [RangeKind; 4] = [
    RangeKind::Today,
    RangeKind::Last7Days,
    RangeKind::Last30Days,
    RangeKind::All,
];

/// Start of the `all` range.
pub fn all_time_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid epoch date")
}

/// Inclusive date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(CoreError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

/// Resolve a named kind to concrete bounds. `custom` falls back to a
/// single-day window on `today` when no bounds were supplied.
pub fn resolve(kind: RangeKind, today: NaiveDate, custom: Option<DateRange>) -> DateRange {
    match kind {
        RangeKind::Today => DateRange::single_day(today),
        RangeKind::Last7Days => DateRange {
            from: today - chrono::Duration::days(6),
            to: today,
        },
        RangeKind::Last30Days => DateRange {
            from: today - chrono::Duration::days(29),
            to: today,
        },
        RangeKind::All => DateRange {
            from: all_time_epoch(),
            to: today,
        },
        RangeKind::Custom => custom.unwrap_or_else(|| DateRange::single_day(today)),
    }
}

/// Anything with a calendar date, filterable by range.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for DailyProgress {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for TestScore {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Records whose date falls inside `range`, both bounds inclusive.
pub fn filter_by_range<'a, T: Dated>(records: &'a [T], range: &DateRange) -> Vec<&'a T> {
    records.iter().filter(|r| range.contains(r.date())).collect()
}

/// Default selection for a fresh session: a user with at most one
/// historical record starts on `today`, everyone else on `7days`.
pub fn default_kind(record_count: usize) -> RangeKind {
    if record_count <= 1 {
        RangeKind::Today
    } else {
        RangeKind::Last7Days
    }
}

/// First wider named range (after `current` in the fallback order) that
/// matches at least one record, or None when every wider range is empty.
pub fn fallback_kind<T: Dated>(
    records: &[T],
    current: RangeKind,
    today: NaiveDate,
) -> Option<RangeKind> {
    let start = FALLBACK_ORDER.iter().position(|k| *k == current)? + 1;
    FALLBACK_ORDER[start..]
        .iter()
        .copied()
        .find(|kind| !filter_by_range(records, &resolve(*kind, today, None)).is_empty())
}

/// Range selection state for one session: the chosen kind, optional
/// custom bounds, and the flags that make the fallback fire at most once
/// and never after a manual selection.
#[derive(Debug, Clone)]
pub struct RangeSelection {
    kind: RangeKind,
    custom: Option<DateRange>,
    user_selected: bool,
    fallback_done: bool,
}

impl RangeSelection {
    pub fn new(record_count: usize) -> Self {
        Self {
            kind: default_kind(record_count),
            custom: None,
            user_selected: false,
            fallback_done: false,
        }
    }

    pub fn kind(&self) -> RangeKind {
        self.kind
    }

    /// Manual selection. Permanently disables the automatic fallback for
    /// this session.
    pub fn select(&mut self, kind: RangeKind) {
        self.user_selected = true;
        self.kind = kind;
    }

    /// Manual selection of explicit custom bounds.
    pub fn select_custom(&mut self, range: DateRange) {
        self.user_selected = true;
        self.kind = RangeKind::Custom;
        self.custom = Some(range);
    }

    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        resolve(self.kind, today, self.custom)
    }

    /// One-shot fallback on a fresh dataset: if the current named range
    /// matches nothing, move to the first wider range that does. Runs at
    /// most once and never after a manual selection.
    pub fn on_data_loaded<T: Dated>(&mut self, records: &[T], today: NaiveDate) {
        if self.user_selected || self.fallback_done || records.is_empty() {
            return;
        }
        self.fallback_done = true;
        if self.kind == RangeKind::Custom {
            return;
        }
        let current = self.resolve(today);
        if filter_by_range(records, &current).is_empty() {
            if let Some(kind) = fallback_kind(records, self.kind, today) {
                self.kind = kind;
            }
        }
    }
}
