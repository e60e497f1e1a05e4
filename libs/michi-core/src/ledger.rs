//! Daily-progress ledger arithmetic.
//!
//! Every logged unit of study credits the day with an estimated number of
//! minutes. The weight table lives here, on the `Section` enum, so the
//! section -> counter/weight mapping has a single home.

use chrono::NaiveDate;

use crate::types::{CategoryTotals, DailyProgress, Section};

impl Section {
    /// Minutes credited for logging `amount` units of this section.
    ///
    /// listening: 1 min/min, kanji: 2 min each, vocabulary: half a minute
    /// each rounded up, grammar: 5 min/point, reading: 10 min/passage.
    pub fn time_contribution(&self, amount: u32) -> u32 {
        match self {
            Self::Listening => amount,
            Self::Kanji => amount * 2,
            Self::Vocabulary => amount.div_ceil(2),
            Self::Grammar => amount * 5,
            Self::Reading => amount * 10,
        }
    }
}

impl DailyProgress {
    /// New record for `date` with a single section seeded to `amount`.
    pub fn seed(date: NaiveDate, section: Section, amount: u32) -> Self {
        let mut progress = Self {
            date,
            kanji: 0,
            vocabulary: 0,
            grammar: 0,
            listening_minutes: 0,
            reading_passages: 0,
            total_minutes: 0,
        };
        progress.apply(section, amount);
        progress
    }

    /// Increment the counter for `section` and credit the time contribution.
    pub fn apply(&mut self, section: Section, amount: u32) {
        match section {
            Section::Kanji => self.kanji += amount,
            Section::Vocabulary => self.vocabulary += amount,
            Section::Grammar => self.grammar += amount,
            Section::Listening => self.listening_minutes += amount,
            Section::Reading => self.reading_passages += amount,
        }
        self.total_minutes += section.time_contribution(amount);
    }

    /// Current counter value for `section`.
    pub fn counter(&self, section: Section) -> u32 {
        match section {
            Section::Kanji => self.kanji,
            Section::Vocabulary => self.vocabulary,
            Section::Grammar => self.grammar,
            Section::Listening => self.listening_minutes,
            Section::Reading => self.reading_passages,
        }
    }
}

impl CategoryTotals {
    /// Lifetime sums over a set of daily records.
    pub fn accumulate<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a DailyProgress>,
    {
        records.into_iter().fold(Self::default(), |mut acc, p| {
            acc.kanji += p.kanji;
            acc.vocabulary += p.vocabulary;
            acc.grammar += p.grammar;
            acc.listening_minutes += p.listening_minutes;
            acc.reading_passages += p.reading_passages;
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn weight_table_matches_reference_values() {
        assert_eq!(Section::Grammar.time_contribution(3), 15);
        assert_eq!(Section::Listening.time_contribution(7), 7);
        assert_eq!(Section::Vocabulary.time_contribution(9), 5);
        assert_eq!(Section::Kanji.time_contribution(4), 8);
        assert_eq!(Section::Reading.time_contribution(2), 20);
    }

    #[test]
    fn vocabulary_rounds_half_minutes_up() {
        assert_eq!(Section::Vocabulary.time_contribution(1), 1);
        assert_eq!(Section::Vocabulary.time_contribution(2), 1);
        assert_eq!(Section::Vocabulary.time_contribution(3), 2);
    }

    #[test]
    fn seed_sets_one_counter_and_total() {
        let p = DailyProgress::seed(day("2025-03-01"), Section::Kanji, 5);
        assert_eq!(p.kanji, 5);
        assert_eq!(p.total_minutes, 10);
        assert_eq!(p.vocabulary, 0);
        assert_eq!(p.grammar, 0);
        assert_eq!(p.listening_minutes, 0);
        assert_eq!(p.reading_passages, 0);
    }

    #[test]
    fn apply_accumulates_counters_and_minutes() {
        let mut p = DailyProgress::seed(day("2025-03-01"), Section::Listening, 10);
        p.apply(Section::Grammar, 2);
        p.apply(Section::Listening, 5);
        assert_eq!(p.listening_minutes, 15);
        assert_eq!(p.grammar, 2);
        assert_eq!(p.total_minutes, 10 + 10 + 5);
    }

    #[test]
    fn totals_accumulate_across_days() {
        let records = vec![
            DailyProgress::seed(day("2025-03-01"), Section::Kanji, 30),
            DailyProgress::seed(day("2025-03-02"), Section::Kanji, 25),
            DailyProgress::seed(day("2025-03-02"), Section::Reading, 3),
        ];
        let totals = CategoryTotals::accumulate(&records);
        assert_eq!(totals.kanji, 55);
        assert_eq!(totals.reading_passages, 3);
        assert_eq!(totals.vocabulary, 0);
    }
}
