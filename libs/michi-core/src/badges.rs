//! Achievement milestones and the badge evaluator.

use crate::types::CategoryTotals;

/// Metric a milestone is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Streak,
    Kanji,
    Vocabulary,
    Grammar,
    ListeningMinutes,
    ReadingPassages,
}

/// A (metric, threshold) pair that unlocks exactly one badge.
#[derive(Debug, Clone, Copy)]
pub struct Milestone {
    pub metric: Metric,
    pub threshold: u32,
    pub badge_type: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// The fixed milestone table, in award-processing order.
pub const MILESTONES: &[Milestone] = &[
    // Streak milestones
    Milestone { metric: Metric::Streak, threshold: 7, badge_type: "streak_7", name: "一週間の道 (Week Warrior)", description: "7 consecutive days of study" },
    Milestone { metric: Metric::Streak, threshold: 14, badge_type: "streak_14", name: "二週間の旅 (Fortnight Journey)", description: "14 consecutive days of study" },
    Milestone { metric: Metric::Streak, threshold: 30, badge_type: "streak_30", name: "月の道 (Moon Path)", description: "30 consecutive days of study" },
    Milestone { metric: Metric::Streak, threshold: 60, badge_type: "streak_60", name: "二月の光 (Two Moon Light)", description: "60 consecutive days of study" },
    Milestone { metric: Metric::Streak, threshold: 100, badge_type: "streak_100", name: "百日の桜 (Hundred Day Sakura)", description: "100 consecutive days of study" },
    // Kanji milestones
    Milestone { metric: Metric::Kanji, threshold: 50, badge_type: "kanji_50", name: "漢字の芽 (Kanji Seedling)", description: "Learned 50 kanji" },
    Milestone { metric: Metric::Kanji, threshold: 100, badge_type: "kanji_100", name: "漢字の木 (Kanji Tree)", description: "Learned 100 kanji" },
    Milestone { metric: Metric::Kanji, threshold: 250, badge_type: "kanji_250", name: "漢字の森 (Kanji Forest)", description: "Learned 250 kanji" },
    Milestone { metric: Metric::Kanji, threshold: 500, badge_type: "kanji_500", name: "漢字の山 (Kanji Mountain)", description: "Learned 500 kanji" },
    Milestone { metric: Metric::Kanji, threshold: 1000, badge_type: "kanji_1000", name: "漢字の達人 (Kanji Master)", description: "Learned 1000 kanji" },
    // Vocabulary milestones
    Milestone { metric: Metric::Vocabulary, threshold: 100, badge_type: "vocab_100", name: "言葉の種 (Word Seed)", description: "Learned 100 vocabulary words" },
    Milestone { metric: Metric::Vocabulary, threshold: 500, badge_type: "vocab_500", name: "言葉の花 (Word Bloom)", description: "Learned 500 vocabulary words" },
    Milestone { metric: Metric::Vocabulary, threshold: 1000, badge_type: "vocab_1000", name: "言葉の庭 (Word Garden)", description: "Learned 1000 vocabulary words" },
    Milestone { metric: Metric::Vocabulary, threshold: 2500, badge_type: "vocab_2500", name: "言葉の海 (Word Ocean)", description: "Learned 2500 vocabulary words" },
    Milestone { metric: Metric::Vocabulary, threshold: 5000, badge_type: "vocab_5000", name: "言葉の宇宙 (Word Universe)", description: "Learned 5000 vocabulary words" },
    // Grammar milestones
    Milestone { metric: Metric::Grammar, threshold: 25, badge_type: "grammar_25", name: "文法の基礎 (Grammar Foundation)", description: "Mastered 25 grammar points" },
    Milestone { metric: Metric::Grammar, threshold: 50, badge_type: "grammar_50", name: "文法の柱 (Grammar Pillar)", description: "Mastered 50 grammar points" },
    Milestone { metric: Metric::Grammar, threshold: 100, badge_type: "grammar_100", name: "文法の城 (Grammar Castle)", description: "Mastered 100 grammar points" },
    Milestone { metric: Metric::Grammar, threshold: 200, badge_type: "grammar_200", name: "文法の王国 (Grammar Kingdom)", description: "Mastered 200 grammar points" },
    // Listening milestones (in minutes)
    Milestone { metric: Metric::ListeningMinutes, threshold: 60, badge_type: "listening_60", name: "耳の目覚め (Awakened Ear)", description: "1 hour of listening practice" },
    Milestone { metric: Metric::ListeningMinutes, threshold: 300, badge_type: "listening_300", name: "耳の成長 (Growing Ear)", description: "5 hours of listening practice" },
    Milestone { metric: Metric::ListeningMinutes, threshold: 600, badge_type: "listening_600", name: "耳の力 (Powerful Ear)", description: "10 hours of listening practice" },
    Milestone { metric: Metric::ListeningMinutes, threshold: 1500, badge_type: "listening_1500", name: "耳の達人 (Listening Master)", description: "25 hours of listening practice" },
    // Reading milestones
    Milestone { metric: Metric::ReadingPassages, threshold: 10, badge_type: "reading_10", name: "読書の始まり (Reading Start)", description: "Read 10 passages" },
    Milestone { metric: Metric::ReadingPassages, threshold: 50, badge_type: "reading_50", name: "読書の道 (Reading Path)", description: "Read 50 passages" },
    Milestone { metric: Metric::ReadingPassages, threshold: 100, badge_type: "reading_100", name: "読書の旅 (Reading Journey)", description: "Read 100 passages" },
    Milestone { metric: Metric::ReadingPassages, threshold: 250, badge_type: "reading_250", name: "読書の冒険 (Reading Adventure)", description: "Read 250 passages" },
];

impl Metric {
    /// Current value of this metric for the given streak and totals.
    pub fn value(&self, current_streak: u32, totals: &CategoryTotals) -> u32 {
        match self {
            Self::Streak => current_streak,
            Self::Kanji => totals.kanji,
            Self::Vocabulary => totals.vocabulary,
            Self::Grammar => totals.grammar,
            Self::ListeningMinutes => totals.listening_minutes,
            Self::ReadingPassages => totals.reading_passages,
        }
    }
}

impl Milestone {
    /// Whether the metric has crossed this milestone's threshold.
    pub fn satisfied(&self, current_streak: u32, totals: &CategoryTotals) -> bool {
        self.metric.value(current_streak, totals) >= self.threshold
    }
}

/// Milestones whose threshold is met and whose badge type has not been
/// awarded yet, in table order. Safe to call repeatedly with the same
/// inputs: already-awarded types are filtered out, so each badge type is
/// produced at most once across any sequence of evaluations.
pub fn newly_earned<'a>(
    current_streak: u32,
    totals: &CategoryTotals,
    existing_types: impl IntoIterator<Item = &'a str>,
) -> Vec<&'static Milestone> {
    let existing: std::collections::HashSet<&str> = existing_types.into_iter().collect();
    MILESTONES
        .iter()
        .filter(|m| m.satisfied(current_streak, totals) && !existing.contains(m.badge_type))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_has_unique_badge_types() {
        let mut types: Vec<_> = MILESTONES.iter().map(|m| m.badge_type).collect();
        types.sort_unstable();
        types.dedup();
        assert_eq!(types.len(), MILESTONES.len());
    }

    #[test]
    fn streak_seven_earns_exactly_one_badge() {
        let totals = CategoryTotals::default();
        let earned = newly_earned(7, &totals, []);
        assert_eq!(earned.len(), 1);
        assert_eq!(earned[0].badge_type, "streak_7");
    }

    #[test]
    fn already_awarded_types_are_not_repeated() {
        let totals = CategoryTotals::default();
        let earned = newly_earned(7, &totals, ["streak_7"]);
        assert!(earned.is_empty());
    }

    #[test]
    fn crossing_a_threshold_catches_skipped_milestones() {
        // A bulk import can jump several thresholds in one evaluation.
        let totals = CategoryTotals {
            kanji: 260,
            ..Default::default()
        };
        let earned = newly_earned(0, &totals, []);
        let types: Vec<_> = earned.iter().map(|m| m.badge_type).collect();
        assert_eq!(types, vec!["kanji_50", "kanji_100", "kanji_250"]);
    }

    #[test]
    fn evaluation_is_idempotent_over_repeated_runs() {
        let totals = CategoryTotals {
            listening_minutes: 90,
            ..Default::default()
        };
        let first = newly_earned(0, &totals, []);
        let awarded: Vec<&str> = first.iter().map(|m| m.badge_type).collect();
        let second = newly_earned(0, &totals, awarded.iter().copied());
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn below_threshold_earns_nothing() {
        let totals = CategoryTotals {
            kanji: 49,
            vocabulary: 99,
            grammar: 24,
            listening_minutes: 59,
            reading_passages: 9,
        };
        assert!(newly_earned(6, &totals, []).is_empty());
    }
}
