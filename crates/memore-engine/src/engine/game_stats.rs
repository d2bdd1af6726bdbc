use serde::Serialize;

use super::scoring::RoundOutcome;

/// Cumulative statistics of a game session.
///
/// Only changes by applying a [`RoundOutcome`]:
///
/// - **Score**: Sum of round score deltas, never below zero
/// - **Correct / wrong / missed**: Totals across all rounds
/// - **Streak**: Consecutive perfect rounds, and the best streak so far
///
/// # Example
///
/// ```
/// use memore_engine::{GameStats, RoundOutcome};
///
/// let mut stats = GameStats::new();
/// stats.apply(&RoundOutcome {
///     correct_count: 3,
///     wrong_count: 0,
///     missed_count: 0,
///     score_delta: 30,
///     streak_continues: true,
/// });
///
/// assert_eq!(stats.score(), 30);
/// assert_eq!(stats.current_streak(), 1);
/// assert_eq!(stats.best_streak(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: u64,
    rounds_played: usize,
    correct_answers: usize,
    wrong_answers: usize,
    missed_answers: usize,
    current_streak: usize,
    best_streak: usize,
}

impl GameStats {
    /// Creates a new statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            rounds_played: 0,
            correct_answers: 0,
            wrong_answers: 0,
            missed_answers: 0,
            current_streak: 0,
            best_streak: 0,
        }
    }

    /// Returns the cumulative score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn rounds_played(&self) -> usize {
        self.rounds_played
    }

    #[must_use]
    pub const fn correct_answers(&self) -> usize {
        self.correct_answers
    }

    #[must_use]
    pub const fn wrong_answers(&self) -> usize {
        self.wrong_answers
    }

    #[must_use]
    pub const fn missed_answers(&self) -> usize {
        self.missed_answers
    }

    /// Number of perfect rounds in a row, ending with the latest round.
    #[must_use]
    pub const fn current_streak(&self) -> usize {
        self.current_streak
    }

    /// Longest run of perfect rounds seen in this session.
    #[must_use]
    pub const fn best_streak(&self) -> usize {
        self.best_streak
    }

    /// Folds a round outcome into the totals.
    ///
    /// A negative delta larger than the current score leaves the score at zero.
    pub fn apply(&mut self, outcome: &RoundOutcome) {
        self.score = self.score.saturating_add_signed(outcome.score_delta);
        self.rounds_played += 1;
        self.correct_answers += outcome.correct_count;
        self.wrong_answers += outcome.wrong_count;
        self.missed_answers += outcome.missed_count;
        if outcome.streak_continues {
            self.current_streak += 1;
            self.best_streak = self.best_streak.max(self.current_streak);
        } else {
            self.current_streak = 0;
        }
    }
}
