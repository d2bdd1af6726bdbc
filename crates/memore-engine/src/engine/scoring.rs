use std::{collections::HashSet, hash::BuildHasher};

use serde::Serialize;

use crate::core::ShapeId;

/// Points for each selected target.
pub const POINTS_PER_CORRECT: i64 = 10;
/// Penalty for each selected non-target.
pub const PENALTY_PER_WRONG: i64 = 5;
/// Penalty for each target left unselected.
pub const PENALTY_PER_MISSED: i64 = 2;

/// Result of comparing a player's selection with the targets of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundOutcome {
    /// Selected shapes that were targets.
    pub correct_count: usize,
    /// Selected shapes that were not targets.
    pub wrong_count: usize,
    /// Targets that were not selected.
    pub missed_count: usize,
    /// Score change for the round; may be negative.
    pub score_delta: i64,
    /// `true` for a perfect round (every target found, nothing else picked).
    pub streak_continues: bool,
}

impl RoundOutcome {
    /// Number of targets in the round.
    #[must_use]
    pub fn target_count(&self) -> usize {
        self.correct_count + self.missed_count
    }
}

/// Scores a selection against the round's targets.
///
/// Total over every input: an empty selection or an all-wrong selection is just
/// data, never an error. The cumulative score is floored by
/// [`GameStats`](crate::GameStats), not here.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use memore_engine::{ShapeId, score_round};
///
/// let [a, b, c, d] = [(); 4].map(|()| ShapeId::next());
/// let targets = HashSet::from([a, b, c]);
/// let selected = HashSet::from([a, b, d]);
///
/// let outcome = score_round(&targets, &selected);
/// assert_eq!(outcome.correct_count, 2);
/// assert_eq!(outcome.wrong_count, 1);
/// assert_eq!(outcome.missed_count, 1);
/// assert_eq!(outcome.score_delta, 13);
/// assert!(!outcome.streak_continues);
/// ```
#[must_use]
pub fn score_round<S1, S2>(
    targets: &HashSet<ShapeId, S1>,
    selected: &HashSet<ShapeId, S2>,
) -> RoundOutcome
where
    S1: BuildHasher,
    S2: BuildHasher,
{
    let correct_count = selected.iter().filter(|id| targets.contains(*id)).count();
    let wrong_count = selected.len() - correct_count;
    let missed_count = targets.len() - correct_count;

    let score_delta = POINTS_PER_CORRECT * count_as_i64(correct_count)
        - PENALTY_PER_WRONG * count_as_i64(wrong_count)
        - PENALTY_PER_MISSED * count_as_i64(missed_count);

    RoundOutcome {
        correct_count,
        wrong_count,
        missed_count,
        score_delta,
        streak_continues: missed_count == 0 && wrong_count == 0,
    }
}

fn count_as_i64(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<const N: usize>() -> [ShapeId; N] {
        [(); N].map(|()| ShapeId::next())
    }

    #[test]
    fn test_mixed_selection() {
        let [a, b, c, d] = ids();
        let outcome = score_round(&HashSet::from([a, b, c]), &HashSet::from([a, b, d]));
        assert_eq!(
            outcome,
            RoundOutcome {
                correct_count: 2,
                wrong_count: 1,
                missed_count: 1,
                score_delta: 13,
                streak_continues: false,
            }
        );
        assert_eq!(outcome.target_count(), 3);
    }

    #[test]
    fn test_perfect_selection() {
        let targets = HashSet::from(ids::<5>());
        let outcome = score_round(&targets, &targets);
        assert_eq!(outcome.correct_count, 5);
        assert_eq!(outcome.wrong_count, 0);
        assert_eq!(outcome.missed_count, 0);
        assert_eq!(outcome.score_delta, 50);
        assert!(outcome.streak_continues);
    }

    #[test]
    fn test_empty_selection() {
        let targets = HashSet::from(ids::<4>());
        let outcome = score_round(&targets, &HashSet::new());
        assert_eq!(outcome.correct_count, 0);
        assert_eq!(outcome.wrong_count, 0);
        assert_eq!(outcome.missed_count, 4);
        assert_eq!(outcome.score_delta, -8);
        assert!(!outcome.streak_continues);
    }

    #[test]
    fn test_empty_targets_and_selection() {
        let outcome = score_round(&HashSet::new(), &HashSet::new());
        assert_eq!(outcome.score_delta, 0);
        assert!(outcome.streak_continues);
    }

    #[test]
    fn test_all_wrong_selection() {
        let [a, b, x, y, z] = ids();
        let outcome = score_round(&HashSet::from([a, b]), &HashSet::from([x, y, z]));
        assert_eq!(outcome.correct_count, 0);
        assert_eq!(outcome.wrong_count, 3);
        assert_eq!(outcome.missed_count, 2);
        assert_eq!(outcome.score_delta, -19);
        assert!(!outcome.streak_continues);
    }

    #[test]
    fn test_extra_pick_breaks_streak() {
        let [a, b, x] = ids();
        let outcome = score_round(&HashSet::from([a, b]), &HashSet::from([a, b, x]));
        assert_eq!(outcome.missed_count, 0);
        assert_eq!(outcome.score_delta, 15);
        assert!(!outcome.streak_continues);
    }
}
