//! Game rules and session flow.
//!
//! - [`compute_difficulty`] - Round size and pacing for a level
//! - [`generate_pool`] - Distinct random shapes honoring the player's settings
//! - [`score_round`] - Selection versus targets, as a [`RoundOutcome`]
//! - [`GameStats`] - Cumulative score, answers and streaks
//! - [`Round`] - Memorize set plus shuffled grid for one level
//! - [`GameSession`] - The menu → observation → recognition → feedback → game over cycle
//! - [`SessionSeed`] - Seed for reproducible sessions
//!
//! # Round Flow
//!
//! 1. [`compute_difficulty`] sizes the round from the level
//! 2. [`generate_pool`] draws the memorize set
//! 3. [`generate_pool`] draws the distractors, excluding the memorize set
//! 4. Targets and distractors are shuffled into the grid
//! 5. [`score_round`] compares the player's selection with the targets
//! 6. [`GameStats::apply`] folds the outcome into the session totals
//!
//! [`GameSession`] performs these steps at the matching phase transitions.

pub use self::{
    difficulty::*, game_session::*, game_stats::*, round::*, scoring::*, session_seed::*,
    shape_pool::*,
};

mod difficulty;
mod game_session;
mod game_stats;
mod round;
mod scoring;
mod session_seed;
mod shape_pool;
