use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom as _};
use serde::Serialize;

use crate::{
    InvalidLevelError,
    core::{GameSettings, ShapeDescriptor, ShapeId},
};

use super::{
    difficulty::{DifficultyParams, GameMode, compute_difficulty},
    scoring::{RoundOutcome, score_round},
    shape_pool::generate_pool,
};

/// How a grid shape fared once the selection is confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeVerdict {
    /// A target the player selected.
    Correct,
    /// A non-target the player selected.
    Wrong,
    /// A target the player did not select.
    Missed,
    /// A non-target the player left alone.
    Unselected,
}

/// The shapes of one round: the memorize set and the shuffled grid.
#[derive(Debug, Clone, Serialize)]
pub struct Round {
    level: u32,
    params: DifficultyParams,
    targets: Vec<ShapeDescriptor>,
    grid: Vec<ShapeDescriptor>,
    shortfall: usize,
}

impl Round {
    /// Generates a round for the given level.
    ///
    /// Draws the memorize set, then enough distractors (excluding the memorize
    /// set) to reach the grid size, and shuffles targets and distractors
    /// together into the grid.
    pub fn generate<R>(
        rng: &mut R,
        level: u32,
        mode: GameMode,
        settings: &GameSettings,
    ) -> Result<Self, InvalidLevelError>
    where
        R: Rng + ?Sized,
    {
        let params = compute_difficulty(level, mode)?;

        let targets = generate_pool(rng, params.memorize_count, settings, &[]);
        let distractor_count = params.grid_count - targets.len();
        let distractors = generate_pool(rng, distractor_count, settings, targets.shapes());
        let shortfall = targets.shortfall() + distractors.shortfall();

        let targets = targets.into_shapes();
        let mut grid = targets.clone();
        grid.extend(distractors.into_shapes());
        grid.shuffle(rng);

        tracing::debug!(
            level,
            targets = targets.len(),
            grid = grid.len(),
            shortfall,
            "generated round"
        );

        Ok(Self {
            level,
            params,
            targets,
            grid,
            shortfall,
        })
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn params(&self) -> &DifficultyParams {
        &self.params
    }

    /// Shapes to memorize, in display order.
    #[must_use]
    pub fn targets(&self) -> &[ShapeDescriptor] {
        &self.targets
    }

    /// Targets and distractors, shuffled.
    #[must_use]
    pub fn grid(&self) -> &[ShapeDescriptor] {
        &self.grid
    }

    /// Number of shapes the difficulty asked for but the settings could not supply.
    #[must_use]
    pub fn shortfall(&self) -> usize {
        self.shortfall
    }

    #[must_use]
    pub fn target_ids(&self) -> HashSet<ShapeId> {
        self.targets.iter().map(ShapeDescriptor::id).collect()
    }

    #[must_use]
    pub fn is_target(&self, id: ShapeId) -> bool {
        self.targets.iter().any(|shape| shape.id() == id)
    }

    /// Looks up a grid shape by identity.
    #[must_use]
    pub fn grid_shape(&self, id: ShapeId) -> Option<&ShapeDescriptor> {
        self.grid.iter().find(|shape| shape.id() == id)
    }

    /// Scores a selection against this round's targets.
    #[must_use]
    pub fn score(&self, selected: &HashSet<ShapeId>) -> RoundOutcome {
        score_round(&self.target_ids(), selected)
    }

    /// Classifies a shape given the player's selection.
    #[must_use]
    pub fn verdict(&self, id: ShapeId, selected: &HashSet<ShapeId>) -> ShapeVerdict {
        match (self.is_target(id), selected.contains(&id)) {
            (true, true) => ShapeVerdict::Correct,
            (false, true) => ShapeVerdict::Wrong,
            (true, false) => ShapeVerdict::Missed,
            (false, false) => ShapeVerdict::Unselected,
        }
    }
}
