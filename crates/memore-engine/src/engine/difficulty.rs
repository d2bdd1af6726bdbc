use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::InvalidLevelError;

/// Most shapes a player is ever asked to memorize.
pub const MAX_MEMORIZE_COUNT: usize = 12;
/// Largest grid ever shown during recognition.
pub const MAX_GRID_COUNT: usize = 48;
/// Shortest observation time, in seconds.
pub const MIN_VIEW_TIME_SECS: f64 = 3.0;

/// How a session is played.
///
/// The difficulty curve accepts a mode so that modes can diverge later (an
/// untimed training mode, for instance), but today every mode shares one curve.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Training,
    #[default]
    Challenge,
    Infinite,
}

impl GameMode {
    pub const ALL: [Self; 3] = [Self::Training, Self::Challenge, Self::Infinite];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Training => "training",
            Self::Challenge => "challenge",
            Self::Infinite => "infinite",
        }
    }
}

/// Size and pacing of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DifficultyParams {
    /// Number of shapes to memorize, at least 1.
    pub memorize_count: usize,
    /// How long the memorize set stays visible.
    #[serde(rename = "view_time_secs", serialize_with = "serialize_secs")]
    pub view_time: Duration,
    /// Total number of shapes in the recognition grid, targets included.
    pub grid_count: usize,
}

fn serialize_secs<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Computes the round parameters for a level.
///
/// - memorize count: `min(12, 3 + level / 2)`
/// - view time: `max(3, 10 - level * 0.5)` seconds
/// - grid count: `min(48, 8 + level * 4)`
///
/// `mode` does not change the result.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use memore_engine::{GameMode, compute_difficulty};
///
/// let params = compute_difficulty(1, GameMode::Challenge).unwrap();
/// assert_eq!(params.memorize_count, 3);
/// assert_eq!(params.view_time, Duration::from_millis(9500));
/// assert_eq!(params.grid_count, 12);
///
/// assert!(compute_difficulty(0, GameMode::Challenge).is_err());
/// ```
pub fn compute_difficulty(
    level: u32,
    _mode: GameMode,
) -> Result<DifficultyParams, InvalidLevelError> {
    if level == 0 {
        return Err(InvalidLevelError { level });
    }
    let level_usize = usize::try_from(level).unwrap_or(usize::MAX);

    let memorize_count = usize::min(MAX_MEMORIZE_COUNT, 3 + level_usize / 2);
    let view_time_secs = f64::max(MIN_VIEW_TIME_SECS, 10.0 - f64::from(level) * 0.5);
    let grid_count = usize::min(
        MAX_GRID_COUNT,
        level_usize.saturating_mul(4).saturating_add(8),
    );

    Ok(DifficultyParams {
        memorize_count,
        view_time: Duration::from_secs_f64(view_time_secs),
        grid_count,
    })
}
