use std::{collections::HashSet, time::Duration};

use rand::Rng as _;
use rand_pcg::Pcg32;

use crate::{
    InvalidLevelError, SettingsError,
    core::{GameSettings, ShapeId},
};

use super::{
    GameStats,
    difficulty::GameMode,
    round::Round,
    scoring::RoundOutcome,
    session_seed::SessionSeed,
};

/// Interval at which the front end is expected to call [`GameSession::tick`].
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Phase of a game session.
///
/// ```text
/// Menu -> Observation -> Recognition -> Feedback -> Observation (next level)
///                                                \-> GameOver -> Menu
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum SessionPhase {
    #[display("menu")]
    Menu,
    #[display("observation")]
    Observation,
    #[display("recognition")]
    Recognition,
    #[display("feedback")]
    Feedback,
    #[display("game over")]
    GameOver,
}

/// A session action that is not allowed in the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cannot {action} during {phase}")]
pub struct TransitionError {
    pub phase: SessionPhase,
    pub action: &'static str,
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SessionError {
    #[display("{_0}")]
    Transition(TransitionError),
    #[display("{_0}")]
    InvalidLevel(InvalidLevelError),
    #[display("{_0}")]
    Settings(SettingsError),
    #[display("{id} is not part of the grid")]
    #[from(skip)]
    UnknownShape { id: ShapeId },
}

/// Countdown of the observation phase.
///
/// Lives only inside [`Stage::Observation`]; leaving the phase drops it, so a
/// late tick can never affect a later phase.
#[derive(Debug, Clone, Copy)]
struct ViewTimer {
    total: Duration,
    remaining: Duration,
}

#[derive(Debug, Clone)]
enum Stage {
    Menu,
    Observation {
        round: Round,
        timer: ViewTimer,
    },
    Recognition {
        round: Round,
        selected: HashSet<ShapeId>,
    },
    Feedback {
        round: Round,
        selected: HashSet<ShapeId>,
        outcome: RoundOutcome,
    },
    GameOver {
        last_round: Option<Round>,
    },
}

/// State of one player's game, from the menu to game over.
///
/// Owns the level, mode, settings, statistics and random number generator;
/// the engine functions it calls stay free of this state. The front end drives
/// it with player actions and with [`Self::tick`] every [`TICK_INTERVAL`].
///
/// # Example
///
/// ```
/// use memore_engine::{GameMode, GameSession, SessionPhase, TICK_INTERVAL};
///
/// let mut session = GameSession::new();
/// session.start(GameMode::Challenge).unwrap();
/// assert_eq!(session.phase(), SessionPhase::Observation);
///
/// // Let the view timer run out.
/// while session.phase().is_observation() {
///     session.tick(TICK_INTERVAL);
/// }
///
/// let first = session.round().unwrap().targets()[0].id();
/// session.toggle_selection(first).unwrap();
/// let outcome = session.confirm_selection().unwrap();
/// assert_eq!(outcome.correct_count, 1);
/// assert_eq!(session.stats().correct_answers(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    stage: Stage,
    level: u32,
    mode: GameMode,
    settings: GameSettings,
    stats: GameStats,
    seed: SessionSeed,
    rng: Pcg32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a session in the menu with default settings and a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random(), GameSettings::default())
    }

    /// Like [`Self::new`], but with a specific seed and settings.
    #[must_use]
    pub fn with_seed(seed: SessionSeed, settings: GameSettings) -> Self {
        Self {
            stage: Stage::Menu,
            level: 1,
            mode: GameMode::default(),
            settings,
            stats: GameStats::new(),
            seed,
            rng: seed.rng(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match &self.stage {
            Stage::Menu => SessionPhase::Menu,
            Stage::Observation { .. } => SessionPhase::Observation,
            Stage::Recognition { .. } => SessionPhase::Recognition,
            Stage::Feedback { .. } => SessionPhase::Feedback,
            Stage::GameOver { .. } => SessionPhase::GameOver,
        }
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn seed(&self) -> SessionSeed {
        self.seed
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// The round being played, or the last one played when the game is over.
    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        match &self.stage {
            Stage::Menu => None,
            Stage::Observation { round, .. }
            | Stage::Recognition { round, .. }
            | Stage::Feedback { round, .. } => Some(round),
            Stage::GameOver { last_round } => last_round.as_ref(),
        }
    }

    /// Shapes the player has selected so far (recognition and feedback only).
    #[must_use]
    pub fn selected(&self) -> Option<&HashSet<ShapeId>> {
        match &self.stage {
            Stage::Recognition { selected, .. } | Stage::Feedback { selected, .. } => {
                Some(selected)
            }
            _ => None,
        }
    }

    /// Outcome of the round just confirmed (feedback only).
    #[must_use]
    pub fn outcome(&self) -> Option<&RoundOutcome> {
        match &self.stage {
            Stage::Feedback { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    /// Remaining and total observation time (observation only).
    #[must_use]
    pub fn view_time(&self) -> Option<(Duration, Duration)> {
        match &self.stage {
            Stage::Observation { timer, .. } => Some((timer.remaining, timer.total)),
            _ => None,
        }
    }

    fn transition_error(&self, action: &'static str) -> SessionError {
        TransitionError {
            phase: self.phase(),
            action,
        }
        .into()
    }

    /// Replaces the settings. Only allowed in the menu.
    pub fn set_settings(&mut self, settings: GameSettings) -> Result<(), SessionError> {
        if !self.phase().is_menu() {
            return Err(self.transition_error("change settings"));
        }
        self.settings = settings;
        Ok(())
    }

    /// Edits the settings in place. Only allowed in the menu.
    pub fn update_settings<F>(&mut self, f: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut GameSettings) -> Result<(), SettingsError>,
    {
        if !self.phase().is_menu() {
            return Err(self.transition_error("change settings"));
        }
        f(&mut self.settings)?;
        Ok(())
    }

    /// Starts a new game at level 1 with fresh statistics.
    pub fn start(&mut self, mode: GameMode) -> Result<(), SessionError> {
        if !self.phase().is_menu() {
            return Err(self.transition_error("start a game"));
        }
        self.mode = mode;
        self.level = 1;
        self.stats = GameStats::new();
        tracing::info!(?mode, seed = %self.seed, "game started");
        self.begin_observation()
    }

    fn begin_observation(&mut self) -> Result<(), SessionError> {
        let round = Round::generate(&mut self.rng, self.level, self.mode, &self.settings)?;
        let view_time = round.params().view_time;
        self.stage = Stage::Observation {
            round,
            timer: ViewTimer {
                total: view_time,
                remaining: view_time,
            },
        };
        tracing::debug!(level = self.level, ?view_time, "observation started");
        Ok(())
    }

    /// Advances the view timer.
    ///
    /// Outside the observation phase this does nothing. When the timer runs
    /// out the session moves on to recognition.
    pub fn tick(&mut self, elapsed: Duration) {
        let Stage::Observation { timer, .. } = &mut self.stage else {
            return;
        };
        timer.remaining = timer.remaining.saturating_sub(elapsed);
        if timer.remaining.is_zero() {
            self.begin_recognition();
        }
    }

    /// Ends the observation phase early.
    pub fn skip_observation(&mut self) -> Result<(), SessionError> {
        if !self.phase().is_observation() {
            return Err(self.transition_error("skip observation"));
        }
        self.begin_recognition();
        Ok(())
    }

    fn begin_recognition(&mut self) {
        let stage = std::mem::replace(&mut self.stage, Stage::Menu);
        self.stage = match stage {
            Stage::Observation { round, .. } => {
                tracing::debug!(level = self.level, "recognition started");
                Stage::Recognition {
                    round,
                    selected: HashSet::new(),
                }
            }
            other => other,
        };
    }

    /// Selects a grid shape, or deselects it if already selected.
    ///
    /// Returns whether the shape is selected afterwards.
    pub fn toggle_selection(&mut self, id: ShapeId) -> Result<bool, SessionError> {
        let phase = self.phase();
        let Stage::Recognition { round, selected } = &mut self.stage else {
            return Err(TransitionError {
                phase,
                action: "select shapes",
            }
            .into());
        };
        if round.grid_shape(id).is_none() {
            return Err(SessionError::UnknownShape { id });
        }
        if selected.remove(&id) {
            Ok(false)
        } else {
            selected.insert(id);
            Ok(true)
        }
    }

    /// Scores the selection, applies it to the statistics and shows feedback.
    pub fn confirm_selection(&mut self) -> Result<RoundOutcome, SessionError> {
        if !self.phase().is_recognition() {
            return Err(self.transition_error("confirm a selection"));
        }
        let Stage::Recognition { round, selected } =
            std::mem::replace(&mut self.stage, Stage::Menu)
        else {
            unreachable!("phase checked above");
        };

        let outcome = round.score(&selected);
        self.stats.apply(&outcome);
        tracing::info!(
            level = self.level,
            correct = outcome.correct_count,
            wrong = outcome.wrong_count,
            missed = outcome.missed_count,
            delta = outcome.score_delta,
            score = self.stats.score(),
            "round scored"
        );
        self.stage = Stage::Feedback {
            round,
            selected,
            outcome,
        };
        Ok(outcome)
    }

    /// Moves to the next level and starts its observation phase.
    pub fn next_level(&mut self) -> Result<(), SessionError> {
        if !self.phase().is_feedback() {
            return Err(self.transition_error("advance to the next level"));
        }
        self.level = self.level.saturating_add(1);
        self.begin_observation()
    }

    /// Ends the game after the feedback phase.
    pub fn finish(&mut self) -> Result<(), SessionError> {
        if !self.phase().is_feedback() {
            return Err(self.transition_error("finish the game"));
        }
        let Stage::Feedback { round, .. } = std::mem::replace(&mut self.stage, Stage::Menu) else {
            unreachable!("phase checked above");
        };
        tracing::info!(
            level = self.level,
            score = self.stats.score(),
            best_streak = self.stats.best_streak(),
            "game over"
        );
        self.stage = Stage::GameOver {
            last_round: Some(round),
        };
        Ok(())
    }

    /// Leaves the game-over screen, resetting level and statistics.
    pub fn return_to_menu(&mut self) -> Result<(), SessionError> {
        if !self.phase().is_game_over() {
            return Err(self.transition_error("return to the menu"));
        }
        self.level = 1;
        self.stats = GameStats::new();
        self.stage = Stage::Menu;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ColoringScheme, ShapeKind};

    fn session() -> GameSession {
        GameSession::with_seed(SessionSeed::from([7; 16]), GameSettings::default())
    }

    fn run_out_timer(session: &mut GameSession) {
        while session.phase().is_observation() {
            session.tick(TICK_INTERVAL);
        }
    }

    #[test]
    fn test_full_cycle() {
        let mut session = session();
        assert_eq!(session.phase(), SessionPhase::Menu);
        assert!(session.round().is_none());

        session.start(GameMode::Challenge).unwrap();
        assert_eq!(session.phase(), SessionPhase::Observation);
        assert_eq!(session.level(), 1);

        run_out_timer(&mut session);
        assert_eq!(session.phase(), SessionPhase::Recognition);

        let targets: Vec<_> = session
            .round()
            .unwrap()
            .targets()
            .iter()
            .map(|shape| shape.id())
            .collect();
        for id in &targets {
            assert!(session.toggle_selection(*id).unwrap());
        }
        let outcome = session.confirm_selection().unwrap();
        assert!(outcome.streak_continues);
        assert_eq!(outcome.score_delta, 30);
        assert_eq!(session.phase(), SessionPhase::Feedback);
        assert_eq!(session.outcome(), Some(&outcome));
        assert_eq!(session.stats().current_streak(), 1);

        session.next_level().unwrap();
        assert_eq!(session.level(), 2);
        assert_eq!(session.phase(), SessionPhase::Observation);

        session.skip_observation().unwrap();
        session.confirm_selection().unwrap();
        session.finish().unwrap();
        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert!(session.round().is_some());
        assert_eq!(session.stats().rounds_played(), 2);

        session.return_to_menu().unwrap();
        assert_eq!(session.phase(), SessionPhase::Menu);
        assert_eq!(session.level(), 1);
        assert_eq!(session.stats(), &GameStats::new());
    }

    #[test]
    fn test_view_timer_length() {
        let mut session = session();
        session.start(GameMode::Challenge).unwrap();
        assert_eq!(
            session.view_time(),
            Some((Duration::from_millis(9500), Duration::from_millis(9500)))
        );

        let mut ticks = 0;
        while session.phase().is_observation() {
            session.tick(TICK_INTERVAL);
            ticks += 1;
        }
        assert_eq!(ticks, 95);
    }

    #[test]
    fn test_ticks_outside_observation_are_ignored() {
        let mut session = session();
        session.tick(Duration::from_secs(60));
        assert_eq!(session.phase(), SessionPhase::Menu);

        session.start(GameMode::Challenge).unwrap();
        run_out_timer(&mut session);
        session.tick(Duration::from_secs(60));
        assert_eq!(session.phase(), SessionPhase::Recognition);
        assert!(session.view_time().is_none());

        session.confirm_selection().unwrap();
        session.tick(Duration::from_secs(60));
        assert_eq!(session.phase(), SessionPhase::Feedback);
    }

    #[test]
    fn test_next_level_restarts_timer() {
        let mut session = session();
        session.start(GameMode::Challenge).unwrap();
        session.tick(Duration::from_secs(5));
        session.skip_observation().unwrap();
        session.confirm_selection().unwrap();
        session.next_level().unwrap();
        assert_eq!(
            session.view_time(),
            Some((Duration::from_secs(9), Duration::from_secs(9)))
        );
    }

    #[test]
    fn test_illegal_transitions() {
        let mut session = session();
        assert!(matches!(
            session.confirm_selection(),
            Err(SessionError::Transition(TransitionError {
                phase: SessionPhase::Menu,
                ..
            }))
        ));
        assert!(session.next_level().is_err());
        assert!(session.finish().is_err());
        assert!(session.return_to_menu().is_err());
        assert!(session.skip_observation().is_err());

        session.start(GameMode::Challenge).unwrap();
        assert!(session.start(GameMode::Challenge).is_err());
        let id = session.round().unwrap().targets()[0].id();
        assert!(session.toggle_selection(id).is_err());
        assert!(session.set_settings(GameSettings::default()).is_err());
    }

    #[test]
    fn test_toggle_selection() {
        let mut session = session();
        session.start(GameMode::Challenge).unwrap();
        session.skip_observation().unwrap();

        let id = session.round().unwrap().grid()[0].id();
        assert!(session.toggle_selection(id).unwrap());
        assert!(session.selected().unwrap().contains(&id));
        assert!(!session.toggle_selection(id).unwrap());
        assert!(session.selected().unwrap().is_empty());

        let stranger = ShapeId::next();
        assert!(matches!(
            session.toggle_selection(stranger),
            Err(SessionError::UnknownShape { .. })
        ));
    }

    #[test]
    fn test_negative_round_keeps_score_at_zero() {
        let mut session = session();
        session.start(GameMode::Challenge).unwrap();
        session.skip_observation().unwrap();
        let wrong: Vec<_> = {
            let round = session.round().unwrap();
            round
                .grid()
                .iter()
                .map(|shape| shape.id())
                .filter(|id| !round.is_target(*id))
                .collect()
        };
        for id in wrong {
            session.toggle_selection(id).unwrap();
        }
        let outcome = session.confirm_selection().unwrap();
        assert!(outcome.score_delta < 0);
        assert_eq!(session.stats().score(), 0);
        assert_eq!(session.stats().current_streak(), 0);
    }

    #[test]
    fn test_settings_apply_to_next_game() {
        let mut session = session();
        session
            .update_settings(|settings| settings.toggle_kind(ShapeKind::Circle))
            .unwrap();
        let only_stars = GameSettings::new([ShapeKind::Star], [ColoringScheme::Quarters]).unwrap();
        session.set_settings(only_stars).unwrap();
        session.start(GameMode::Training).unwrap();
        for shape in session.round().unwrap().grid() {
            assert_eq!(shape.kind(), ShapeKind::Star);
            assert_eq!(shape.scheme(), ColoringScheme::Quarters);
        }
    }

    #[test]
    fn test_refused_settings_change_is_reported() {
        let mut session = GameSession::with_seed(
            SessionSeed::from([1; 16]),
            GameSettings::new([ShapeKind::Square], ColoringScheme::ALL).unwrap(),
        );
        let result = session.update_settings(|settings| settings.toggle_kind(ShapeKind::Square));
        assert!(matches!(
            result,
            Err(SessionError::Settings(SettingsError::LastKind { .. }))
        ));
        assert_eq!(session.settings().enabled_kinds(), [ShapeKind::Square]);
    }

    #[test]
    fn test_same_seed_same_rounds() {
        let mut a = session();
        let mut b = session();
        a.start(GameMode::Challenge).unwrap();
        b.start(GameMode::Challenge).unwrap();
        let grid_a = a.round().unwrap().grid();
        let grid_b = b.round().unwrap().grid();
        assert_eq!(grid_a.len(), grid_b.len());
        for (x, y) in grid_a.iter().zip(grid_b) {
            assert!(x.same_appearance(y));
        }
    }
}
