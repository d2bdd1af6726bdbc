use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use memore_engine::{
    GameMode, GameSession, SchemeGroup, SessionError, SessionPhase, ShapeKind, TICK_INTERVAL,
};
use ratatui::Frame;

use crate::{
    command::play::screens::{self, GRID_COLUMNS, ScreenContext},
    flavor::{FALLBACK_TEXT, FlavorText, GameSummary, PendingFlavorText},
    tui::{App, Tui},
};

#[derive(Debug)]
pub(crate) struct PlayApp {
    session: GameSession,
    mode: GameMode,
    cursor: usize,
    show_settings: bool,
    notice: Option<String>,
    flavor_service: Option<Arc<dyn FlavorText>>,
    flavor: Option<PendingFlavorText>,
    is_exiting: bool,
}

impl PlayApp {
    pub(crate) fn new(
        session: GameSession,
        mode: GameMode,
        flavor_service: Option<Arc<dyn FlavorText>>,
    ) -> Self {
        Self {
            session,
            mode,
            cursor: 0,
            show_settings: false,
            notice: None,
            flavor_service,
            flavor: None,
            is_exiting: false,
        }
    }

    fn report(&mut self, result: Result<(), SessionError>) {
        if let Err(e) = result {
            tracing::warn!("{e}");
            self.notice = Some(e.to_string());
        }
    }

    /// Resets per-round UI state after an attempt to generate a new round.
    fn round_started(&mut self, result: Result<(), SessionError>) {
        self.cursor = 0;
        if result.is_err() {
            self.report(result);
            return;
        }
        self.notice = self
            .session
            .round()
            .filter(|round| round.shortfall() > 0)
            .map(|round| {
                format!(
                    "The current settings allow fewer shapes than this level asks for ({} missing)",
                    round.shortfall()
                )
            });
    }

    fn handle_key(&mut self, code: KeyCode) {
        if code == KeyCode::Char('q') {
            self.is_exiting = true;
            return;
        }
        match self.session.phase() {
            SessionPhase::Menu => self.handle_menu_key(code),
            SessionPhase::Observation => {
                if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                    let result = self.session.skip_observation();
                    self.report(result);
                }
            }
            SessionPhase::Recognition => self.handle_recognition_key(code),
            SessionPhase::Feedback => match code {
                KeyCode::Enter | KeyCode::Char('n') => {
                    let result = self.session.next_level();
                    self.round_started(result);
                }
                KeyCode::Char('f') => {
                    let result = self.session.finish();
                    self.report(result);
                    self.request_flavor_text();
                }
                _ => {}
            },
            SessionPhase::GameOver => {
                if matches!(code, KeyCode::Enter | KeyCode::Char('m')) {
                    let result = self.session.return_to_menu();
                    self.report(result);
                    self.flavor = None;
                    self.notice = None;
                }
            }
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        if self.show_settings {
            let result = match code {
                KeyCode::Char(c @ '1'..='6') => {
                    let index = c as usize - '1' as usize;
                    let kind = ShapeKind::ALL[index];
                    self.session
                        .update_settings(|settings| settings.toggle_kind(kind))
                }
                KeyCode::Char(c @ 'a'..='c') => {
                    let index = c as usize - 'a' as usize;
                    let group = SchemeGroup::ALL[index];
                    self.session
                        .update_settings(|settings| settings.toggle_scheme_group(group))
                }
                KeyCode::Esc | KeyCode::Char('s') => {
                    self.show_settings = false;
                    Ok(())
                }
                _ => Ok(()),
            };
            self.notice = None;
            self.report(result);
            return;
        }

        match code {
            KeyCode::Left => self.mode = cycle_mode(self.mode, -1),
            KeyCode::Right => self.mode = cycle_mode(self.mode, 1),
            KeyCode::Char('s') => {
                self.show_settings = true;
                self.notice = None;
            }
            KeyCode::Enter => {
                let result = self.session.start(self.mode);
                self.round_started(result);
            }
            _ => {}
        }
    }

    fn handle_recognition_key(&mut self, code: KeyCode) {
        let Some(round) = self.session.round() else {
            return;
        };
        let len = round.grid().len();
        match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                self.cursor = move_cursor(self.cursor, len, GRID_COLUMNS, code);
            }
            KeyCode::Char(' ') => {
                if let Some(id) = round.grid().get(self.cursor).map(|shape| shape.id()) {
                    let result = self.session.toggle_selection(id).map(|_| ());
                    self.report(result);
                }
            }
            KeyCode::Enter => {
                let result = self.session.confirm_selection().map(|_| ());
                self.report(result);
            }
            _ => {}
        }
    }

    fn request_flavor_text(&mut self) {
        if !self.session.phase().is_game_over() {
            return;
        }
        self.flavor = Some(match &self.flavor_service {
            Some(service) => PendingFlavorText::spawn(
                Arc::clone(service),
                GameSummary::from_session(&self.session),
            ),
            None => PendingFlavorText::ready(FALLBACK_TEXT),
        });
    }
}

fn cycle_mode(mode: GameMode, step: isize) -> GameMode {
    let len = GameMode::ALL.len();
    let index = GameMode::ALL
        .iter()
        .position(|m| *m == mode)
        .unwrap_or_default();
    GameMode::ALL[(index + len).wrapping_add_signed(step) % len]
}

/// Moves the grid cursor, staying inside the grid.
fn move_cursor(cursor: usize, len: usize, columns: usize, code: KeyCode) -> usize {
    if len == 0 {
        return 0;
    }
    let moved = match code {
        KeyCode::Left => cursor.saturating_sub(1),
        KeyCode::Right => cursor + 1,
        KeyCode::Up if cursor >= columns => cursor - columns,
        KeyCode::Down if cursor + columns < len => cursor + columns,
        _ => cursor,
    };
    moved.min(len - 1)
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_interval(Some(TICK_INTERVAL));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: &Event) {
        if let Some(key) = event.as_key_event()
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(key.code);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let ctx = ScreenContext {
            session: &self.session,
            mode: self.mode,
            cursor: self.cursor,
            show_settings: self.show_settings,
            notice: self.notice.as_deref(),
            flavor_text: self.flavor.as_ref().and_then(PendingFlavorText::text),
        };
        screens::draw(&ctx, frame);
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.session.tick(TICK_INTERVAL);
        if let Some(flavor) = &mut self.flavor {
            flavor.poll();
        }
    }
}

#[cfg(test)]
mod tests {
    use memore_engine::{GameSettings, SessionSeed};

    use super::*;

    fn app() -> PlayApp {
        let seed: SessionSeed = "5eed5eed5eed5eed5eed5eed5eed5eed".parse().unwrap();
        PlayApp::new(
            GameSession::with_seed(seed, GameSettings::default()),
            GameMode::Challenge,
            None,
        )
    }

    #[test]
    fn test_move_cursor() {
        // 10 shapes in rows of 4
        assert_eq!(move_cursor(0, 10, 4, KeyCode::Left), 0);
        assert_eq!(move_cursor(0, 10, 4, KeyCode::Right), 1);
        assert_eq!(move_cursor(9, 10, 4, KeyCode::Right), 9);
        assert_eq!(move_cursor(1, 10, 4, KeyCode::Down), 5);
        assert_eq!(move_cursor(6, 10, 4, KeyCode::Down), 6);
        assert_eq!(move_cursor(5, 10, 4, KeyCode::Up), 1);
        assert_eq!(move_cursor(2, 10, 4, KeyCode::Up), 2);
        assert_eq!(move_cursor(3, 0, 4, KeyCode::Right), 0);
    }

    #[test]
    fn test_cycle_mode() {
        assert_eq!(cycle_mode(GameMode::Challenge, 1), GameMode::Infinite);
        assert_eq!(cycle_mode(GameMode::Infinite, 1), GameMode::Training);
        assert_eq!(cycle_mode(GameMode::Training, -1), GameMode::Infinite);
    }

    #[test]
    fn test_play_through_one_round() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.session.phase(), SessionPhase::Observation);
        assert!(app.notice.is_none());

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.session.phase(), SessionPhase::Recognition);

        let first = app.session.round().unwrap().grid()[0].id();
        app.handle_key(KeyCode::Char(' '));
        assert!(app.session.selected().unwrap().contains(&first));
        app.handle_key(KeyCode::Right);
        assert_eq!(app.cursor, 1);

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.session.phase(), SessionPhase::Feedback);
        assert_eq!(app.session.stats().rounds_played(), 1);

        app.handle_key(KeyCode::Char('n'));
        assert_eq!(app.session.phase(), SessionPhase::Observation);
        assert_eq!(app.session.level(), 2);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_game_over_without_service_shows_fallback() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('f'));
        assert_eq!(app.session.phase(), SessionPhase::GameOver);
        assert_eq!(
            app.flavor.as_ref().and_then(PendingFlavorText::text),
            Some(FALLBACK_TEXT)
        );

        app.handle_key(KeyCode::Char('m'));
        assert_eq!(app.session.phase(), SessionPhase::Menu);
        assert!(app.flavor.is_none());
    }

    #[test]
    fn test_ticks_end_observation() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        let (_, total) = app.session.view_time().unwrap();
        let ticks = total.as_millis() / TICK_INTERVAL.as_millis();
        for _ in 0..ticks {
            app.session.tick(TICK_INTERVAL);
        }
        assert_eq!(app.session.phase(), SessionPhase::Recognition);
    }

    #[test]
    fn test_settings_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Char('s'));
        assert!(app.show_settings);

        app.handle_key(KeyCode::Char('6'));
        assert!(!app.session.settings().is_kind_enabled(ShapeKind::Star));
        app.handle_key(KeyCode::Char('c'));
        assert!(!app.session.settings().is_group_enabled(SchemeGroup::Complex));

        // keys 2..=5 leave only the circle, which cannot be disabled
        for key in ['2', '3', '4', '5', '1'] {
            app.handle_key(KeyCode::Char(key));
        }
        assert_eq!(app.session.settings().enabled_kinds(), &[ShapeKind::Circle]);
        assert!(app.notice.as_deref().unwrap().contains("circle"));

        app.handle_key(KeyCode::Esc);
        assert!(!app.show_settings);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.session.phase(), SessionPhase::Observation);
    }

    #[test]
    fn test_quit_from_any_phase() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        assert!(!app.should_exit());
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_exit());
    }
}
