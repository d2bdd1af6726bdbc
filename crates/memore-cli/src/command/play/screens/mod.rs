use memore_engine::{GameMode, GameSession, SessionPhase};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Widget as _,
};

use crate::ui::widgets::{HelpDisplay, KeyHelp, style};

mod feedback;
mod game_over;
mod menu;
mod observation;
mod recognition;

/// Columns of the recognition and feedback grids.
pub(crate) const GRID_COLUMNS: usize = 8;

/// Everything the screens need to draw one frame.
#[derive(Debug)]
pub(crate) struct ScreenContext<'a> {
    pub(crate) session: &'a GameSession,
    /// Mode selected in the menu.
    pub(crate) mode: GameMode,
    pub(crate) cursor: usize,
    pub(crate) show_settings: bool,
    pub(crate) notice: Option<&'a str>,
    pub(crate) flavor_text: Option<&'a str>,
}

pub(crate) fn draw(ctx: &ScreenContext<'_>, frame: &mut Frame<'_>) {
    let [header_area, main_area, notice_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());
    let buf = frame.buffer_mut();

    render_header(ctx, header_area, buf);
    let help: &[KeyHelp] = match ctx.session.phase() {
        SessionPhase::Menu => menu::render(ctx, main_area, buf),
        SessionPhase::Observation => observation::render(ctx, main_area, buf),
        SessionPhase::Recognition => recognition::render(ctx, main_area, buf),
        SessionPhase::Feedback => feedback::render(ctx, main_area, buf),
        SessionPhase::GameOver => game_over::render(ctx, main_area, buf),
    };
    if let Some(notice) = ctx.notice {
        Line::styled(notice, style::NOTICE)
            .centered()
            .render(notice_area, buf);
    }
    HelpDisplay::new(help).render(help_area, buf);
}

fn render_header(ctx: &ScreenContext<'_>, area: Rect, buf: &mut Buffer) {
    let session = ctx.session;
    let mut spans = vec![Span::styled("MEMORE", style::TITLE)];
    if !session.phase().is_menu() {
        spans.extend([
            Span::styled(format!("  level {}", session.level()), style::DEFAULT),
            Span::styled(format!("  {}", session.mode().name()), style::DIM),
            Span::styled(format!("  score {}", session.stats().score()), style::DEFAULT),
        ]);
    }
    Line::from(spans).centered().render(area, buf);
}
