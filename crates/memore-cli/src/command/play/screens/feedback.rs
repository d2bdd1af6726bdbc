use memore_engine::ShapeDescriptor;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Widget as _},
};

use super::{GRID_COLUMNS, ScreenContext};
use crate::ui::widgets::{CellMark, KeyHelp, ShapeGridDisplay, StatsDisplay, style};

const HELP: &[KeyHelp] = &[
    ("Enter/n", "Next level"),
    ("f", "Finish"),
    ("q", "Quit"),
];

pub(super) fn render(
    ctx: &ScreenContext<'_>,
    area: Rect,
    buf: &mut Buffer,
) -> &'static [KeyHelp] {
    let session = ctx.session;
    let (Some(round), Some(selected), Some(outcome)) =
        (session.round(), session.selected(), session.outcome())
    else {
        return HELP;
    };

    let marks = round
        .grid()
        .iter()
        .map(ShapeDescriptor::id)
        .map(|id| CellMark::Verdict(round.verdict(id, selected)))
        .collect();
    let grid = ShapeGridDisplay::new(round.grid(), GRID_COLUMNS)
        .marks(marks)
        .block(Block::bordered().border_style(style::DIM));
    let stats = StatsDisplay::new(session.stats(), session.level())
        .block(Block::bordered().title(Line::from("STATS").centered()));

    let [title_area, body_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(u16::max(grid.height(), stats.height())),
    ])
    .flex(Flex::Center)
    .spacing(1)
    .areas(area);
    let [grid_area, stats_area] = Layout::horizontal([
        Constraint::Length(grid.width()),
        Constraint::Length(stats.width()),
    ])
    .flex(Flex::Center)
    .spacing(2)
    .areas(body_area);

    let delta_style = if outcome.score_delta >= 0 {
        style::CORRECT
    } else {
        style::WRONG
    };
    let title = if outcome.streak_continues {
        Span::styled("Perfect!  ", style::CORRECT)
    } else {
        Span::raw("")
    };
    Line::from(vec![
        title,
        Span::styled(format!("✓ {}  ", outcome.correct_count), style::CORRECT),
        Span::styled(format!("✗ {}  ", outcome.wrong_count), style::WRONG),
        Span::styled(format!("! {}  ", outcome.missed_count), style::MISSED),
        Span::styled(format!("{:+} points", outcome.score_delta), delta_style),
    ])
    .centered()
    .render(title_area, buf);

    grid.render(grid_area, buf);
    let stats_height = stats.height();
    stats.render(
        stats_area.centered_vertically(Constraint::Length(stats_height)),
        buf,
    );
    HELP
}
