use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::{Block, Paragraph, Widget as _, Wrap},
};

use super::ScreenContext;
use crate::ui::widgets::{KeyHelp, StatsDisplay, style};

const HELP: &[KeyHelp] = &[("Enter/m", "Menu"), ("q", "Quit")];

pub(super) fn render(
    ctx: &ScreenContext<'_>,
    area: Rect,
    buf: &mut Buffer,
) -> &'static [KeyHelp] {
    let session = ctx.session;
    let stats = StatsDisplay::new(session.stats(), session.level())
        .block(Block::bordered().title(Line::from("FINAL").centered()));

    let [title_area, stats_area, flavor_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(stats.height()),
        Constraint::Length(3),
    ])
    .flex(Flex::Center)
    .spacing(1)
    .areas(area);

    Line::styled("GAME OVER", style::TITLE)
        .centered()
        .render(title_area, buf);
    let width = stats.width();
    stats.render(
        stats_area.centered_horizontally(Constraint::Length(width)),
        buf,
    );

    let (text, text_style) = match ctx.flavor_text {
        Some(text) => (text, style::DEFAULT),
        None => ("Thinking about your game...", style::DIM),
    };
    Paragraph::new(text)
        .style(text_style)
        .centered()
        .wrap(Wrap { trim: true })
        .render(
            flavor_area.centered_horizontally(Constraint::Length(60)),
            buf,
        );
    HELP
}
