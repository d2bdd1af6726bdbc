use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::{Block, Gauge, Widget as _},
};

use super::ScreenContext;
use crate::ui::widgets::{KeyHelp, ShapeGridDisplay, color, style};

const HELP: &[KeyHelp] = &[("Enter", "Ready"), ("q", "Quit")];

/// Memorize-set columns; the set never exceeds two rows.
const TARGET_COLUMNS: usize = 6;

pub(super) fn render(
    ctx: &ScreenContext<'_>,
    area: Rect,
    buf: &mut Buffer,
) -> &'static [KeyHelp] {
    let (Some(round), Some((remaining, total))) = (ctx.session.round(), ctx.session.view_time())
    else {
        return HELP;
    };

    let targets = ShapeGridDisplay::new(round.targets(), TARGET_COLUMNS)
        .block(Block::bordered().border_style(style::DIM));
    let [title_area, gauge_area, targets_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(targets.height()),
    ])
    .flex(Flex::Center)
    .spacing(1)
    .areas(area);

    Line::styled(
        format!("Memorize these {} shapes", round.targets().len()),
        style::TITLE,
    )
    .centered()
    .render(title_area, buf);

    let ratio = if total.is_zero() {
        0.0
    } else {
        (remaining.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
    };
    Gauge::default()
        .ratio(ratio)
        .label(format!("{:.1}s", remaining.as_secs_f64()))
        .gauge_style(style::DEFAULT.fg(color::CYAN))
        .render(
            gauge_area.centered_horizontally(Constraint::Length(targets.width())),
            buf,
        );

    let width = targets.width();
    targets.render(
        targets_area.centered_horizontally(Constraint::Length(width)),
        buf,
    );
    HELP
}
