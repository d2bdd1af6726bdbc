use memore_engine::ShapeDescriptor;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::{Block, Widget as _},
};

use super::{GRID_COLUMNS, ScreenContext};
use crate::ui::widgets::{CellMark, KeyHelp, ShapeGridDisplay, style};

const HELP: &[KeyHelp] = &[
    ("←↑↓→", "Move"),
    ("Space", "Select"),
    ("Enter", "Confirm"),
    ("q", "Quit"),
];

pub(super) fn render(
    ctx: &ScreenContext<'_>,
    area: Rect,
    buf: &mut Buffer,
) -> &'static [KeyHelp] {
    let (Some(round), Some(selected)) = (ctx.session.round(), ctx.session.selected()) else {
        return HELP;
    };

    let marks = round
        .grid()
        .iter()
        .map(ShapeDescriptor::id)
        .map(|id| {
            if selected.contains(&id) {
                CellMark::Selected
            } else {
                CellMark::None
            }
        })
        .collect();
    let grid = ShapeGridDisplay::new(round.grid(), GRID_COLUMNS)
        .cursor(Some(ctx.cursor))
        .marks(marks)
        .block(Block::bordered().border_style(style::DIM));

    let [title_area, grid_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(grid.height())])
            .flex(Flex::Center)
            .spacing(1)
            .areas(area);

    Line::styled(
        format!(
            "Find the {} shapes you saw ({} selected)",
            round.targets().len(),
            selected.len()
        ),
        style::TITLE,
    )
    .centered()
    .render(title_area, buf);

    let width = grid.width();
    grid.render(
        grid_area.centered_horizontally(Constraint::Length(width)),
        buf,
    );
    HELP
}
