use memore_engine::{GameMode, SchemeGroup, ShapeKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Widget as _},
};

use super::ScreenContext;
use crate::ui::widgets::{KeyHelp, style};

const HELP: &[KeyHelp] = &[
    ("←/→", "Mode"),
    ("Enter", "Start"),
    ("s", "Settings"),
    ("q", "Quit"),
];

const SETTINGS_HELP: &[KeyHelp] = &[
    ("1-6", "Toggle shape"),
    ("a-c", "Toggle colors"),
    ("Esc", "Close"),
    ("q", "Quit"),
];

fn checkbox(enabled: bool) -> &'static str {
    if enabled { "[x]" } else { "[ ]" }
}

pub(super) fn render(
    ctx: &ScreenContext<'_>,
    area: Rect,
    buf: &mut Buffer,
) -> &'static [KeyHelp] {
    let settings = ctx.session.settings();
    let mut lines = vec![
        Line::styled("Visual memory training", style::TITLE),
        Line::default(),
        Line::styled(
            "Memorize the shapes, then pick them out of the grid.",
            style::DEFAULT,
        ),
        Line::default(),
    ];

    let mut mode_spans = vec![Span::styled("Mode: ", style::DIM)];
    for mode in GameMode::ALL {
        let style = if mode == ctx.mode {
            style::CURSOR
        } else {
            style::DIM
        };
        let label = if mode == ctx.mode {
            format!(" <{}> ", mode.name())
        } else {
            format!("  {}  ", mode.name())
        };
        mode_spans.push(Span::styled(label, style));
    }
    lines.push(Line::from(mode_spans));
    lines.push(Line::styled(
        format!("Seed: {}", ctx.session.seed()),
        style::DIM,
    ));
    lines.push(Line::default());

    if ctx.show_settings {
        lines.push(Line::styled("Shapes", style::TITLE));
        for (i, kind) in ShapeKind::ALL.into_iter().enumerate() {
            lines.push(Line::styled(
                format!(
                    "{} {} {} {}",
                    i + 1,
                    checkbox(settings.is_kind_enabled(kind)),
                    kind.glyph(),
                    kind.name()
                ),
                style::DEFAULT,
            ));
        }
        lines.push(Line::styled("Colors", style::TITLE));
        for (key, group) in ['a', 'b', 'c'].into_iter().zip(SchemeGroup::ALL) {
            lines.push(Line::styled(
                format!(
                    "{key} {} {}",
                    checkbox(settings.is_group_enabled(group)),
                    group.label()
                ),
                style::DEFAULT,
            ));
        }
    } else {
        let kinds: Vec<_> = settings
            .enabled_kinds()
            .iter()
            .map(|kind| kind.name())
            .collect();
        let groups: Vec<_> = SchemeGroup::ALL
            .into_iter()
            .filter(|group| settings.is_group_enabled(*group))
            .map(SchemeGroup::label)
            .collect();
        lines.push(Line::styled(
            format!("Shapes: {}", kinds.join(", ")),
            style::DIM,
        ));
        lines.push(Line::styled(
            format!("Colors: {}", groups.join(", ")),
            style::DIM,
        ));
    }

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX) + 2;
    let block_area = area.centered(Constraint::Length(60), Constraint::Length(height));
    let block = Block::bordered().border_style(style::DIM);
    let inner = block.inner(block_area);
    block.render(block_area, buf);
    Text::from(lines).centered().render(inner, buf);

    if ctx.show_settings { SETTINGS_HELP } else { HELP }
}
