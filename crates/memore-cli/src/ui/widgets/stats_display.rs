use memore_engine::GameStats;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

/// Running totals of a game, one label/value pair per line.
#[derive(Debug)]
pub struct StatsDisplay<'a> {
    stats: &'a GameStats,
    level: u32,
    block: Option<Block<'a>>,
}

type Row = (&'static str, fn(&GameStats, u32) -> String);

const ROWS: &[Row] = &[
    ("SCORE:", |stats, _| stats.score().to_string()),
    ("LEVEL:", |_, level| level.to_string()),
    ("ROUNDS:", |stats, _| stats.rounds_played().to_string()),
    ("CORRECT:", |stats, _| stats.correct_answers().to_string()),
    ("WRONG:", |stats, _| stats.wrong_answers().to_string()),
    ("MISSED:", |stats, _| stats.missed_answers().to_string()),
    ("STREAK:", |stats, _| stats.current_streak().to_string()),
    ("BEST:", |stats, _| stats.best_streak().to_string()),
];

impl<'a> StatsDisplay<'a> {
    pub fn new(stats: &'a GameStats, level: u32) -> Self {
        Self {
            stats,
            level,
            block: None,
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::to_u16(ROWS.len()) + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let rows = Layout::vertical(ROWS.iter().map(|_| Constraint::Length(1))).split(area);
        for ((label, value), row) in ROWS.iter().zip(rows.iter()) {
            let [label_area, value_area] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(*row);
            Line::styled(*label, style::DIM).render(label_area, buf);
            Line::styled(value(self.stats, self.level), style::DEFAULT)
                .right_aligned()
                .render(value_area, buf);
        }
    }
}
