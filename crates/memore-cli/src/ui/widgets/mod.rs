use ratatui::{layout::Rect, widgets::Block};

pub use self::{help_display::*, shape_display::*, shape_grid_display::*, stats_display::*};

mod help_display;
mod shape_display;
mod shape_grid_display;
mod stats_display;

pub mod color {
    use memore_engine::PaletteColor;
    use ratatui::style::Color;

    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(60, 60, 60);
    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const GREEN: Color = Color::Rgb(0, 220, 0);
    pub const RED: Color = Color::Rgb(255, 60, 60);
    pub const YELLOW: Color = Color::Rgb(255, 220, 0);

    pub const fn palette(color: PaletteColor) -> Color {
        let (r, g, b) = color.rgb();
        Color::Rgb(r, g, b)
    }
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const DIM: Style = fg_bg(color::GRAY, color::BLACK);
    pub const TITLE: Style = fg_bg(color::CYAN, color::BLACK).add_modifier(Modifier::BOLD);
    pub const NOTICE: Style = fg_bg(color::YELLOW, color::BLACK);
    pub const SELECTED: Style = fg_bg(color::WHITE, color::DARK_GRAY);
    pub const CURSOR: Style = Style::new().fg(color::WHITE).add_modifier(Modifier::BOLD);

    pub const CORRECT: Style = Style::new().fg(color::GREEN).add_modifier(Modifier::BOLD);
    pub const WRONG: Style = Style::new().fg(color::RED).add_modifier(Modifier::BOLD);
    pub const MISSED: Style = Style::new().fg(color::YELLOW).add_modifier(Modifier::BOLD);
}

fn block_vertical_margin(block: Option<&Block>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&Block>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
