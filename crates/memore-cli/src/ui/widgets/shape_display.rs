use memore_engine::{ColoringScheme, PaletteColor, ShapeAppearance, ShapeVerdict};
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::ui::widgets::{color, style};

/// Extra state drawn around a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellMark {
    #[default]
    None,
    Selected,
    Verdict(ShapeVerdict),
}

/// A shape drawn as a 2x2 block of its glyph, each glyph carrying the color of
/// the region it sits in.
///
/// ```text
/// [● ● ]
/// [● ● ]
/// ```
///
/// The outer columns hold the cursor brackets or the verdict symbol.
#[derive(Debug)]
pub struct ShapeDisplay<'a> {
    appearance: &'a ShapeAppearance,
    mark: CellMark,
    focused: bool,
}

/// Glyph positions relative to the cell, in the order of [`region_colors`].
const GLYPH_OFFSETS: [(u16, u16); 4] = [(1, 0), (3, 0), (1, 1), (3, 1)];

impl<'a> ShapeDisplay<'a> {
    pub const WIDTH: u16 = 6;
    pub const HEIGHT: u16 = 2;

    pub fn new(appearance: &'a ShapeAppearance) -> Self {
        Self {
            appearance,
            mark: CellMark::None,
            focused: false,
        }
    }

    pub fn mark(self, mark: CellMark) -> Self {
        Self { mark, ..self }
    }

    pub fn focused(self, focused: bool) -> Self {
        Self { focused, ..self }
    }
}

/// Colors of the top-left, top-right, bottom-left and bottom-right regions.
pub fn region_colors(scheme: ColoringScheme, colors: &[PaletteColor]) -> [PaletteColor; 4] {
    match (scheme, colors) {
        (ColoringScheme::Solid, &[c]) => [c; 4],
        (ColoringScheme::VerticalHalf, &[left, right]) => [left, right, left, right],
        (ColoringScheme::HorizontalHalf, &[top, bottom]) => [top, top, bottom, bottom],
        (ColoringScheme::Quarters, &[tl, tr, bl, br]) => [tl, tr, bl, br],
        // appearances are validated on construction
        _ => unreachable!("{scheme:?} with {} colors", colors.len()),
    }
}

fn verdict_symbol(verdict: ShapeVerdict) -> Option<(char, Style)> {
    match verdict {
        ShapeVerdict::Correct => Some(('✓', style::CORRECT)),
        ShapeVerdict::Wrong => Some(('✗', style::WRONG)),
        ShapeVerdict::Missed => Some(('!', style::MISSED)),
        ShapeVerdict::Unselected => None,
    }
}

impl Widget for ShapeDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &ShapeDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let area = area.intersection(buf.area);
        if area.width < ShapeDisplay::WIDTH || area.height < ShapeDisplay::HEIGHT {
            return;
        }
        let cell_area = Rect::new(area.x, area.y, ShapeDisplay::WIDTH, ShapeDisplay::HEIGHT);
        let base = if self.mark == CellMark::Selected {
            style::SELECTED
        } else {
            style::DEFAULT
        };
        buf.set_style(cell_area, base);

        let glyph = self.appearance.kind().glyph();
        let colors = region_colors(self.appearance.scheme(), self.appearance.colors());
        for ((dx, dy), color) in GLYPH_OFFSETS.into_iter().zip(colors) {
            if let Some(cell) = buf.cell_mut((area.x + dx, area.y + dy)) {
                cell.set_char(glyph).set_fg(color::palette(color));
            }
        }

        let right = area.x + ShapeDisplay::WIDTH - 1;
        if self.focused {
            for y in [area.y, area.y + 1] {
                buf.set_string(area.x, y, "[", style::CURSOR);
                buf.set_string(right, y, "]", style::CURSOR);
            }
        }
        if let CellMark::Verdict(verdict) = self.mark
            && let Some((symbol, style)) = verdict_symbol(verdict)
            && let Some(cell) = buf.cell_mut((area.x, area.y))
        {
            cell.set_char(symbol).set_style(style);
        }
    }
}
