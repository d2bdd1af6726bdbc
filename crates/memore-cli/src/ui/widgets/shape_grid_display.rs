use memore_engine::ShapeDescriptor;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, BlockExt as _, Widget},
};

use crate::ui::widgets::{CellMark, ShapeDisplay};

const COLUMN_SPACING: u16 = 1;
const ROW_SPACING: u16 = 1;

/// Shapes laid out row by row in a fixed number of columns.
#[derive(Debug)]
pub struct ShapeGridDisplay<'a> {
    shapes: &'a [ShapeDescriptor],
    columns: usize,
    cursor: Option<usize>,
    marks: Vec<CellMark>,
    block: Option<Block<'a>>,
}

impl<'a> ShapeGridDisplay<'a> {
    pub fn new(shapes: &'a [ShapeDescriptor], columns: usize) -> Self {
        Self {
            shapes,
            columns: columns.max(1),
            cursor: None,
            marks: vec![],
            block: None,
        }
    }

    pub fn cursor(self, cursor: Option<usize>) -> Self {
        Self { cursor, ..self }
    }

    /// Marks per shape, in the same order as the shapes.
    pub fn marks(self, marks: Vec<CellMark>) -> Self {
        Self { marks, ..self }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn used_columns(&self) -> u16 {
        super::to_u16(self.columns.min(self.shapes.len()).max(1))
    }

    fn rows(&self) -> u16 {
        super::to_u16(self.shapes.len().div_ceil(self.columns).max(1))
    }

    pub fn width(&self) -> u16 {
        let columns = self.used_columns();
        columns * ShapeDisplay::WIDTH
            + (columns - 1) * COLUMN_SPACING
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        let rows = self.rows();
        rows * ShapeDisplay::HEIGHT
            + (rows - 1) * ROW_SPACING
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for ShapeGridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &ShapeGridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        for (i, shape) in self.shapes.iter().enumerate() {
            let column = super::to_u16(i % self.columns);
            let row = super::to_u16(i / self.columns);
            let x = area.x + column * (ShapeDisplay::WIDTH + COLUMN_SPACING);
            let y = area.y + row * (ShapeDisplay::HEIGHT + ROW_SPACING);
            let cell = Rect::new(x, y, ShapeDisplay::WIDTH, ShapeDisplay::HEIGHT);
            if cell.right() > area.right() || cell.bottom() > area.bottom() {
                continue;
            }
            ShapeDisplay::new(shape.appearance())
                .mark(self.marks.get(i).copied().unwrap_or_default())
                .focused(self.cursor == Some(i))
                .render(cell, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use memore_engine::{ColoringScheme, PaletteColor, ShapeAppearance, ShapeKind};

    use super::*;

    fn shapes(n: usize) -> Vec<ShapeDescriptor> {
        PaletteColor::ALL
            .iter()
            .cycle()
            .zip(ShapeKind::ALL.iter().cycle())
            .take(n)
            .map(|(color, kind)| {
                ShapeDescriptor::new(
                    ShapeAppearance::new(*kind, ColoringScheme::Solid, &[*color]).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_size() {
        let shapes = shapes(10);
        let grid = ShapeGridDisplay::new(&shapes, 4);
        // 4 columns, 3 rows
        assert_eq!(grid.width(), 4 * 6 + 3);
        assert_eq!(grid.height(), 3 * 2 + 2);

        let grid = ShapeGridDisplay::new(&shapes, 4).block(Block::bordered());
        assert_eq!(grid.width(), 4 * 6 + 3 + 2);
        assert_eq!(grid.height(), 3 * 2 + 2 + 2);
    }

    #[test]
    fn test_short_row_is_narrow() {
        let shapes = shapes(2);
        let grid = ShapeGridDisplay::new(&shapes, 8);
        assert_eq!(grid.width(), 2 * 6 + 1);
        assert_eq!(grid.height(), 2);
    }

    #[test]
    fn test_cursor_is_drawn_at_position() {
        let shapes = shapes(5);
        let grid = ShapeGridDisplay::new(&shapes, 3).cursor(Some(4));
        let mut buf = Buffer::empty(Rect::new(0, 0, grid.width(), grid.height()));
        grid.render(buf.area, &mut buf);
        // index 4 is row 1, column 1
        assert_eq!(buf[(7, 3)].symbol(), "[");
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }
}
