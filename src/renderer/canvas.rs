//! Character canvas: world pixels mapped onto terminal cells

use crossterm::style::Color;

use crate::consts::{HEIGHT, WIDTH};
use crate::sim::Rect;
use crate::ui::{TITLE_SIZE, TextLine};

/// World pixels covered by one terminal cell (cells are about twice as tall as wide)
pub const CELL_WIDTH: f32 = 8.0;
pub const CELL_HEIGHT: f32 = 16.0;
pub const COLS: usize = (WIDTH / CELL_WIDTH) as usize;
pub const ROWS: usize = ((HEIGHT + CELL_HEIGHT - 1.0) / CELL_HEIGHT) as usize;

/// Sky (light blue)
pub const BG_COLOR: Color = Color::Rgb { r: 51, g: 153, b: 255 };
pub const TEXT_COLOR: Color = Color::Rgb { r: 255, g: 255, b: 255 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bold: bool,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        fg: TEXT_COLOR,
        bold: false,
    };
}

/// A grid of cells the size of the visible playfield (or smaller)
#[derive(Debug, Clone)]
pub struct Canvas {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::BLANK; cols * rows],
        }
    }

    /// Canvas for a terminal of the given size, clipped to the playfield
    pub fn for_terminal(term_cols: u16, term_rows: u16) -> Self {
        Self::new(COLS.min(term_cols as usize), ROWS.min(term_rows as usize))
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn put(&mut self, col: usize, row: usize, cell: Cell) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = cell;
        }
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Fill every cell the rectangle touches
    pub fn fill_rect(&mut self, rect: &Rect, ch: char, fg: Color) {
        let c0 = (rect.left() / CELL_WIDTH).floor().max(0.0) as i64;
        let c1 = (rect.right() / CELL_WIDTH).ceil().min(self.cols as f32) as i64;
        let r0 = (rect.top() / CELL_HEIGHT).floor().max(0.0) as i64;
        let r1 = (rect.bottom() / CELL_HEIGHT).ceil().min(self.rows as f32) as i64;
        let cell = Cell { ch, fg, bold: false };
        for row in r0..r1 {
            for col in c0..c1 {
                self.put(col as usize, row as usize, cell);
            }
        }
    }

    /// Draw a line of text centered horizontally; title-sized text is bold capitals
    pub fn text(&mut self, line: &TextLine, fg: Color) {
        let row = (line.y / CELL_HEIGHT).floor().max(0.0) as usize;
        let big = line.size >= TITLE_SIZE;
        let text = if big {
            line.text.to_uppercase()
        } else {
            line.text.clone()
        };
        let len = text.chars().count();
        let start = self.cols.saturating_sub(len) / 2;
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i, row, Cell { ch, fg, bold: big });
        }
    }
}
