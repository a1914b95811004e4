/// Character grid that the rasterizer draws into.
use termcube_core::Color;

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            color: Color::Empty,
            bold: false,
        }
    }
}

/// 2D grid of styled character cells, row-major.
///
/// Writes outside the grid are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl PixelGrid {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize((width as usize) * (height as usize), Cell::default());
    }

    #[inline(always)]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Write by flat index. `index` must come from [`PixelGrid::index`].
    pub(crate) fn set_at(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// Blank every character. Colors and weights are left as they were.
    pub fn clear_chars(&mut self) {
        for cell in &mut self.cells {
            cell.ch = ' ';
        }
    }

    /// Write `text` left to right from `(x, y)`, stopping at the right edge.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, color: Color, bold: bool) {
        for (i, ch) in text.chars().enumerate() {
            let cx = x + i as i32;
            if cx >= self.width as i32 {
                break;
            }
            self.set(cx, y, Cell { ch, color, bold });
        }
    }

    /// Rows as strings, for tests and debugging.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width.max(1) as usize)
            .map(|row| row.iter().map(|c| c.ch).collect())
    }
}
