#![forbid(unsafe_code)]

//! Row-major cell grid.

use feed_core::geometry::Rect;

use crate::cell::{Cell, CellContent};

/// A 2D grid of cells.
///
/// Out-of-bounds writes are silently clipped; out-of-bounds reads return
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a buffer filled with empty cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width as usize * height as usize],
        }
    }

    /// Width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer area.
    #[inline]
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Get the cell at `(x, y)`.
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Get a mutable reference to the cell at `(x, y)`.
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Write a cell of display `width` columns at `(x, y)`.
    ///
    /// Wide cells that would straddle the right edge are not drawn. Any wide
    /// glyph partially overwritten is cleared so no orphan continuation
    /// cells remain.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell, width: u16) {
        if width == 0 || y >= self.height || x.saturating_add(width) > self.width {
            return;
        }

        self.clear_overlap(x, y);
        if let Some(c) = self.get_mut(x, y) {
            *c = cell;
        }
        for dx in 1..width {
            self.clear_overlap(x + dx, y);
            if let Some(c) = self.get_mut(x + dx, y) {
                *c = Cell {
                    content: CellContent::Continuation,
                    ..cell
                };
            }
        }
        // A continuation that used to belong to a head we just replaced.
        if let Some(c) = self.get_mut(x + width, y)
            && c.is_continuation()
        {
            c.content = CellContent::Empty;
        }
    }

    /// If `(x, y)` is part of a wide glyph, blank the whole glyph.
    fn clear_overlap(&mut self, x: u16, y: u16) {
        let Some(cell) = self.get(x, y) else {
            return;
        };
        if !cell.is_continuation() {
            return;
        }
        let mut head = x;
        while head > 0 {
            head -= 1;
            let is_cont = self.get(head, y).is_some_and(Cell::is_continuation);
            if let Some(c) = self.get_mut(head, y) {
                c.content = CellContent::Empty;
            }
            if !is_cont {
                break;
            }
        }
    }

    /// Fill a rectangle with `cell`, clipped to the buffer.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let rect = rect.intersection(&self.area());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if let Some(c) = self.get_mut(x, y) {
                    *c = cell;
                }
            }
        }
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cells of row `y` (empty slice when out of bounds).
    pub fn row_cells(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Render a buffer as plain text, one line per row.
///
/// Empty cells become spaces; continuation cells are skipped so wide glyphs
/// appear once.
pub fn buffer_to_text(buf: &Buffer) -> String {
    let mut out = String::with_capacity((buf.width() as usize + 1) * buf.height() as usize);
    for y in 0..buf.height() {
        if y > 0 {
            out.push('\n');
        }
        for cell in buf.row_cells(y) {
            match cell.content {
                CellContent::Empty => out.push(' '),
                CellContent::Char(c) => out.push(c),
                CellContent::Continuation => {}
            }
        }
    }
    out
}
