#![forbid(unsafe_code)]

//! Frame = Buffer + hit grid for a render pass.
//!
//! The `Frame` is the render target that `Model::view()` writes to. Besides
//! the cell grid it records which interactive element owns each cell, so a
//! mouse click can be resolved back to the element that was drawn there.
//!
//! # Usage
//!
//! ```
//! use feed_core::geometry::Rect;
//! use feed_render::frame::{Frame, HitId};
//! use feed_render::style::Style;
//!
//! let mut frame = Frame::new(20, 2);
//! frame.print_text(0, 0, "Hi", Style::new(), 20);
//! frame.register_hit(Rect::new(0, 0, 20, 1), HitId::new(1), 42);
//! assert_eq!(frame.hit_test(5, 0), Some((HitId::new(1), 42)));
//! assert_eq!(frame.hit_test(5, 1), None);
//! ```

use feed_core::geometry::Rect;
use unicode_segmentation::UnicodeSegmentation;

use crate::buffer::Buffer;
use crate::cell::{Cell, CellContent};
use crate::grapheme_width;
use crate::style::Style;

/// Identifier for a clickable region in the hit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    /// Create a new hit ID from a raw value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Opaque user data attached to a hit region (e.g. a list index).
pub type HitData = u64;

/// Box-drawing characters for borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderChars {
    /// Rounded corners with light lines.
    pub const ROUNDED: Self = Self {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        horizontal: '─',
        vertical: '│',
    };

    /// Square corners with light lines.
    pub const SQUARE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    };
}

/// A render target: cells plus interactive regions.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The cell grid.
    pub buffer: Buffer,
    hits: Vec<Option<(HitId, HitData)>>,
}

impl Frame {
    /// Create an empty frame.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hits: vec![None; width as usize * height as usize],
        }
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.buffer.width()
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// The full frame area.
    #[inline]
    pub const fn area(&self) -> Rect {
        self.buffer.area()
    }

    #[inline]
    fn hit_index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width() && y < self.height())
            .then(|| y as usize * self.width() as usize + x as usize)
    }

    /// Mark every cell of `rect` as owned by `id` with `data`.
    ///
    /// Later registrations win, so overlays registered after the content
    /// underneath them take the clicks.
    pub fn register_hit(&mut self, rect: Rect, id: HitId, data: HitData) {
        self.set_hits(rect, Some((id, data)));
    }

    /// Remove all hit regions inside `rect`.
    pub fn clear_hits(&mut self, rect: Rect) {
        self.set_hits(rect, None);
    }

    fn set_hits(&mut self, rect: Rect, value: Option<(HitId, HitData)>) {
        let rect = rect.intersection(&self.area());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if let Some(i) = self.hit_index(x, y) {
                    self.hits[i] = value;
                }
            }
        }
    }

    /// Which region, if any, owns the cell at `(x, y)`.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitData)> {
        self.hit_index(x, y).and_then(|i| self.hits[i])
    }

    /// Fill `rect` with blank cells carrying `style`.
    pub fn fill(&mut self, rect: Rect, style: Style) {
        let mut cell = Cell::EMPTY;
        style.apply(&mut cell);
        self.buffer.fill(rect, cell);
    }

    /// Apply `style` to existing cells of `rect` without changing content.
    pub fn restyle(&mut self, rect: Rect, style: Style) {
        let rect = rect.intersection(&self.area());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if let Some(cell) = self.buffer.get_mut(x, y) {
                    style.apply(cell);
                }
            }
        }
    }

    /// Print `text` starting at `(x, y)`, using at most `max_width` columns.
    ///
    /// Existing cell colors show through where `style` leaves them unset.
    /// Returns the number of columns written.
    pub fn print_text(&mut self, x: u16, y: u16, text: &str, style: Style, max_width: u16) -> u16 {
        let limit = x.saturating_add(max_width).min(self.width());
        let mut col = x;

        for grapheme in text.graphemes(true) {
            let w = grapheme_width(grapheme) as u16;
            if w == 0 {
                continue;
            }
            if col.saturating_add(w) > limit {
                break;
            }
            let Some(c) = grapheme.chars().next() else {
                continue;
            };
            let mut cell = self.buffer.get(col, y).copied().unwrap_or_default();
            cell.content = CellContent::Char(c);
            style.apply(&mut cell);
            self.buffer.set(col, y, cell, w);
            col += w;
        }

        col - x
    }

    /// Draw a horizontal line of `ch` across `width` columns.
    pub fn hline(&mut self, x: u16, y: u16, width: u16, ch: char, style: Style) {
        let end = x.saturating_add(width).min(self.width());
        for col in x..end {
            let mut cell = self.buffer.get(col, y).copied().unwrap_or_default();
            cell.content = CellContent::Char(ch);
            style.apply(&mut cell);
            self.buffer.set(col, y, cell, 1);
        }
    }

    /// Draw a vertical line of `ch` down `height` rows.
    pub fn vline(&mut self, x: u16, y: u16, height: u16, ch: char, style: Style) {
        let end = y.saturating_add(height).min(self.height());
        for row in y..end {
            let mut cell = self.buffer.get(x, row).copied().unwrap_or_default();
            cell.content = CellContent::Char(ch);
            style.apply(&mut cell);
            self.buffer.set(x, row, cell, 1);
        }
    }

    /// Draw a border around `rect`.
    pub fn draw_border(&mut self, rect: Rect, chars: BorderChars, style: Style) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;

        self.hline(rect.x + 1, rect.y, rect.width - 2, chars.horizontal, style);
        self.hline(rect.x + 1, bottom, rect.width - 2, chars.horizontal, style);
        self.vline(rect.x, rect.y + 1, rect.height - 2, chars.vertical, style);
        self.vline(right, rect.y + 1, rect.height - 2, chars.vertical, style);

        for (x, y, ch) in [
            (rect.x, rect.y, chars.top_left),
            (right, rect.y, chars.top_right),
            (rect.x, bottom, chars.bottom_left),
            (right, bottom, chars.bottom_right),
        ] {
            self.hline(x, y, 1, ch, style);
        }
    }
}
