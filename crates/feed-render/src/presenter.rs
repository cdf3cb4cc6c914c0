#![forbid(unsafe_code)]

//! Presenter: diff-based terminal emission.
//!
//! Compares each new buffer against the last presented one and writes only
//! the cells that changed, tracking cursor position and current style to
//! avoid redundant escape sequences. Each frame is wrapped in a
//! synchronized update and flushed once.

use std::io::{self, Write};

use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, queue, terminal};

use crate::buffer::Buffer;
use crate::cell::{Cell, CellContent, PackedRgba, StyleFlags};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct CellStyle {
    fg: PackedRgba,
    bg: PackedRgba,
    flags: StyleFlags,
}

impl From<&Cell> for CellStyle {
    fn from(cell: &Cell) -> Self {
        Self {
            fg: cell.fg,
            bg: cell.bg,
            flags: cell.flags,
        }
    }
}

/// Writes buffers to a terminal.
#[derive(Debug)]
pub struct Presenter<W: Write> {
    writer: W,
    previous: Option<Buffer>,
    style: Option<CellStyle>,
    cursor: Option<(u16, u16)>,
}

impl<W: Write> Presenter<W> {
    /// Create a presenter writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            previous: None,
            style: None,
            cursor: None,
        }
    }

    /// Forget the last frame so the next present redraws everything.
    ///
    /// Call after a resize or anything else that may have disturbed the
    /// screen contents.
    pub fn invalidate(&mut self) {
        self.previous = None;
        self.style = None;
        self.cursor = None;
    }

    /// Borrow the underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Present `next`, emitting only what changed since the last call.
    ///
    /// Returns the number of cells written.
    pub fn present(&mut self, next: &Buffer) -> io::Result<usize> {
        let previous = self
            .previous
            .take()
            .filter(|prev| prev.width() == next.width() && prev.height() == next.height());

        queue!(self.writer, terminal::BeginSynchronizedUpdate)?;
        if previous.is_none() {
            queue!(
                self.writer,
                SetAttribute(Attribute::Reset),
                terminal::Clear(terminal::ClearType::All)
            )?;
            self.style = None;
            self.cursor = None;
        }

        let mut written = 0;
        for y in 0..next.height() {
            let row = next.row_cells(y);
            for (x, cell) in row.iter().enumerate() {
                if cell.is_continuation() {
                    continue;
                }
                let x = x as u16;
                let changed = match &previous {
                    Some(prev) => {
                        prev.get(x, y) != Some(cell)
                            || (row.get(x as usize + 1).is_some_and(Cell::is_continuation)
                                && prev.get(x + 1, y) != row.get(x as usize + 1))
                    }
                    None => !cell.is_empty() || CellStyle::from(cell) != CellStyle::default(),
                };
                if !changed {
                    continue;
                }

                let width = 1 + row[x as usize + 1..]
                    .iter()
                    .take_while(|c| c.is_continuation())
                    .count() as u16;
                self.emit_cell(x, y, cell, width)?;
                written += 1;
            }
        }

        queue!(self.writer, SetAttribute(Attribute::Reset))?;
        self.style = None;
        queue!(self.writer, terminal::EndSynchronizedUpdate)?;
        self.writer.flush()?;

        tracing::trace!(cells = written, "frame presented");
        self.previous = Some(next.clone());
        Ok(written)
    }

    fn emit_cell(&mut self, x: u16, y: u16, cell: &Cell, width: u16) -> io::Result<()> {
        if self.cursor != Some((x, y)) {
            queue!(self.writer, cursor::MoveTo(x, y))?;
        }

        let style = CellStyle::from(cell);
        if self.style != Some(style) {
            self.apply_style(style)?;
        }

        let ch = match cell.content {
            CellContent::Char(c) if !c.is_control() => c,
            _ => ' ',
        };
        queue!(self.writer, Print(ch))?;
        self.cursor = Some((x.saturating_add(width), y));
        Ok(())
    }

    fn apply_style(&mut self, style: CellStyle) -> io::Result<()> {
        queue!(
            self.writer,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(to_color(style.fg)),
            SetBackgroundColor(to_color(style.bg))
        )?;
        for (flag, attr) in [
            (StyleFlags::BOLD, Attribute::Bold),
            (StyleFlags::DIM, Attribute::Dim),
            (StyleFlags::ITALIC, Attribute::Italic),
            (StyleFlags::UNDERLINE, Attribute::Underlined),
            (StyleFlags::REVERSE, Attribute::Reverse),
        ] {
            if style.flags.contains(flag) {
                queue!(self.writer, SetAttribute(attr))?;
            }
        }
        self.style = Some(style);
        Ok(())
    }
}

fn to_color(color: PackedRgba) -> Color {
    if color.is_transparent() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r(),
            g: color.g(),
            b: color.b(),
        }
    }
}
