#![forbid(unsafe_code)]

//! Text style applied when drawing into a frame.

use crate::cell::{Cell, PackedRgba, StyleFlags};

/// Optional colors plus attribute flags.
///
/// Unset colors leave the underlying cell color untouched, so text drawn on
/// a filled panel keeps the panel background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<PackedRgba>,
    pub bg: Option<PackedRgba>,
    pub flags: StyleFlags,
}

impl Style {
    /// The empty style.
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            flags: StyleFlags::empty(),
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: PackedRgba) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: PackedRgba) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.flags = self.flags.union(StyleFlags::BOLD);
        self
    }

    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.flags = self.flags.union(StyleFlags::DIM);
        self
    }

    #[must_use]
    pub const fn italic(mut self) -> Self {
        self.flags = self.flags.union(StyleFlags::ITALIC);
        self
    }

    #[must_use]
    pub const fn underline(mut self) -> Self {
        self.flags = self.flags.union(StyleFlags::UNDERLINE);
        self
    }

    #[must_use]
    pub const fn reverse(mut self) -> Self {
        self.flags = self.flags.union(StyleFlags::REVERSE);
        self
    }

    /// Apply this style on top of an existing cell.
    pub fn apply(&self, cell: &mut Cell) {
        if let Some(fg) = self.fg {
            cell.fg = fg;
        }
        if let Some(bg) = self.bg {
            cell.bg = bg;
        }
        cell.flags |= self.flags;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_keeps_unset_colors() {
        let mut cell = Cell::from_char('a').with_bg(PackedRgba::BLACK);
        Style::new().fg(PackedRgba::WHITE).bold().apply(&mut cell);
        assert_eq!(cell.fg, PackedRgba::WHITE);
        assert_eq!(cell.bg, PackedRgba::BLACK);
        assert!(cell.flags.contains(StyleFlags::BOLD));
    }
}
