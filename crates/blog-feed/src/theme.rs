#![forbid(unsafe_code)]

//! Palette, glyphs, and spacing for the feed.
//!
//! | Token | Value | Use Case |
//! |-------|-------|----------|
//! | `LEFT_RAIL` | 24 | Navigation column width |
//! | `RIGHT_RAIL` | 32 | Search / suggestions column width |
//! | `DETAIL_MAX_WIDTH` | 76 | Detail panel width cap |

use feed_render::cell::PackedRgba;
use feed_render::style::Style;

pub const BACKGROUND: PackedRgba = PackedRgba::rgb(0x10, 0x12, 0x17);
pub const SIDEBAR: PackedRgba = PackedRgba::rgb(0x15, 0x18, 0x1f);
pub const CARD: PackedRgba = PackedRgba::rgb(0x1b, 0x1f, 0x28);
pub const MUTED_BG: PackedRgba = PackedRgba::rgb(0x23, 0x28, 0x33);
pub const FOREGROUND: PackedRgba = PackedRgba::rgb(0xe7, 0xe9, 0xee);
pub const MUTED: PackedRgba = PackedRgba::rgb(0x8b, 0x93, 0xa4);
pub const BORDER: PackedRgba = PackedRgba::rgb(0x2f, 0x35, 0x42);
pub const PRIMARY: PackedRgba = PackedRgba::rgb(0x4f, 0x9c, 0xf9);
pub const PRIMARY_FG: PackedRgba = PackedRgba::rgb(0x0b, 0x12, 0x1f);
pub const LIKE: PackedRgba = PackedRgba::rgb(0xef, 0x44, 0x44);

/// Marker drawn after a verified author's name.
pub const VERIFIED_MARK: &str = "●";
/// Leading glyph of an image block.
pub const IMAGE_MARK: &str = "▣";
pub const COMMENT_GLYPH: &str = "◌";
pub const REPOST_GLYPH: &str = "⟲";
pub const LIKE_GLYPH: &str = "♥";
pub const SHARE_GLYPH: &str = "⇪";
pub const CLOSE_GLYPH: &str = "✕";
pub const FOCUS_BAR: char = '▌';

pub const LEFT_RAIL: u16 = 24;
pub const RIGHT_RAIL: u16 = 32;
/// Below this total width the right rail is hidden.
pub const RIGHT_RAIL_MIN_TOTAL: u16 = 110;
/// Below this total width the left rail is hidden too.
pub const LEFT_RAIL_MIN_TOTAL: u16 = 76;
pub const DETAIL_MAX_WIDTH: u16 = 76;

/// Rows used by the list-mode image block.
pub const LIST_IMAGE_HEIGHT: u16 = 3;
/// Rows used by the detail-mode image block.
pub const DETAIL_IMAGE_HEIGHT: u16 = 5;

pub fn text() -> Style {
    Style::new().fg(FOREGROUND)
}

pub fn muted() -> Style {
    Style::new().fg(MUTED)
}

pub fn strong() -> Style {
    Style::new().fg(FOREGROUND).bold()
}

pub fn accent() -> Style {
    Style::new().fg(PRIMARY)
}

pub fn border() -> Style {
    Style::new().fg(BORDER)
}

pub fn like() -> Style {
    Style::new().fg(LIKE)
}
