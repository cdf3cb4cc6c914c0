#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, frames, and terminal presentation.

pub mod buffer;
pub mod cell;
pub mod frame;
pub mod presenter;
pub mod style;
pub mod text;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of a single grapheme cluster in terminal columns.
///
/// Control characters and zero-width clusters report 0.
#[inline]
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.chars().all(char::is_control) {
        return 0;
    }
    UnicodeWidthStr::width(grapheme)
}

/// Display width of a string in terminal columns.
#[inline]
pub fn display_width(text: &str) -> usize {
    if text.bytes().all(|b| (0x20..=0x7E).contains(&b)) {
        return text.len();
    }
    text.graphemes(true).map(grapheme_width).sum()
}
