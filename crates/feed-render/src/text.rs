#![forbid(unsafe_code)]

//! Width-aware wrapping and truncation.
//!
//! Wrapping never splits a grapheme cluster and measures in terminal
//! columns, so wide characters count as two.

use unicode_segmentation::UnicodeSegmentation;

use crate::grapheme_width;
use crate::display_width;

/// Word-wrap `text` to `width` columns.
///
/// Embedded newlines force a break. Words longer than `width` are broken at
/// grapheme boundaries. Trailing whitespace is trimmed from every line and
/// at least one line is always returned.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0;

        for word in split_words(paragraph) {
            let word_width = display_width(word);
            if line_width + word_width <= width {
                line.push_str(word);
                line_width += word_width;
                continue;
            }

            if !line.is_empty() {
                lines.push(line.trim_end().to_string());
                line.clear();
                line_width = 0;
            }

            let word = word.trim_start();
            if display_width(word) <= width {
                line.push_str(word);
                line_width = display_width(word);
                continue;
            }

            for grapheme in word.graphemes(true) {
                let w = grapheme_width(grapheme);
                if line_width + w > width && !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push_str(grapheme);
                line_width += w;
            }
        }

        lines.push(line.trim_end().to_string());
    }

    lines
}

/// Split into alternating runs of whitespace and non-whitespace.
fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    let mut in_whitespace = None;

    for (idx, grapheme) in text.grapheme_indices(true) {
        let is_ws = grapheme.chars().all(char::is_whitespace);
        // A word owns the whitespace that precedes it.
        if in_whitespace == Some(false) && is_ws && idx > start {
            words.push(&text[start..idx]);
            start = idx;
        }
        in_whitespace = Some(is_ws);
    }
    if start < text.len() {
        words.push(&text[start..]);
    }
    words
}

/// Truncate text to fit within `max_width`, appending `ellipsis` if cut.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_width: usize, ellipsis: &str) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }

    let ellipsis_width = display_width(ellipsis);
    if ellipsis_width >= max_width {
        return truncate_to_width(text, max_width);
    }

    let mut result = truncate_to_width(text, max_width - ellipsis_width);
    result.push_str(ellipsis);
    result
}

/// Truncate text to fit within `max_width` columns (no ellipsis).
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current = 0;
    for grapheme in text.graphemes(true) {
        let w = grapheme_width(grapheme);
        if current + w > max_width {
            break;
        }
        result.push_str(grapheme);
        current += w;
    }
    result
}
