#![forbid(unsafe_code)]

//! Derived text rules for post bodies and tags.
//!
//! Post content uses one convention only: paragraphs are separated by a
//! blank line, and a paragraph wrapped in `**` on both ends is emphasized.
//! Emphasis markers anywhere else are left as literal text.

/// Separator between paragraphs in post content.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Emphasis marker wrapping a whole paragraph.
pub const EMPHASIS_MARKER: &str = "**";

/// One displayed paragraph of post content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paragraph<'a> {
    /// Rendered bold; markers already stripped.
    Emphasized(&'a str),
    /// Rendered as-is.
    Plain(&'a str),
}

impl<'a> Paragraph<'a> {
    /// The text to display.
    pub fn text(&self) -> &'a str {
        match *self {
            Paragraph::Emphasized(text) | Paragraph::Plain(text) => text,
        }
    }

    pub fn is_emphasized(&self) -> bool {
        matches!(self, Paragraph::Emphasized(_))
    }
}

/// Split content into paragraphs on blank-line boundaries.
///
/// Every separator produces a boundary, so runs of blank lines yield empty
/// paragraphs and empty content yields a single empty paragraph.
pub fn paragraphs(content: &str) -> Vec<Paragraph<'_>> {
    content.split(PARAGRAPH_SEPARATOR).map(classify).collect()
}

/// Classify one paragraph.
///
/// A paragraph that starts and ends with the marker is emphasized. When the
/// two markers overlap (`**`, `***`) the emphasized text is empty.
pub fn classify(paragraph: &str) -> Paragraph<'_> {
    if paragraph.starts_with(EMPHASIS_MARKER) && paragraph.ends_with(EMPHASIS_MARKER) {
        let inner = paragraph
            .get(EMPHASIS_MARKER.len()..paragraph.len().saturating_sub(EMPHASIS_MARKER.len()))
            .unwrap_or("");
        Paragraph::Emphasized(inner)
    } else {
        Paragraph::Plain(paragraph)
    }
}

/// Format one tag as a hash-prefixed label.
pub fn tag_label(tag: &str) -> String {
    format!("#{tag}")
}

/// Hash-prefixed labels for `tags`, in order.
pub fn tag_labels(tags: &[String]) -> Vec<String> {
    tags.iter().map(|t| tag_label(t)).collect()
}
