#![forbid(unsafe_code)]

//! Styled lines and the post fragments shared by list and detail views.
//!
//! Views build a post as a `Vec<Line>` first and paint it second. Knowing
//! the height before painting is what lets the list keep the focused post
//! on screen and the detail panel clamp its scroll.

use feed_core::geometry::Rect;
use feed_render::display_width;
use feed_render::frame::Frame;
use feed_render::style::Style;
use feed_render::text::{truncate_with_ellipsis, wrap_text};

use crate::data::{Author, Post};
use crate::theme;

/// A run of text in one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One row of spans.
pub type Line = Vec<Span>;

/// Display width of a line.
pub fn line_width(line: &Line) -> usize {
    line.iter().map(|s| display_width(&s.text)).sum()
}

/// Plain text of a line.
pub fn line_text(line: &Line) -> String {
    line.iter().map(|s| s.text.as_str()).collect()
}

/// Pieces that flow as one word: no break is taken between them unless
/// the whole word is wider than a line.
pub type Word = Vec<Span>;

/// Split spans on whitespace into single-piece words.
pub fn words(spans: &[Span]) -> Vec<Word> {
    spans
        .iter()
        .flat_map(|span| {
            span.text
                .split_whitespace()
                .map(|w| vec![Span::new(w, span.style)])
        })
        .collect()
}

/// Flow spans into lines no wider than `width`.
///
/// Whitespace collapses to single spaces between words, the way inline
/// text flows in a document. Words wider than `width` are broken. Always
/// returns at least one (possibly empty) line.
pub fn flow(spans: &[Span], width: usize) -> Vec<Line> {
    flow_words(&words(spans), width)
}

/// Flow prepared words into lines no wider than `width`.
///
/// Words are separated by one space in the style of the word that follows.
pub fn flow_words(words: &[Word], width: usize) -> Vec<Line> {
    let mut flow = Flow::new(width);
    for word in words {
        flow.push_word(word);
    }
    flow.finish()
}

struct Flow {
    width: usize,
    lines: Vec<Line>,
    current: Line,
    current_width: usize,
}

impl Flow {
    fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            lines: Vec::new(),
            current: Vec::new(),
            current_width: 0,
        }
    }

    fn push_word(&mut self, word: &[Span]) {
        let word_width: usize = word.iter().map(|p| display_width(&p.text)).sum();
        if word_width == 0 {
            return;
        }
        let gap = usize::from(!self.current.is_empty());
        if self.current_width + gap + word_width > self.width && !self.current.is_empty() {
            self.break_line();
        }

        if word_width <= self.width {
            for (i, piece) in word.iter().enumerate() {
                let sep = if i == 0 && !self.current.is_empty() { " " } else { "" };
                self.append(sep, &piece.text, piece.style);
            }
            return;
        }

        // Wider than a line on its own: pieces wrap separately.
        for (i, piece) in word.iter().enumerate() {
            let sep = if i == 0 && !self.current.is_empty() { " " } else { "" };
            self.place(sep, &piece.text, piece.style);
        }
    }

    /// Put `text` after `sep` on the current line, or start a new one,
    /// hard-breaking text wider than a line.
    fn place(&mut self, sep: &str, text: &str, style: Style) {
        let text_width = display_width(text);
        if self.current_width + display_width(sep) + text_width <= self.width {
            self.append(sep, text, style);
            return;
        }
        if !self.current.is_empty() {
            self.break_line();
        }
        let text = text.trim_start();
        let mut chunks = wrap_text(text, self.width);
        let last = chunks.pop().unwrap_or_default();
        for chunk in chunks {
            self.append("", &chunk, style);
            self.break_line();
        }
        self.append("", &last, style);
    }

    fn append(&mut self, sep: &str, text: &str, style: Style) {
        match self.current.last_mut() {
            Some(last) if last.style == style => {
                last.text.push_str(sep);
                last.text.push_str(text);
            }
            _ => self.current.push(Span::new(format!("{sep}{text}"), style)),
        }
        self.current_width += display_width(sep) + display_width(text);
    }

    fn break_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.current));
        self.current_width = 0;
    }

    fn finish(mut self) -> Vec<Line> {
        if !self.current.is_empty() || self.lines.is_empty() {
            self.lines.push(self.current);
        }
        self.lines
    }
}

/// Prefix every line: `first` on line 0, blanks of the same width on the
/// others.
pub fn indent(lines: Vec<Line>, first: Span) -> Vec<Line> {
    let rest = " ".repeat(display_width(&first.text));
    lines
        .into_iter()
        .enumerate()
        .map(|(i, mut line)| {
            let prefix = if i == 0 {
                first.clone()
            } else {
                Span::new(rest.clone(), Style::new())
            };
            line.insert(0, prefix);
            line
        })
        .collect()
}

/// Avatar badge: the author's initial in brackets, then a gap.
pub fn avatar(author: &Author) -> Span {
    Span::new(format!("({}) ", author.initial()), theme::accent().bold())
}

/// Words of the author name. The verified marker is glued to the last
/// word so the two always share a line.
pub fn author_words(author: &Author) -> Vec<Word> {
    let mut words: Vec<Word> = author
        .name
        .split_whitespace()
        .map(|w| vec![Span::new(w, theme::strong())])
        .collect();
    if author.verified {
        match words.last_mut() {
            Some(last) => last.push(Span::new(format!(" {}", theme::VERIFIED_MARK), theme::accent())),
            None => words.push(vec![Span::new(theme::VERIFIED_MARK, theme::accent())]),
        }
    }
    words
}

/// Words of `@handle • timestamp`. The bullet and the timestamp form one
/// word so a relative time like `3 days ago` is never split.
pub fn handle_words(post: &Post) -> Vec<Word> {
    let timestamp = post.timestamp.split_whitespace().collect::<Vec<_>>().join(" ");
    vec![
        vec![Span::new(format!("@{}", post.author.username), theme::muted())],
        vec![Span::new(format!("• {timestamp}"), theme::muted())],
    ]
}

/// Hash-prefixed tag labels in the accent style.
pub fn tag_spans(tags: &[String]) -> Vec<Span> {
    crate::markup::tag_labels(tags)
        .into_iter()
        .map(|label| Span::new(label, theme::accent()))
        .collect()
}

/// A framed placeholder standing in for an image.
///
/// Exactly one [`theme::IMAGE_MARK`] appears per block.
pub fn image_block(path: &str, width: usize, height: u16) -> Vec<Line> {
    let label_width = width.saturating_sub(4);
    let path_width = label_width.saturating_sub(display_width(theme::IMAGE_MARK) + 1);
    let label = if path_width == 0 {
        theme::IMAGE_MARK.to_string()
    } else {
        format!(
            "{} {}",
            theme::IMAGE_MARK,
            truncate_with_ellipsis(path, path_width, "…")
        )
    };

    if width < 4 || height < 3 {
        return vec![vec![Span::new(label, theme::muted())]];
    }

    let inner = width - 2;
    let mut lines = Vec::with_capacity(height as usize);
    lines.push(vec![Span::new(
        format!("┌{}┐", "─".repeat(inner)),
        theme::border(),
    )]);

    let label_row = (height as usize - 2) / 2;
    for row in 0..height as usize - 2 {
        if row == label_row {
            let used = display_width(&label);
            let left = (inner - used) / 2;
            let right = inner - used - left;
            lines.push(vec![
                Span::new(format!("│{}", " ".repeat(left)), theme::border()),
                Span::new(label.clone(), theme::muted()),
                Span::new(format!("{}│", " ".repeat(right)), theme::border()),
            ]);
        } else {
            lines.push(vec![Span::new(
                format!("│{}│", " ".repeat(inner)),
                theme::border(),
            )]);
        }
    }

    lines.push(vec![Span::new(
        format!("└{}┘", "─".repeat(inner)),
        theme::border(),
    )]);
    lines
}

/// Comments, reposts, likes, and the share action.
///
/// `share_count` controls whether the share action shows the shares value
/// (detail view) or only its glyph (list view).
pub fn counters(post: &Post, share_count: bool) -> Line {
    let gap = "    ";
    let mut line = vec![
        Span::new(format!("{} {}", theme::COMMENT_GLYPH, post.comments), theme::muted()),
        Span::new(gap, Style::new()),
        Span::new(format!("{} {}", theme::REPOST_GLYPH, post.shares), theme::muted()),
        Span::new(gap, Style::new()),
        Span::new(theme::LIKE_GLYPH, theme::like()),
        Span::new(format!(" {}", post.likes), theme::muted()),
        Span::new(gap, Style::new()),
    ];
    if share_count {
        line.push(Span::new(
            format!("{} {}", theme::SHARE_GLYPH, post.shares),
            theme::muted(),
        ));
    } else {
        line.push(Span::new(theme::SHARE_GLYPH, theme::muted()));
    }
    line
}

/// Paint one line at `(x, y)`, clipped to `right`.
pub fn paint_line(frame: &mut Frame, x: u16, y: u16, right: u16, line: &Line) {
    let mut col = x;
    for span in line {
        if col >= right {
            break;
        }
        col += frame.print_text(col, y, &span.text, span.style, right - col);
    }
}

/// Paint `lines` so that line 0 lands on virtual row `top`.
///
/// Rows falling outside `area` are skipped, which lets callers scroll by
/// passing a negative or shifted `top`.
pub fn paint_lines(frame: &mut Frame, area: Rect, top: i32, lines: &[Line]) {
    for (i, line) in lines.iter().enumerate() {
        let y = top + i as i32;
        if y < i32::from(area.y) {
            continue;
        }
        if y >= i32::from(area.bottom()) {
            break;
        }
        paint_line(frame, area.x, y as u16, area.right(), line);
    }
}
