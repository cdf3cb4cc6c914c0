#![forbid(unsafe_code)]

//! The detail panel drawn over the list for the open post.

use feed_core::geometry::{Rect, Sides};
use feed_render::display_width;
use feed_render::frame::{BorderChars, Frame};
use feed_render::style::Style;

use crate::app::FeedModel;
use crate::data::Post;
use crate::markup::{self, Paragraph};
use crate::theme;
use crate::view::{BACKDROP_HIT, CLOSE_HIT, PANEL_HIT};
use crate::widgets::{self, Line, Span};

pub const PANEL_TITLE: &str = "Post";

/// Where the panel sits in a frame of `area`.
///
/// At most [`theme::DETAIL_MAX_WIDTH`] wide and nine tenths of the height,
/// centered, with a small margin when the terminal allows it.
pub fn panel_rect(area: Rect) -> Rect {
    let margin = if area.width > 24 { 2 } else { 0 };
    let width = area
        .width
        .saturating_sub(margin * 2)
        .min(theme::DETAIL_MAX_WIDTH);
    let height = (u32::from(area.height) * 9 / 10).max(u32::from(area.height.min(8))) as u16;
    area.centered(width, height)
}

/// Body lines of the panel for `post` at `width` columns.
///
/// Paragraphs come from [`markup::paragraphs`]; emphasized ones are bold.
/// The share action shows the share count.
pub fn detail_lines(post: &Post, width: usize) -> Vec<Line> {
    let width = width.max(1);
    let mut lines = Vec::new();

    let badge = widgets::avatar(&post.author);
    let badge_width = display_width(&badge.text);
    let inner = width.saturating_sub(badge_width).max(1);
    let name = widgets::flow_words(&widgets::author_words(&post.author), inner);
    lines.extend(widgets::indent(name, badge));
    let handle = widgets::flow_words(&widgets::handle_words(post), inner);
    lines.extend(widgets::indent(handle, Span::new(" ".repeat(badge_width), Style::new())));
    lines.push(Line::new());

    lines.extend(widgets::flow(
        &[Span::new(post.title.clone(), theme::strong().underline())],
        width,
    ));
    lines.push(Line::new());

    if let Some(image) = &post.image {
        lines.extend(widgets::image_block(image, width, theme::DETAIL_IMAGE_HEIGHT));
        lines.push(Line::new());
    }

    for paragraph in markup::paragraphs(&post.content) {
        let style = match paragraph {
            Paragraph::Emphasized(_) => theme::strong(),
            Paragraph::Plain(_) => theme::text(),
        };
        lines.extend(widgets::flow(&[Span::new(paragraph.text(), style)], width));
        lines.push(Line::new());
    }

    if !post.tags.is_empty() {
        lines.extend(widgets::flow(&widgets::tag_spans(&post.tags), width));
        lines.push(Line::new());
    }

    lines.push(vec![Span::new("─".repeat(width), theme::border())]);
    lines.push(widgets::counters(post, true));
    lines
}

/// Dim the page, then draw the panel for `post` on top.
pub fn render(model: &FeedModel, post: &Post, frame: &mut Frame) {
    let area = frame.area();
    frame.restyle(area, Style::new().bg(theme::BACKGROUND).dim());
    frame.clear_hits(area);
    frame.register_hit(area, BACKDROP_HIT, 0);

    let panel = panel_rect(area);
    if panel.width < 4 || panel.height < 4 {
        return;
    }
    frame.fill(panel, Style::new().bg(theme::CARD).fg(theme::FOREGROUND));
    frame.draw_border(panel, BorderChars::ROUNDED, theme::border());
    frame.register_hit(panel, PANEL_HIT, 0);

    let inner = panel.inner(Sides::all(1));
    let (header, rest) = inner.split_top(2);
    frame.print_text(header.x + 1, header.y, PANEL_TITLE, theme::strong(), header.width.saturating_sub(1));

    let close_width = display_width(theme::CLOSE_GLYPH) as u16;
    if header.width > close_width + 4 {
        let close_x = header.right() - close_width - 2;
        frame.print_text(close_x, header.y, theme::CLOSE_GLYPH, theme::text(), close_width);
        // A slightly larger target than the glyph itself.
        let target = Rect::new(close_x - 1, header.y, close_width + 2, 1);
        frame.register_hit(target, CLOSE_HIT, 0);
    }
    frame.hline(header.x, header.y + 1, header.width, '─', theme::border());

    let body = rest.inner(Sides::horizontal(2));
    if body.is_empty() {
        return;
    }
    let lines = detail_lines(post, body.width as usize);
    let max_scroll = lines.len().saturating_sub(body.height as usize);
    let max_scroll = u16::try_from(max_scroll).unwrap_or(u16::MAX);
    model.detail_max_scroll.set(max_scroll);
    let scroll = model.detail_scroll().min(max_scroll);

    widgets::paint_lines(frame, body, i32::from(body.y) - i32::from(scroll), &lines);

    if scroll < max_scroll {
        let hint = " ↓ more ";
        let hint_width = display_width(hint) as u16;
        if panel.width > hint_width + 4 {
            frame.print_text(
                panel.right() - hint_width - 2,
                panel.bottom() - 1,
                hint,
                theme::muted(),
                hint_width,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PostStore;
    use crate::widgets::line_text;

    fn sample() -> Post {
        let mut post = PostStore::bundled().expect("bundled posts").posts()[0].clone();
        post.content = "**Intro**\n\nSecond paragraph".to_string();
        post.tags = vec!["music".into(), "life".into()];
        post
    }

    #[test]
    fn panel_is_capped_and_centered() {
        let panel = panel_rect(Rect::from_size(200, 50));
        assert_eq!(panel.width, theme::DETAIL_MAX_WIDTH);
        assert_eq!(panel.height, 45);
        assert_eq!(panel.x, (200 - theme::DETAIL_MAX_WIDTH) / 2);

        let small = panel_rect(Rect::from_size(40, 10));
        assert_eq!(small.width, 36);
        assert_eq!(small.height, 9);
    }

    #[test]
    fn emphasized_paragraph_is_bold_without_markers() {
        let lines = detail_lines(&sample(), 50);
        let intro = lines
            .iter()
            .find(|l| line_text(l) == "Intro")
            .expect("intro line");
        assert_eq!(intro[0].style, theme::strong());
        let plain = lines
            .iter()
            .find(|l| line_text(l) == "Second paragraph")
            .expect("plain line");
        assert_eq!(plain[0].style, theme::text());
        assert!(lines.iter().all(|l| !line_text(l).contains("**")));
    }

    #[test]
    fn tags_and_share_count() {
        let post = sample();
        let lines = detail_lines(&post, 50);
        assert!(lines.iter().any(|l| line_text(l) == "#music #life"));
        let counters = line_text(lines.last().expect("counters"));
        assert!(counters.ends_with(&format!("{} {}", theme::SHARE_GLYPH, post.shares)));
    }

    #[test]
    fn no_tag_row_without_tags() {
        let mut post = sample();
        post.tags.clear();
        let lines = detail_lines(&post, 50);
        assert!(lines.iter().all(|l| !line_text(l).contains('#')));
    }

    #[test]
    fn long_author_header_wraps_inside_the_panel() {
        let mut post = sample();
        post.author.name = "Alexandria Montgomery-Whitfield".to_string();
        post.author.username = "alexandria_montgomery".to_string();
        post.author.verified = true;
        post.timestamp = "3 days ago".to_string();
        let lines = detail_lines(&post, 30);
        let text: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(text[0], format!("({}) Alexandria", post.author.initial()));
        assert_eq!(text[1], format!("    Montgomery-Whitfield {}", theme::VERIFIED_MARK));
        assert_eq!(text[2], "    @alexandria_montgomery");
        assert_eq!(text[3], "    • 3 days ago");
        assert!(text.iter().all(|l| display_width(l) <= 30), "{text:?}");
    }
}
