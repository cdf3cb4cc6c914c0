#![forbid(unsafe_code)]

//! The post list: page header plus one summary block per post.

use feed_core::geometry::Rect;
use feed_render::display_width;
use feed_render::frame::Frame;
use feed_render::style::Style;

use crate::app::FeedModel;
use crate::data::Post;
use crate::theme;
use crate::view::POST_HIT;
use crate::widgets::{self, Line, Span};

pub const PAGE_TITLE: &str = "Personal Blog Feed";

/// Summary lines for one post at `width` columns, avatar column included.
///
/// The share action appears as a bare glyph here; only the detail panel
/// shows its count.
pub fn summary_lines(post: &Post, width: usize) -> Vec<Line> {
    let badge = widgets::avatar(&post.author);
    let inner = width.saturating_sub(display_width(&badge.text)).max(1);

    let mut head = widgets::author_words(&post.author);
    head.extend(widgets::handle_words(post));
    let mut body = widgets::flow_words(&head, inner);

    body.extend(widgets::flow(&[Span::new(post.title.clone(), theme::strong())], inner));

    let mut excerpt = vec![Span::new(post.excerpt.clone(), theme::text())];
    excerpt.extend(widgets::tag_spans(&post.tags));
    body.extend(widgets::flow(&excerpt, inner));

    if let Some(image) = &post.image {
        body.extend(widgets::image_block(image, inner, theme::LIST_IMAGE_HEIGHT));
    }
    body.push(widgets::counters(post, false));

    widgets::indent(body, badge)
}

/// Keep the block `[top, top + height)` inside a viewport of `view` rows.
fn scroll_to_show(offset: u32, top: u32, height: u32, view: u32, total: u32) -> u32 {
    let mut offset = offset;
    if top + height > offset + view {
        offset = (top + height).saturating_sub(view);
    }
    if top < offset {
        offset = top;
    }
    offset.min(total.saturating_sub(view))
}

/// Draw the header and the visible summary blocks into `area`.
pub fn render(model: &FeedModel, frame: &mut Frame, area: Rect) {
    let (header, body) = area.split_top(2);
    frame.print_text(
        header.x + 1,
        header.y,
        PAGE_TITLE,
        theme::strong(),
        header.width.saturating_sub(1),
    );
    frame.hline(header.x, header.y + 1, header.width, '─', theme::border());

    let posts = model.store().posts();
    if body.is_empty() {
        return;
    }
    if posts.is_empty() {
        frame.print_text(body.x + 2, body.y + 1, "No posts yet.", theme::muted(), body.width.saturating_sub(2));
        return;
    }

    // One focus-bar column and one gap column before the text.
    let text_x = body.x + 2;
    let width = body.width.saturating_sub(3) as usize;
    let blocks: Vec<Vec<Line>> = posts.iter().map(|p| summary_lines(p, width)).collect();

    // Each block is padded by a row above and below, then a divider row.
    let mut tops = Vec::with_capacity(blocks.len());
    let mut total = 0u32;
    for lines in &blocks {
        tops.push(total);
        total += lines.len() as u32 + 3;
    }

    let focus = model.focus().min(blocks.len() - 1);
    let offset = scroll_to_show(
        u32::from(model.list_offset.get()),
        tops[focus],
        blocks[focus].len() as u32 + 2,
        u32::from(body.height),
        total,
    );
    model.list_offset.set(offset.min(u32::from(u16::MAX)) as u16);

    let text_area = Rect::new(text_x, body.y, width as u16, body.height);
    for (index, (lines, top)) in blocks.iter().zip(&tops).enumerate() {
        let screen_top = i64::from(body.y) + i64::from(*top) - i64::from(offset);
        let block_height = lines.len() as i64 + 2;
        if screen_top >= i64::from(body.bottom()) {
            break;
        }
        if screen_top + block_height + 1 <= i64::from(body.y) {
            continue;
        }

        let clipped_top = screen_top.max(i64::from(body.y));
        let clipped_bottom = (screen_top + block_height).min(i64::from(body.bottom()));
        let block = Rect::new(
            body.x,
            clipped_top as u16,
            body.width,
            (clipped_bottom - clipped_top).max(0) as u16,
        );

        if index == focus {
            frame.fill(block, Style::new().bg(theme::MUTED_BG));
            frame.vline(block.x, block.y, block.height, theme::FOCUS_BAR, theme::accent());
        }
        widgets::paint_lines(frame, text_area, (screen_top + 1) as i32, lines);

        let divider = screen_top + block_height;
        if divider >= i64::from(body.y) && divider < i64::from(body.bottom()) {
            frame.hline(body.x, divider as u16, body.width, '─', theme::border());
        }
        frame.register_hit(block, POST_HIT, index as u64);
    }
}
