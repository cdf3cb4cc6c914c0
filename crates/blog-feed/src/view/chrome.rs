#![forbid(unsafe_code)]

//! Navigation column and sidebar.
//!
//! Both are static decoration. Nothing here registers hit regions.

use feed_core::geometry::{Rect, Sides};
use feed_render::display_width;
use feed_render::frame::{BorderChars, Frame};
use feed_render::style::Style;

use crate::theme;

/// Navigation entries, top to bottom. The first one is the current page.
pub const NAV_ENTRIES: [(&str, &str); 8] = [
    ("⌂", "Feed"),
    ("#", "Categories"),
    ("◔", "Notifications"),
    ("✉", "Messages"),
    ("⚑", "Saved"),
    ("▤", "Drafts"),
    ("☺", "Profile"),
    ("⋯", "More"),
];

/// A suggested author: display name and handle.
pub struct Suggestion {
    pub name: &'static str,
    pub username: &'static str,
}

pub const SUGGESTED_AUTHORS: [Suggestion; 3] = [
    Suggestion {
        name: "McFly",
        username: "levramcfly",
    },
    Suggestion {
        name: "JohnDoe",
        username: "johndoe",
    },
    Suggestion {
        name: "Janis Joplin",
        username: "janisjoplin",
    },
];

const FOLLOW_LABEL: &str = " Follow ";

/// Left column: logo badge and navigation entries.
pub fn render_nav(frame: &mut Frame, area: Rect) {
    frame.fill(area, Style::new().bg(theme::SIDEBAR).fg(theme::FOREGROUND));
    let right = area.right().saturating_sub(1);
    frame.vline(right, area.y, area.height, '│', theme::border());

    let inner = Rect::new(area.x, area.y, area.width.saturating_sub(1), area.height)
        .inner(Sides::horizontal(2));
    if inner.is_empty() {
        return;
    }

    let mut y = inner.y + 1;
    frame.print_text(
        inner.x,
        y,
        " ✎ ",
        Style::new().bg(theme::PRIMARY).fg(theme::PRIMARY_FG).bold(),
        inner.width,
    );
    y += 2;

    for (i, (glyph, label)) in NAV_ENTRIES.iter().enumerate() {
        if y >= inner.bottom() {
            break;
        }
        let style = if i == 0 { theme::strong() } else { theme::text() };
        let used = frame.print_text(inner.x, y, glyph, theme::muted(), inner.width);
        frame.print_text(inner.x + used + 2, y, label, style, inner.width.saturating_sub(used + 2));
        y += 2;
    }
}

/// Right column: search box, suggested authors and the "Show more" link.
pub fn render_sidebar(frame: &mut Frame, area: Rect) {
    frame.vline(area.x, area.y, area.height, '│', theme::border());
    let inner = Rect::new(area.x + 1, area.y, area.width.saturating_sub(1), area.height)
        .inner(Sides::all(1));
    if inner.width < 8 || inner.height < 3 {
        return;
    }

    let search = Rect::new(inner.x, inner.y, inner.width, 3);
    frame.fill(search, Style::new().bg(theme::MUTED_BG));
    frame.draw_border(search, BorderChars::ROUNDED, theme::border());
    frame.print_text(search.x + 2, search.y + 1, "⌕ Search Blog", theme::muted(), search.width - 4);

    let card_height = (SUGGESTED_AUTHORS.len() as u16) * 3 + 5;
    let card = Rect::new(inner.x, search.bottom() + 1, inner.width, card_height).intersection(&inner);
    if card.height < 3 {
        return;
    }
    frame.fill(card, Style::new().bg(theme::CARD));
    frame.draw_border(card, BorderChars::ROUNDED, theme::border());

    let body = card.inner(Sides::all(1)).inner(Sides::horizontal(1));
    frame.print_text(body.x, body.y, "Suggested Authors", theme::strong(), body.width);

    let mut y = body.y + 2;
    for author in &SUGGESTED_AUTHORS {
        if y + 1 >= body.bottom() {
            break;
        }
        render_suggestion(frame, Rect::new(body.x, y, body.width, 2), author);
        y += 3;
    }
    if y < body.bottom() {
        frame.print_text(body.x, y, "Show more", theme::accent(), body.width);
    }
}

fn render_suggestion(frame: &mut Frame, row: Rect, author: &Suggestion) {
    let button_width = display_width(FOLLOW_LABEL) as u16;
    let text_width = row.width.saturating_sub(button_width + 1);

    let initial = author.name.chars().next().unwrap_or('?');
    let badge = format!("({initial}) ");
    let used = frame.print_text(row.x, row.y, &badge, theme::accent().bold(), text_width);
    let name_x = row.x + used;
    let name_width = text_width.saturating_sub(used);
    let name_used = frame.print_text(name_x, row.y, author.name, theme::strong(), name_width);
    frame.print_text(
        name_x + name_used,
        row.y,
        &format!(" {}", theme::VERIFIED_MARK),
        theme::accent(),
        name_width.saturating_sub(name_used),
    );
    frame.print_text(
        name_x,
        row.y + 1,
        &format!("@{}", author.username),
        theme::muted(),
        name_width,
    );

    if row.width > button_width {
        frame.print_text(
            row.right() - button_width,
            row.y,
            FOLLOW_LABEL,
            Style::new().bg(theme::FOREGROUND).fg(theme::BACKGROUND).bold(),
            button_width,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_render::buffer::buffer_to_text;

    #[test]
    fn nav_lists_every_entry() {
        let mut frame = Frame::new(theme::LEFT_RAIL, 24);
        let area = frame.area();
        render_nav(&mut frame, area);
        let text = buffer_to_text(&frame.buffer);
        for (_, label) in NAV_ENTRIES {
            assert!(text.contains(label), "missing {label}");
        }
    }

    #[test]
    fn sidebar_shows_search_and_suggestions() {
        let mut frame = Frame::new(theme::RIGHT_RAIL, 30);
        let area = frame.area();
        render_sidebar(&mut frame, area);
        let text = buffer_to_text(&frame.buffer);
        assert!(text.contains("Search Blog"));
        assert!(text.contains("Suggested Authors"));
        for author in &SUGGESTED_AUTHORS {
            assert!(text.contains(author.name));
            assert!(text.contains(&format!("@{}", author.username)));
        }
        assert_eq!(text.matches("Follow").count(), SUGGESTED_AUTHORS.len());
        assert!(text.contains("Show more"));
    }

    #[test]
    fn tiny_sidebar_draws_nothing_but_border() {
        let mut frame = Frame::new(6, 2);
        let area = frame.area();
        render_sidebar(&mut frame, area);
        assert!(!buffer_to_text(&frame.buffer).contains("Search"));
    }
}
