#![forbid(unsafe_code)]

//! Rendering of the feed page.
//!
//! The page is three columns: navigation, the post list, and a sidebar.
//! The side columns drop out on narrow terminals. The detail panel, when a
//! post is open, is drawn last over everything else.

pub mod chrome;
pub mod detail;
pub mod list;

use feed_core::geometry::Rect;
use feed_render::frame::{Frame, HitId};
use feed_render::style::Style;

use crate::app::FeedModel;
use crate::theme;

/// A post summary block; hit data is the store index.
pub const POST_HIT: HitId = HitId::new(1);
/// The close control of the detail panel.
pub const CLOSE_HIT: HitId = HitId::new(2);
/// The body of the detail panel.
pub const PANEL_HIT: HitId = HitId::new(3);
/// Everything outside the detail panel while it is open.
pub const BACKDROP_HIT: HitId = HitId::new(4);

/// Column split of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub nav: Option<Rect>,
    pub main: Rect,
    pub sidebar: Option<Rect>,
}

impl PageLayout {
    pub fn for_area(area: Rect) -> Self {
        let mut rest = area;
        let mut nav = None;
        let mut sidebar = None;

        if area.width >= theme::LEFT_RAIL_MIN_TOTAL {
            let (left, remainder) = rest.split_left(theme::LEFT_RAIL);
            nav = Some(left);
            rest = remainder;
        }
        if area.width >= theme::RIGHT_RAIL_MIN_TOTAL {
            let (remainder, right) = rest.split_right(theme::RIGHT_RAIL);
            sidebar = Some(right);
            rest = remainder;
        }

        Self {
            nav,
            main: rest,
            sidebar,
        }
    }
}

/// Draw the whole page for the model's current state.
pub fn render(model: &FeedModel, frame: &mut Frame) {
    let area = frame.area();
    if area.is_empty() {
        return;
    }
    frame.fill(area, Style::new().bg(theme::BACKGROUND).fg(theme::FOREGROUND));

    let layout = PageLayout::for_area(area);
    if let Some(nav) = layout.nav {
        chrome::render_nav(frame, nav);
    }
    if let Some(sidebar) = layout.sidebar {
        chrome::render_sidebar(frame, sidebar);
    }
    list::render(model, frame, layout.main);

    if let Some(post) = model.selected_post() {
        detail::render(model, post, frame);
    }
}
