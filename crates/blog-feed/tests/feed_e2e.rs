#![forbid(unsafe_code)]

//! End-to-end tests driving the feed through the program simulator.
//!
//! Frames are 70 columns wide unless a test says otherwise, which keeps
//! both side columns hidden so every marker on screen belongs to a post.

use std::time::Duration;

use blog_feed::theme;
use blog_feed::view::detail::panel_rect;
use blog_feed::{Author, FeedModel, FeedMsg, Post, PostStore, ViewMode};
use feed_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use feed_core::geometry::Rect;
use feed_render::buffer::{Buffer, buffer_to_text};
use feed_render::cell::{CellContent, StyleFlags};
use feed_runtime::ProgramSimulator;
use feed_runtime::simulator::CmdRecord;
use proptest::prelude::*;

const WIDTH: u16 = 70;

fn bundled_sim() -> ProgramSimulator<FeedModel> {
    let mut sim = ProgramSimulator::new(FeedModel::new(PostStore::bundled().expect("bundled")));
    sim.init();
    sim
}

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code))
}

fn click(x: u16, y: u16) -> Event {
    Event::Mouse(MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y))
}

/// Text of `rect`, one line per row.
fn region_text(buf: &Buffer, rect: Rect) -> String {
    let mut out = String::new();
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            match buf.get(x, y).map(|c| c.content) {
                Some(CellContent::Char(c)) => out.push(c),
                Some(CellContent::Empty) => out.push(' '),
                _ => {}
            }
        }
        out.push('\n');
    }
    out
}

/// Column and row of the first occurrence of `needle`.
fn find(buf: &Buffer, needle: &str) -> Option<(u16, u16)> {
    for y in 0..buf.height() {
        let mut text = String::new();
        let mut columns = Vec::new();
        for (x, cell) in buf.row_cells(y).iter().enumerate() {
            let ch = match cell.content {
                CellContent::Char(c) => c,
                CellContent::Empty => ' ',
                CellContent::Continuation => continue,
            };
            columns.push(x as u16);
            text.push(ch);
        }
        if let Some(byte) = text.find(needle) {
            let index = text[..byte].chars().count();
            return Some((columns[index], y));
        }
    }
    None
}

fn panel_text(buf: &Buffer) -> String {
    region_text(buf, panel_rect(buf.area()))
}

fn post(id: u64, title: &str, content: &str, tags: &[&str], image: Option<&str>, verified: bool) -> Post {
    Post {
        id,
        author: Author {
            name: format!("Author{id}"),
            username: format!("user{id}"),
            avatar: String::new(),
            verified,
        },
        title: title.to_string(),
        excerpt: format!("Excerpt {id}"),
        content: content.to_string(),
        image: image.map(str::to_string),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        timestamp: "1h".to_string(),
        likes: 10 + id,
        comments: 20 + id,
        shares: 30 + id,
    }
}

#[test]
fn list_shows_every_post_in_order() {
    let mut sim = bundled_sim();
    let text = buffer_to_text(sim.capture_frame(WIDTH, 90));
    assert!(text.starts_with(" Personal Blog Feed"));

    let titles: Vec<String> = sim.model().store().posts().iter().map(|p| p.title.clone()).collect();
    let mut last = 0;
    for title in &titles {
        let at = text.find(title.as_str()).unwrap_or_else(|| panic!("missing {title}"));
        assert!(at > last, "{title} out of order");
        last = at;
    }
}

#[test]
fn verified_marker_in_list_iff_verified() {
    let mut sim = bundled_sim();
    let verified = sim.model().store().posts().iter().filter(|p| p.author.verified).count();
    let text = buffer_to_text(sim.capture_frame(WIDTH, 90));
    assert_eq!(text.matches(theme::VERIFIED_MARK).count(), verified);

    // JohnDoe is not verified: his header line carries no marker.
    let line = text.lines().find(|l| l.contains("JohnDoe")).expect("JohnDoe row");
    assert!(!line.contains(theme::VERIFIED_MARK));
}

#[test]
fn verified_marker_in_detail_iff_verified() {
    let mut sim = bundled_sim();
    for (index, verified) in [(0, true), (2, false), (4, false)] {
        sim.send(FeedMsg::Activate(index));
        let panel = panel_text(sim.capture_frame(WIDTH, 40));
        assert_eq!(panel.contains(theme::VERIFIED_MARK), verified, "post {index}");
    }
}

#[test]
fn long_verified_author_header_wraps_in_both_views() {
    let mut long = post(1, "Notes", "Body", &[], None, true);
    long.author.name = "Alexandria Montgomery-Whitfield".to_string();
    long.author.username = "alexandria_montgomery".to_string();
    long.timestamp = "3 days ago".to_string();
    let store = PostStore::from_posts(vec![long]).expect("store");
    let mut sim = ProgramSimulator::new(FeedModel::new(store));
    sim.init();

    let text = buffer_to_text(sim.capture_frame(40, 20));
    assert!(text.contains(theme::VERIFIED_MARK), "{text}");
    assert!(text.contains("@alexandria_montgomery"), "{text}");
    assert!(text.contains("3 days ago"), "{text}");

    sim.send(FeedMsg::Activate(0));
    let buf = sim.capture_frame(40, 30);
    let text = buffer_to_text(buf);
    assert!(text.contains(theme::VERIFIED_MARK), "{text}");
    assert!(text.contains("3 days ago"), "{text}");
    let panel = panel_text(buf);
    assert!(panel.contains(&format!("Montgomery-Whitfield {}", theme::VERIFIED_MARK)), "{panel}");
    assert!(panel.contains("@alexandria_montgomery"), "{panel}");
    assert!(panel.contains("3 days ago"), "{panel}");
}

#[test]
fn image_blocks_follow_image_presence() {
    let mut sim = bundled_sim();
    let with_image = sim.model().store().posts().iter().filter(|p| p.image.is_some()).count();
    let text = buffer_to_text(sim.capture_frame(WIDTH, 90));
    assert_eq!(text.matches(theme::IMAGE_MARK).count(), with_image);

    // Post 3 has `"image": ""`, post 5 has no image field.
    for (index, expected) in [(0, 1), (2, 0), (4, 0)] {
        sim.send(FeedMsg::Activate(index));
        let panel = panel_text(sim.capture_frame(WIDTH, 40));
        assert_eq!(panel.matches(theme::IMAGE_MARK).count(), expected, "post {index}");
    }
}

#[test]
fn clicking_a_summary_opens_that_post() {
    let mut sim = bundled_sim();
    let (x, y) = find(sim.capture_frame(WIDTH, 90), "Songs That Got Me Through").expect("title");
    sim.inject_event(click(x, y));

    assert_eq!(sim.model().mode(), ViewMode::Detail);
    assert_eq!(sim.model().selected_post().map(|p| p.id), Some(2));

    let panel = panel_text(sim.capture_frame(WIDTH, 40));
    assert!(panel.contains("Post"));
    assert!(panel.contains("Janis Joplin"));
    assert!(panel.contains("@janisjoplin • 5h"));
    assert!(panel.contains("Songs That Got Me Through the Winter"));
    assert!(!panel.contains("McFly"));
}

#[test]
fn tags_render_in_order_in_both_views() {
    let mut sim = bundled_sim();
    let text = buffer_to_text(sim.capture_frame(WIDTH, 90));
    let row = text.lines().find(|l| l.contains("#music")).expect("list tags");
    assert!(row.find("#music") < row.find("#life"));
    assert_eq!(text.matches("#music").count(), 1);

    sim.send(FeedMsg::Activate(1));
    let panel = panel_text(sim.capture_frame(WIDTH, 40));
    let row = panel.lines().find(|l| l.contains("#music")).expect("detail tags");
    assert!(row.contains("#music #life"));
    assert_eq!(panel.matches('#').count(), 2);
}

#[test]
fn share_count_only_in_detail() {
    let mut sim = bundled_sim();
    let first = &sim.model().store().posts()[0];
    let (shares, likes) = (first.shares, first.likes);

    let text = buffer_to_text(sim.capture_frame(WIDTH, 90));
    let counters = text
        .lines()
        .find(|l| l.contains(&format!("{} {likes}", theme::LIKE_GLYPH)))
        .expect("list counters");
    assert!(counters.trim_end().ends_with(theme::SHARE_GLYPH));

    sim.send(FeedMsg::Activate(0));
    let panel = panel_text(sim.capture_frame(WIDTH, 60));
    assert!(panel.contains(&format!("{} {shares}", theme::SHARE_GLYPH)));
    assert!(panel.contains(&format!("{} {shares}", theme::REPOST_GLYPH)));
}

#[test]
fn emphasized_paragraphs_render_bold() {
    let store = PostStore::from_posts(vec![post(
        1,
        "Markup",
        "**Intro**\n\nSecond paragraph",
        &[],
        None,
        false,
    )])
    .expect("store");
    let mut sim = ProgramSimulator::new(FeedModel::new(store));
    sim.init();
    sim.send(FeedMsg::Activate(0));
    let buf = sim.capture_frame(WIDTH, 30).clone();

    let panel = panel_text(&buf);
    assert!(!panel.contains("**"));

    let (x, y) = find(&buf, "Intro").expect("intro");
    assert!(buf.get(x, y).is_some_and(|c| c.flags.contains(StyleFlags::BOLD)));
    let (x, y) = find(&buf, "Second paragraph").expect("plain");
    assert!(buf.get(x, y).is_some_and(|c| !c.flags.contains(StyleFlags::BOLD)));
}

#[test]
fn close_control_dismisses() {
    let mut sim = bundled_sim();
    sim.send(FeedMsg::Activate(3));
    let (x, y) = find(sim.capture_frame(WIDTH, 40), theme::CLOSE_GLYPH).expect("close control");
    sim.inject_event(click(x, y));
    assert_eq!(sim.model().selection(), None);
    assert_eq!(sim.model().mode(), ViewMode::List);
}

#[test]
fn clicks_outside_the_panel_are_ignored() {
    let mut sim = bundled_sim();
    sim.send(FeedMsg::Activate(0));
    sim.capture_frame(WIDTH, 40);
    // The corner is backdrop over what used to be a summary block.
    sim.inject_event(click(0, 5));
    sim.inject_event(click(WIDTH - 1, 39));
    assert_eq!(sim.model().selection(), Some(0));
}

#[test]
fn escape_dismisses_and_is_idempotent() {
    let mut sim = bundled_sim();
    sim.inject_event(press(KeyCode::Escape));
    assert_eq!(sim.model().selection(), None);

    sim.send(FeedMsg::Activate(2));
    sim.inject_events(&[press(KeyCode::Escape), press(KeyCode::Escape)]);
    assert_eq!(sim.model().selection(), None);
    assert!(sim.is_running());

    let text = buffer_to_text(sim.capture_frame(WIDTH, 40));
    assert!(!text.contains(theme::CLOSE_GLYPH));
}

#[test]
fn keyboard_focus_and_enter() {
    let mut sim = bundled_sim();
    sim.inject_events(&[
        press(KeyCode::Char('j')),
        press(KeyCode::Down),
        press(KeyCode::Enter),
    ]);
    assert_eq!(sim.model().selection(), Some(2));
    assert_eq!(sim.command_log().last(), Some(&CmdRecord::None));
    assert!(sim.command_log().contains(&CmdRecord::Msg));

    // Enter inside the panel does not re-target.
    let before = sim.command_log().len();
    sim.inject_event(press(KeyCode::Enter));
    assert_eq!(sim.model().selection(), Some(2));
    assert_eq!(&sim.command_log()[before..], [CmdRecord::None]);

    sim.inject_event(press(KeyCode::Escape));
    assert_eq!(sim.model().focus(), 2);
}

#[test]
fn list_scrolls_to_keep_focus_visible() {
    let mut sim = bundled_sim();
    let last_title = sim.model().store().posts().last().expect("posts").title.clone();
    let text = buffer_to_text(sim.capture_frame(WIDTH, 20));
    assert!(!text.contains(&last_title));

    sim.inject_event(press(KeyCode::End));
    let text = buffer_to_text(sim.capture_frame(WIDTH, 20));
    assert!(text.contains(&last_title));
    assert!(text.contains(&theme::FOCUS_BAR.to_string()));

    // Clicking the now-visible last block opens it.
    let (x, y) = find(sim.last_frame().expect("frame"), &last_title).expect("title");
    sim.inject_event(click(x, y));
    assert_eq!(sim.model().selection(), Some(4));
}

#[test]
fn detail_panel_scrolls() {
    let mut sim = bundled_sim();
    sim.send(FeedMsg::Activate(0));
    let panel = panel_text(sim.capture_frame(WIDTH, 16));
    assert!(panel.contains("Why I Still Write"));
    assert!(panel.contains("more"));

    sim.inject_event(press(KeyCode::PageDown));
    assert!(sim.model().detail_scroll() > 0);
    let panel = panel_text(sim.capture_frame(WIDTH, 16));
    assert!(!panel.contains("Why I Still Write"));

    sim.inject_event(press(KeyCode::End));
    let panel = panel_text(sim.capture_frame(WIDTH, 16));
    assert!(panel.contains(&format!("{} 9", theme::SHARE_GLYPH)));

    sim.inject_event(press(KeyCode::Home));
    assert_eq!(sim.model().detail_scroll(), 0);
}

#[test]
fn wide_terminal_shows_navigation_and_suggestions() {
    let mut sim = bundled_sim();
    let text = buffer_to_text(sim.capture_frame(140, 40));
    for label in ["Feed", "Categories", "Notifications", "Drafts", "More"] {
        assert!(text.contains(label), "missing {label}");
    }
    assert!(text.contains("Search Blog"));
    assert!(text.contains("Suggested Authors"));
    assert!(text.contains("@levramcfly"));
    assert!(text.contains("Show more"));
}

#[test]
fn empty_store_renders_placeholder() {
    let mut sim = ProgramSimulator::new(FeedModel::new(PostStore::default()));
    sim.init();
    sim.inject_events(&[press(KeyCode::Down), press(KeyCode::Enter)]);
    assert_eq!(sim.model().selection(), None);
    let text = buffer_to_text(sim.capture_frame(WIDTH, 10));
    assert!(text.contains("No posts yet."));
}

#[test]
fn q_quits_and_exit_timer_quits() {
    let mut sim = bundled_sim();
    sim.inject_event(press(KeyCode::Char('q')));
    assert!(!sim.is_running());

    let model = FeedModel::new(PostStore::bundled().expect("bundled"))
        .with_exit_after(Duration::from_millis(20));
    let mut sim = ProgramSimulator::new(model);
    sim.init();
    assert_eq!(sim.tick_rate(), Some(Duration::from_millis(20)));
    assert_eq!(sim.command_log(), [CmdRecord::Tick(Duration::from_millis(20))]);
    sim.tick();
    assert!(!sim.is_running());
    assert_eq!(sim.command_log().last(), Some(&CmdRecord::Quit));
}

#[test]
fn tiny_frames_do_not_panic() {
    let mut sim = bundled_sim();
    for (w, h) in [(1, 1), (3, 2), (10, 4), (20, 3)] {
        sim.capture_frame(w, h);
        sim.send(FeedMsg::Activate(0));
        sim.capture_frame(w, h);
        sim.send(FeedMsg::Dismiss);
    }
}

fn arb_posts() -> impl Strategy<Value = Vec<Post>> {
    prop::collection::vec(
        (
            "[a-z]{3,8}( [a-z]{3,8}){0,6}",
            prop::collection::vec("[a-z]{3,6}", 0..3),
            any::<bool>(),
            any::<bool>(),
        ),
        1..6,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (content, tags, has_image, verified))| {
                let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
                let image = has_image.then_some("/pic.jpg");
                post(i as u64 + 1, &format!("TITLE{i}Q"), &content, &tags, image, verified)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn detail_shows_only_the_activated_post(posts in arb_posts(), pick in any::<prop::sample::Index>()) {
        let index = pick.index(posts.len());
        let store = PostStore::from_posts(posts.clone()).expect("unique ids");
        let mut sim = ProgramSimulator::new(FeedModel::new(store));
        sim.init();
        sim.send(FeedMsg::Activate(index));
        let panel = panel_text(sim.capture_frame(WIDTH, 50));

        let chosen = &posts[index];
        prop_assert!(panel.contains(&chosen.title));
        let chosen_handle = format!("@{}", chosen.author.username);
        prop_assert!(panel.contains(&chosen_handle));
        prop_assert_eq!(panel.contains(theme::VERIFIED_MARK), chosen.author.verified);
        prop_assert_eq!(panel.matches(theme::IMAGE_MARK).count(), usize::from(chosen.image.is_some()));
        for (i, other) in posts.iter().enumerate() {
            if i != index {
                prop_assert!(!panel.contains(&other.title));
                let other_handle = format!("@{} ", other.author.username);
                prop_assert!(!panel.contains(&other_handle));
            }
        }
    }

    #[test]
    fn dismiss_always_clears_and_repeats_harmlessly(
        posts in arb_posts(),
        steps in prop::collection::vec((0usize..8, any::<bool>()), 0..12),
    ) {
        let store = PostStore::from_posts(posts).expect("unique ids");
        let mut sim = ProgramSimulator::new(FeedModel::new(store));
        sim.init();
        for (index, dismiss) in steps {
            if dismiss {
                sim.send(FeedMsg::Dismiss);
                prop_assert_eq!(sim.model().selection(), None);
            } else {
                sim.send(FeedMsg::Activate(index));
            }
        }

        sim.send(FeedMsg::Dismiss);
        let once = (sim.model().selection(), sim.model().focus());
        let frame_once = sim.capture_frame(WIDTH, 30).clone();
        sim.send(FeedMsg::Dismiss);
        let twice = (sim.model().selection(), sim.model().focus());
        prop_assert_eq!(once.0, None);
        prop_assert_eq!(once, twice);
        prop_assert_eq!(&frame_once, sim.capture_frame(WIDTH, 30));
    }
}
