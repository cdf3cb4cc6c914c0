#![forbid(unsafe_code)]

//! The feed model: post store, selection, and keyboard focus.
//!
//! The model is in one of two modes. With no selection it shows the list.
//! With a selection it shows the detail panel above the list. Activating a
//! post sets the selection (re-targeting if a post is already open) and
//! dismissing clears it.

use std::cell::Cell;
use std::time::Duration;

use feed_core::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use feed_render::frame::{Frame, HitData, HitId};
use feed_runtime::{Cmd, Model};
use tracing::{debug, info};

use crate::data::{Post, PostStore};
use crate::view;

/// Lines scrolled by one PageUp/PageDown in the detail panel.
const DETAIL_PAGE: i32 = 8;
/// Posts skipped by one PageUp/PageDown in the list.
const LIST_PAGE: i32 = 3;

/// Which view is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    List,
    Detail,
}

/// Messages understood by [`FeedModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedMsg {
    /// Open the post at this store index.
    Activate(usize),
    /// Close the detail panel.
    Dismiss,
    /// Open the focused post.
    ActivateFocused,
    /// Move the focus (list) or scroll (detail) by this many lines.
    Step(i32),
    /// Move the focus (list) or scroll (detail) by this many pages.
    Page(i32),
    First,
    Last,
    Quit,
    Tick,
    Noop,
}

impl From<Event> for FeedMsg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Release => Self::Noop,
            Event::Key(key) if key.ctrl() && key.is_char('c') => Self::Quit,
            Event::Key(key) => match key.code {
                KeyCode::Char('q') => Self::Quit,
                KeyCode::Escape => Self::Dismiss,
                KeyCode::Enter => Self::ActivateFocused,
                KeyCode::Char('j') | KeyCode::Down => Self::Step(1),
                KeyCode::Char('k') | KeyCode::Up => Self::Step(-1),
                KeyCode::PageDown | KeyCode::Char(' ') => Self::Page(1),
                KeyCode::PageUp => Self::Page(-1),
                KeyCode::Home | KeyCode::Char('g') => Self::First,
                KeyCode::End | KeyCode::Char('G') => Self::Last,
                _ => Self::Noop,
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => Self::Step(1),
                MouseEventKind::ScrollUp => Self::Step(-1),
                _ => Self::Noop,
            },
            Event::Tick => Self::Tick,
            Event::Resize { .. } | Event::Focus(_) => Self::Noop,
        }
    }
}

/// State of the feed page.
pub struct FeedModel {
    store: PostStore,
    selection: Option<usize>,
    focus: usize,
    detail_scroll: u16,
    exit_after: Option<Duration>,
    /// First list row on screen, kept by the view so the focus stays visible.
    pub(crate) list_offset: Cell<u16>,
    /// Largest useful detail scroll for the last rendered panel.
    pub(crate) detail_max_scroll: Cell<u16>,
}

impl FeedModel {
    pub fn new(store: PostStore) -> Self {
        Self {
            store,
            selection: None,
            focus: 0,
            detail_scroll: 0,
            exit_after: None,
            list_offset: Cell::new(0),
            detail_max_scroll: Cell::new(0),
        }
    }

    /// Quit automatically once `after` has elapsed. Zero disables it.
    #[must_use]
    pub fn with_exit_after(mut self, after: Duration) -> Self {
        self.exit_after = (!after.is_zero()).then_some(after);
        self
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    /// Store index of the open post.
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// The open post, if any.
    pub fn selected_post(&self) -> Option<&Post> {
        self.selection.and_then(|i| self.store.get(i))
    }

    pub fn mode(&self) -> ViewMode {
        if self.selection.is_some() {
            ViewMode::Detail
        } else {
            ViewMode::List
        }
    }

    /// Store index of the post under the keyboard cursor.
    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn detail_scroll(&self) -> u16 {
        self.detail_scroll
    }

    /// Open the post at `index`. Returns `false` (and changes nothing) when
    /// no such post exists.
    pub fn activate(&mut self, index: usize) -> bool {
        let Some(post) = self.store.get(index) else {
            debug!(index, "activation of unknown post ignored");
            return false;
        };
        info!(post_id = post.id, index, "post opened");
        self.selection = Some(index);
        self.focus = index;
        self.detail_scroll = 0;
        self.detail_max_scroll.set(0);
        true
    }

    /// Close the detail panel. Does nothing when it is already closed.
    pub fn dismiss(&mut self) {
        if let Some(index) = self.selection.take() {
            info!(index, "post closed");
            self.detail_scroll = 0;
        }
    }

    fn move_focus(&mut self, delta: i32) {
        let Some(last) = self.store.len().checked_sub(1) else {
            return;
        };
        let target = (self.focus as i64 + i64::from(delta)).clamp(0, last as i64);
        self.focus = target as usize;
    }

    fn scroll_detail(&mut self, delta: i32) {
        let max = i32::from(self.detail_max_scroll.get());
        self.detail_scroll = (i32::from(self.detail_scroll) + delta).clamp(0, max) as u16;
    }
}

impl Model for FeedModel {
    type Message = FeedMsg;

    fn init(&mut self) -> Cmd<FeedMsg> {
        info!(posts = self.store.len(), "feed started");
        match self.exit_after {
            Some(after) => Cmd::tick(after),
            None => Cmd::none(),
        }
    }

    fn update(&mut self, msg: FeedMsg) -> Cmd<FeedMsg> {
        let mode = self.mode();
        match msg {
            FeedMsg::Activate(index) => {
                self.activate(index);
            }
            FeedMsg::Dismiss => self.dismiss(),
            FeedMsg::ActivateFocused => {
                if mode == ViewMode::List {
                    return Cmd::msg(FeedMsg::Activate(self.focus));
                }
            }
            FeedMsg::Step(delta) => match mode {
                ViewMode::List => self.move_focus(delta),
                ViewMode::Detail => self.scroll_detail(delta),
            },
            FeedMsg::Page(pages) => match mode {
                ViewMode::List => self.move_focus(pages * LIST_PAGE),
                ViewMode::Detail => self.scroll_detail(pages * DETAIL_PAGE),
            },
            FeedMsg::First => match mode {
                ViewMode::List => self.focus = 0,
                ViewMode::Detail => self.detail_scroll = 0,
            },
            FeedMsg::Last => match mode {
                ViewMode::List => self.focus = self.store.len().saturating_sub(1),
                ViewMode::Detail => self.detail_scroll = self.detail_max_scroll.get(),
            },
            FeedMsg::Quit => return Cmd::quit(),
            FeedMsg::Tick => {
                if self.exit_after.is_some() {
                    info!("exit timer elapsed");
                    return Cmd::quit();
                }
            }
            FeedMsg::Noop => {}
        }
        Cmd::none()
    }

    fn view(&self, frame: &mut Frame) {
        view::render(self, frame);
    }

    fn hit_message(&self, event: &MouseEvent, hit: (HitId, HitData)) -> Option<FeedMsg> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let (id, data) = hit;
        match id {
            view::POST_HIT => usize::try_from(data).ok().map(FeedMsg::Activate),
            view::CLOSE_HIT => Some(FeedMsg::Dismiss),
            view::PANEL_HIT | view::BACKDROP_HIT => Some(FeedMsg::Noop),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_core::event::{KeyEvent, Modifiers};

    fn model() -> FeedModel {
        FeedModel::new(PostStore::bundled().expect("bundled posts"))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    #[test]
    fn starts_in_list_mode() {
        let m = model();
        assert_eq!(m.mode(), ViewMode::List);
        assert_eq!(m.selection(), None);
        assert!(m.selected_post().is_none());
    }

    #[test]
    fn activate_opens_and_retargets() {
        let mut m = model();
        assert!(m.activate(1));
        assert_eq!(m.mode(), ViewMode::Detail);
        assert_eq!(m.selected_post().map(|p| p.id), Some(m.store().posts()[1].id));
        assert!(m.activate(3));
        assert_eq!(m.selection(), Some(3));
        assert_eq!(m.focus(), 3);
    }

    #[test]
    fn activate_out_of_range_is_ignored() {
        let mut m = model();
        assert!(!m.activate(99));
        assert_eq!(m.selection(), None);
        m.activate(0);
        m.update(FeedMsg::Activate(99));
        assert_eq!(m.selection(), Some(0));
    }

    #[test]
    fn dismiss_is_idempotent() {
        let mut m = model();
        m.dismiss();
        assert_eq!(m.selection(), None);
        m.activate(2);
        m.dismiss();
        m.dismiss();
        assert_eq!(m.selection(), None);
        assert_eq!(m.mode(), ViewMode::List);
    }

    #[test]
    fn key_mapping() {
        assert_eq!(FeedMsg::from(key(KeyCode::Escape)), FeedMsg::Dismiss);
        assert_eq!(FeedMsg::from(key(KeyCode::Enter)), FeedMsg::ActivateFocused);
        assert_eq!(FeedMsg::from(key(KeyCode::Char('j'))), FeedMsg::Step(1));
        assert_eq!(FeedMsg::from(key(KeyCode::Up)), FeedMsg::Step(-1));
        assert_eq!(FeedMsg::from(key(KeyCode::Char('q'))), FeedMsg::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL);
        assert_eq!(FeedMsg::from(Event::Key(ctrl_c)), FeedMsg::Quit);
        let release = KeyEvent::new(KeyCode::Enter).with_kind(KeyEventKind::Release);
        assert_eq!(FeedMsg::from(Event::Key(release)), FeedMsg::Noop);
    }

    #[test]
    fn focus_moves_and_clamps_in_list_mode() {
        let mut m = model();
        m.update(FeedMsg::Step(-1));
        assert_eq!(m.focus(), 0);
        m.update(FeedMsg::Step(2));
        assert_eq!(m.focus(), 2);
        m.update(FeedMsg::Last);
        assert_eq!(m.focus(), m.store().len() - 1);
        m.update(FeedMsg::Step(10));
        assert_eq!(m.focus(), m.store().len() - 1);
        m.update(FeedMsg::First);
        assert_eq!(m.focus(), 0);
    }

    #[test]
    fn enter_opens_focused_post() {
        let mut m = model();
        m.update(FeedMsg::Step(1));
        let cmd = m.update(FeedMsg::ActivateFocused);
        assert!(matches!(cmd, Cmd::Msg(FeedMsg::Activate(1))));
        assert_eq!(m.selection(), None);
        m.update(FeedMsg::Activate(1));
        assert_eq!(m.selection(), Some(1));
        assert!(matches!(m.update(FeedMsg::ActivateFocused), Cmd::None));
    }

    #[test]
    fn steps_scroll_detail_within_bounds() {
        let mut m = model();
        m.activate(0);
        m.detail_max_scroll.set(4);
        m.update(FeedMsg::Step(3));
        assert_eq!(m.detail_scroll(), 3);
        m.update(FeedMsg::Page(1));
        assert_eq!(m.detail_scroll(), 4);
        m.update(FeedMsg::Page(-1));
        assert_eq!(m.detail_scroll(), 0);
        // Focus does not move while the panel is open.
        assert_eq!(m.focus(), 0);
    }

    #[test]
    fn exit_timer_schedules_tick_and_quits() {
        let mut m = model().with_exit_after(Duration::from_millis(50));
        assert!(matches!(m.init(), Cmd::Tick(d) if d == Duration::from_millis(50)));
        assert!(matches!(m.update(FeedMsg::Tick), Cmd::Quit));

        let mut m = model().with_exit_after(Duration::ZERO);
        assert!(matches!(m.init(), Cmd::None));
        assert!(matches!(m.update(FeedMsg::Tick), Cmd::None));
    }
}
