#![forbid(unsafe_code)]

//! Elm-style runtime for terminal applications.
//!
//! The program runtime manages the update/view loop: terminal events become
//! messages, messages update the model, and the model is re-rendered into a
//! fresh [`Frame`] that the presenter diffs onto the screen. Side effects are
//! requested by returning a [`Cmd`] from `update`.
//!
//! # Example
//!
//! ```ignore
//! use feed_runtime::program::{Cmd, Model};
//! use feed_core::event::Event;
//! use feed_render::frame::Frame;
//!
//! struct Counter {
//!     count: i32,
//! }
//!
//! enum Msg {
//!     Increment,
//!     Quit,
//!     Ignore,
//! }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self {
//!         match event {
//!             Event::Key(k) if k.is_char('q') => Msg::Quit,
//!             Event::Key(k) if k.is_char('+') => Msg::Increment,
//!             _ => Msg::Ignore,
//!         }
//!     }
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> {
//!         match msg {
//!             Msg::Increment => { self.count += 1; Cmd::none() }
//!             Msg::Quit => Cmd::quit(),
//!             Msg::Ignore => Cmd::none(),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         // Render counter value to frame
//!     }
//! }
//! ```

use std::io::{self, BufWriter, Stdout};
use std::time::{Duration, Instant};

use feed_core::event::{Event, MouseEvent};
use feed_core::terminal_session::{SessionOptions, TerminalSession};
use feed_render::frame::{Frame, HitData, HitId};
use feed_render::presenter::Presenter;
use tracing::{debug, debug_span, info};

/// The Model trait defines application state and behavior.
pub trait Model: Sized {
    /// The message type for this model.
    ///
    /// Messages represent actions that update the model state.
    /// Must be convertible from terminal events.
    type Message: From<Event> + Send + 'static;

    /// Initialize the model with startup commands.
    ///
    /// Called once when the program starts.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message.
    ///
    /// This is the only place state changes. Returns commands for any side
    /// effects that should be executed.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state to a frame.
    fn view(&self, frame: &mut Frame);

    /// Translate a mouse event that landed on a registered hit region.
    ///
    /// `hit` is the result of `hit_test` against the most recently rendered
    /// frame. Returning `None` falls back to `From<Event>`.
    ///
    /// # Default
    ///
    /// Returns `None` (hit regions are ignored).
    fn hit_message(&self, _event: &MouseEvent, _hit: (HitId, HitData)) -> Option<Self::Message> {
        None
    }
}

/// Commands represent side effects to be executed by the runtime.
pub enum Cmd<M> {
    /// No operation.
    None,
    /// Quit the application.
    Quit,
    /// Send a message to the model.
    Msg(M),
    /// Deliver `Event::Tick` every `duration`.
    Tick(Duration),
}

impl<M> Default for Cmd<M> {
    fn default() -> Self {
        Self::None
    }
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Tick(d) => f.debug_tuple("Tick").field(d).finish(),
        }
    }
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a quit command.
    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Create a message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Create a tick command.
    #[inline]
    pub fn tick(duration: Duration) -> Self {
        Self::Tick(duration)
    }
}

/// Configuration for a [`Program`].
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Capture mouse events.
    pub mouse: bool,
    /// Upper bound on how long the loop blocks waiting for input.
    pub poll_interval: Duration,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            mouse: true,
            poll_interval: Duration::from_millis(100),
        }
    }
}

/// Drives a [`Model`] against a real terminal.
pub struct Program<M: Model> {
    model: M,
    config: ProgramConfig,
    session: TerminalSession,
    presenter: Presenter<BufWriter<Stdout>>,
    width: u16,
    height: u16,
    last_frame: Option<Frame>,
    running: bool,
    dirty: bool,
    tick_rate: Option<Duration>,
    last_tick: Instant,
}

impl<M: Model> Program<M> {
    /// Create a program, entering raw mode according to `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal session cannot be set up.
    pub fn with_config(model: M, config: ProgramConfig) -> io::Result<Self> {
        let session = TerminalSession::new(SessionOptions {
            alternate_screen: config.alternate_screen,
            mouse_capture: config.mouse,
        })?;
        let (width, height) = session.size()?;
        info!(width, height, mouse = config.mouse, "program created");

        Ok(Self {
            model,
            config,
            session,
            presenter: Presenter::new(BufWriter::new(io::stdout())),
            width,
            height,
            last_frame: None,
            running: true,
            dirty: true,
            tick_rate: None,
            last_tick: Instant::now(),
        })
    }

    /// Run the update/view loop until the model quits.
    ///
    /// # Errors
    ///
    /// Returns the first terminal I/O error encountered.
    pub fn run(&mut self) -> io::Result<()> {
        let cmd = self.model.init();
        self.execute_cmd(cmd)?;

        while self.running {
            if self.dirty {
                self.render()?;
            }

            let timeout = self.next_timeout();
            if self.session.poll_event(timeout)?
                && let Some(event) = self.session.read_event()?
            {
                self.handle_event(event)?;
            }

            self.check_tick()?;
        }

        info!("program exiting");
        Ok(())
    }

    fn next_timeout(&self) -> Duration {
        match self.tick_rate {
            Some(rate) => rate
                .saturating_sub(self.last_tick.elapsed())
                .min(self.config.poll_interval),
            None => self.config.poll_interval,
        }
    }

    fn check_tick(&mut self) -> io::Result<()> {
        let Some(rate) = self.tick_rate else {
            return Ok(());
        };
        if self.running && self.last_tick.elapsed() >= rate {
            self.last_tick = Instant::now();
            self.dispatch(M::Message::from(Event::Tick))?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        if let Event::Resize { width, height } = event {
            debug!(width, height, "resize");
            self.width = width;
            self.height = height;
            self.presenter.invalidate();
        }

        let hit_msg = match &event {
            Event::Mouse(mouse) => self
                .last_frame
                .as_ref()
                .and_then(|frame| frame.hit_test(mouse.x, mouse.y))
                .and_then(|hit| self.model.hit_message(mouse, hit)),
            _ => None,
        };
        let msg = hit_msg.unwrap_or_else(|| M::Message::from(event));
        self.dispatch(msg)
    }

    fn dispatch(&mut self, msg: M::Message) -> io::Result<()> {
        let cmd = self.model.update(msg);
        self.dirty = true;
        self.execute_cmd(cmd)
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) -> io::Result<()> {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => {
                self.running = false;
            }
            Cmd::Msg(m) => {
                self.dispatch(m)?;
            }
            Cmd::Tick(duration) => {
                self.tick_rate = Some(duration);
                self.last_tick = Instant::now();
            }
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let _span = debug_span!("render", width = self.width, height = self.height).entered();
        let mut frame = Frame::new(self.width, self.height);
        self.model.view(&mut frame);
        self.presenter.present(&frame.buffer)?;
        self.last_frame = Some(frame);
        self.dirty = false;
        Ok(())
    }
}
