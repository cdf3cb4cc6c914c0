#![forbid(unsafe_code)]

//! Deterministic program simulator for testing.
//!
//! `ProgramSimulator` runs a [`Model`] without a real terminal, enabling
//! event injection, direct message sends, and frame capture.
//!
//! # Example
//!
//! ```ignore
//! use feed_runtime::simulator::ProgramSimulator;
//!
//! let mut sim = ProgramSimulator::new(Counter { value: 0 });
//! sim.init();
//! sim.send(Msg::Increment);
//! assert_eq!(sim.model().value, 1);
//!
//! let buf = sim.capture_frame(80, 24);
//! // Assert on buffer contents...
//! ```

use std::time::Duration;

use feed_core::event::Event;
use feed_render::buffer::Buffer;
use feed_render::frame::Frame;

use crate::program::{Cmd, Model};

/// Record of a command that was executed during simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdRecord {
    /// No-op command.
    None,
    /// Quit command.
    Quit,
    /// Message sent to model.
    Msg,
    /// Tick scheduled.
    Tick(Duration),
}

/// Deterministic simulator for [`Model`] testing.
///
/// Mouse events are resolved against the hit grid of the most recently
/// captured frame, the same way the real runtime resolves them against the
/// last presented frame.
pub struct ProgramSimulator<M: Model> {
    model: M,
    frames: Vec<Buffer>,
    last_frame: Option<Frame>,
    command_log: Vec<CmdRecord>,
    running: bool,
    tick_rate: Option<Duration>,
}

impl<M: Model> ProgramSimulator<M> {
    /// Create a new simulator with the given model.
    ///
    /// The model is not initialized until [`init`](Self::init) is called.
    pub fn new(model: M) -> Self {
        Self {
            model,
            frames: Vec::new(),
            last_frame: None,
            command_log: Vec::new(),
            running: true,
            tick_rate: None,
        }
    }

    /// Call `Model::init()` and execute the returned commands.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
    }

    /// Inject terminal events into the model.
    ///
    /// Events after a quit are dropped.
    pub fn inject_events(&mut self, events: &[Event]) {
        for event in events {
            if !self.running {
                break;
            }
            let hit_msg = match event {
                Event::Mouse(mouse) => self
                    .last_frame
                    .as_ref()
                    .and_then(|frame| frame.hit_test(mouse.x, mouse.y))
                    .and_then(|hit| self.model.hit_message(mouse, hit)),
                _ => None,
            };
            let msg = hit_msg.unwrap_or_else(|| M::Message::from(event.clone()));
            let cmd = self.model.update(msg);
            self.execute_cmd(cmd);
        }
    }

    /// Inject a single terminal event into the model.
    pub fn inject_event(&mut self, event: Event) {
        self.inject_events(&[event]);
    }

    /// Deliver one `Event::Tick`, as the runtime does when the tick interval
    /// elapses. Does nothing if no tick was scheduled.
    pub fn tick(&mut self) {
        if self.tick_rate.is_some() {
            self.inject_event(Event::Tick);
        }
    }

    /// Send a specific message to the model.
    pub fn send(&mut self, msg: M::Message) {
        if !self.running {
            return;
        }
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
    }

    /// Render the model at the given size and keep the result.
    pub fn capture_frame(&mut self, width: u16, height: u16) -> &Buffer {
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        self.frames.push(frame.buffer.clone());
        &self.last_frame.insert(frame).buffer
    }

    /// The most recently captured frame (buffer and hit grid).
    pub fn last_full_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// Get all captured frame buffers.
    pub fn frames(&self) -> &[Buffer] {
        &self.frames
    }

    /// Get the most recently captured frame buffer, if any.
    pub fn last_frame(&self) -> Option<&Buffer> {
        self.frames.last()
    }

    /// Get a reference to the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// `false` once a `Cmd::Quit` has been executed.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the current tick rate (if any).
    pub fn tick_rate(&self) -> Option<Duration> {
        self.tick_rate
    }

    /// Get the command execution log.
    pub fn command_log(&self) -> &[CmdRecord] {
        &self.command_log
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {
                self.command_log.push(CmdRecord::None);
            }
            Cmd::Quit => {
                self.running = false;
                self.command_log.push(CmdRecord::Quit);
            }
            Cmd::Msg(m) => {
                self.command_log.push(CmdRecord::Msg);
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Tick(duration) => {
                self.tick_rate = Some(duration);
                self.command_log.push(CmdRecord::Tick(duration));
            }
        }
    }
}
