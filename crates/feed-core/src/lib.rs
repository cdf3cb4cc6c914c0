#![forbid(unsafe_code)]

//! Core: terminal lifecycle, events, geometry, and logging for the blog feed.

pub mod event;
pub mod geometry;
pub mod logging;
pub mod terminal_session;

// Re-export tracing macros at crate root for ergonomic use.
pub use logging::{debug, debug_span, error, info, info_span, trace, warn};
