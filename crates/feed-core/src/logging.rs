#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! Re-exports the tracing macros used across the workspace and installs the
//! file-backed subscriber. The terminal UI owns stdout, so log output never
//! goes to the screen: without a log file there is no subscriber and every
//! macro is a cheap no-op.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

pub use tracing::{debug, debug_span, error, info, info_span, trace, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive (e.g. `debug`,
/// `blog_feed=trace`). Overrides the default filter when set and valid.
pub const LOG_FILTER_ENV: &str = "BLOG_FEED_LOG";

/// Filter used when [`LOG_FILTER_ENV`] is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Install a global `fmt` subscriber that appends to `path`.
///
/// Returns `Ok(true)` if the subscriber was installed and `Ok(false)` if a
/// global subscriber already existed (the existing one is kept).
///
/// # Errors
///
/// Returns an error if the log file cannot be opened for appending.
pub fn init_file_logging(path: &Path, default_filter: &str) -> io::Result<bool> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .finish();

    Ok(tracing::subscriber::set_global_default(subscriber).is_ok())
}
