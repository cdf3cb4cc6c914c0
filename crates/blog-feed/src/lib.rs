#![forbid(unsafe_code)]

//! Blog Feed: a social-feed style view of blog posts for the terminal.
//!
//! The binary loads a post store, wraps it in a [`FeedModel`] and hands the
//! model to the runtime. Everything here is usable headless through
//! `feed_runtime::ProgramSimulator`, which is how the tests drive it.

pub mod app;
pub mod cli;
pub mod data;
pub mod error;
pub mod markup;
pub mod theme;
pub mod view;
pub mod widgets;

use std::path::Path;

use tracing::info;

pub use app::{FeedModel, FeedMsg, ViewMode};
pub use data::{Author, DataError, Post, PostStore};
pub use error::{Error, Result};

/// Load posts from `path`, or the bundled set when `path` is `None`.
///
/// # Errors
///
/// Returns [`Error::Data`] if the file is unreadable, malformed, or has a
/// duplicate post id.
pub fn load_store(path: Option<&Path>) -> Result<PostStore> {
    let store = match path {
        Some(path) => PostStore::load(path)?,
        None => PostStore::bundled()?,
    };
    let source = path.map_or_else(|| "bundled".to_string(), |p| p.display().to_string());
    info!(posts = store.len(), %source, "posts loaded");
    Ok(store)
}
