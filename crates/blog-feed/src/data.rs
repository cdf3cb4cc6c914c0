#![forbid(unsafe_code)]

//! Post records and the read-only store that holds them.
//!
//! The store is loaded once at startup, either from the JSON bundled into
//! the binary or from a file named on the command line, and never changes
//! afterwards. Loading is the only place the feed can fail.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

/// The dataset compiled into the binary.
pub const BUNDLED_POSTS: &str = include_str!("../data/blog-posts.json");

/// Author metadata shown above every post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub verified: bool,
}

impl Author {
    /// Avatar fallback: the first character of the name, or `?`.
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

/// One blog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub author: Author,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    /// `None` when the source has no image, `null`, or an empty string.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Pre-formatted display string, never parsed.
    pub timestamp: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Errors raised while loading the dataset.
#[derive(Debug)]
pub enum DataError {
    /// The data file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The JSON did not match the post schema.
    Parse(serde_json::Error),
    /// Two posts share an id.
    DuplicateId(u64),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            DataError::Parse(e) => write!(f, "invalid post data: {e}"),
            DataError::DuplicateId(id) => write!(f, "duplicate post id {id}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io { source, .. } => Some(source),
            DataError::Parse(e) => Some(e),
            DataError::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        DataError::Parse(e)
    }
}

/// Ordered, immutable collection of posts with unique ids.
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Vec<Post>,
}

impl PostStore {
    /// Build a store, rejecting duplicate ids.
    pub fn from_posts(posts: Vec<Post>) -> Result<Self, DataError> {
        let mut seen = HashSet::with_capacity(posts.len());
        for post in &posts {
            if !seen.insert(post.id) {
                return Err(DataError::DuplicateId(post.id));
            }
        }
        Ok(Self { posts })
    }

    /// Parse a JSON array of posts.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let posts: Vec<Post> = serde_json::from_str(json)?;
        Self::from_posts(posts)
    }

    /// The dataset compiled into the binary.
    pub fn bundled() -> Result<Self, DataError> {
        Self::from_json(BUNDLED_POSTS)
    }

    /// Read and parse a JSON file.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let json = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), posts = store.len(), "post file loaded");
        Ok(store)
    }

    /// All posts in source order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// The post at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Post> {
        self.posts.get(index)
    }

    /// Index of the post with `id`.
    pub fn position_of(&self, id: u64) -> Option<usize> {
        self.posts.iter().position(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
