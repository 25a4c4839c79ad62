//! Public locations for the chunks of a sitemap collection.
//!
//! A collection needs one URL per chunk so the index can point at it. Two
//! strategies are supported:
//!
//! - **Prefix template**: `{base_url}/{prefix}-{index}.xml` with a zero-based
//!   index, e.g. `http://www.example.com/sitemap-0.xml`.
//! - **Custom**: a caller-supplied function from chunk index to an arbitrary
//!   location string.
//!
//! ```text
//! base_url = "http://www.example.com", prefix = "posts"
//!   chunk 0 → http://www.example.com/posts-0.xml
//!   chunk 1 → http://www.example.com/posts-1.xml
//! ```

use crate::validate::{self, SitemapError};
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_PREFIX: &str = "sitemap";

type LocationFn = dyn Fn(usize) -> String + Send + Sync;

/// How chunk locations are derived.
#[derive(Clone)]
pub enum ChunkNaming {
    Prefix(String),
    Custom(Arc<LocationFn>),
}

impl ChunkNaming {
    pub fn prefix(prefix: impl Into<String>) -> Self {
        ChunkNaming::Prefix(prefix.into())
    }

    pub fn custom(f: impl Fn(usize) -> String + Send + Sync + 'static) -> Self {
        ChunkNaming::Custom(Arc::new(f))
    }

    /// Only a prefix template has a length limit; custom locations are the
    /// caller's responsibility and are checked later as index entries.
    pub fn validate(&self) -> Result<(), SitemapError> {
        match self {
            ChunkNaming::Prefix(prefix) => validate::prefix_length(prefix),
            ChunkNaming::Custom(_) => Ok(()),
        }
    }

    /// Location of the chunk at `index` (zero-based).
    pub fn location(&self, base_url: &str, index: usize) -> String {
        match self {
            ChunkNaming::Prefix(prefix) => format!("{base_url}/{}", chunk_filename(prefix, index)),
            ChunkNaming::Custom(f) => f(index),
        }
    }
}

impl Default for ChunkNaming {
    fn default() -> Self {
        ChunkNaming::Prefix(DEFAULT_PREFIX.to_string())
    }
}

impl fmt::Debug for ChunkNaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkNaming::Prefix(prefix) => f.debug_tuple("Prefix").field(prefix).finish(),
            ChunkNaming::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for ChunkNaming {
    fn from(prefix: &str) -> Self {
        ChunkNaming::prefix(prefix)
    }
}

impl From<String> for ChunkNaming {
    fn from(prefix: String) -> Self {
        ChunkNaming::Prefix(prefix)
    }
}

/// `{prefix}-{index}.xml`
pub fn chunk_filename(prefix: &str, index: usize) -> String {
    format!("{prefix}-{index}.xml")
}

/// Last path segment of a location, used to name files written to disk.
///
/// - `"http://www.example.com/sitemap-0.xml"` → `"sitemap-0.xml"`
/// - `"sitemap-0.xml"` → `"sitemap-0.xml"`
/// - `"http://www.example.com/maps/"` → `None`
pub fn file_name_of(location: &str) -> Option<&str> {
    let without_query = location.split(['?', '#']).next().unwrap_or(location);
    match without_query.rsplit('/').next() {
        Some(name) if !name.is_empty() => Some(name),
        _ => None,
    }
}
