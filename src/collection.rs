//! Partitioning large URL sets into a sitemap collection.
//!
//! A single sitemap may list at most 50,000 URLs. Larger sets are split into
//! contiguous chunks, each rendered as its own `<urlset>`, and a
//! `<sitemapindex>` is generated that points at every chunk.
//!
//! ```text
//! 5 URLs, max_urls_per_sitemap = 2
//!
//!   [u0 u1] [u2 u3] [u4]
//!      │       │      │
//!  sitemap-0 sitemap-1 sitemap-2   ← one <urlset> each
//!      └───────┴──────┘
//!       sitemap index               ← lastmod = today
//! ```
//!
//! ## Parallel Assembly
//!
//! Chunks are rendered in parallel with [rayon](https://docs.rs/rayon). Each
//! chunk is independent, so the only coordination needed is collecting the
//! results back in chunk order. When several chunks are invalid, the error
//! from the earliest chunk is reported.

use crate::generate::{GenerateOptions, generate_sitemap, generate_sitemap_index};
use crate::naming::ChunkNaming;
use crate::types::{SitemapCollection, SitemapEntry, UrlRecord};
use crate::validate::{self, MAX_URLS_PER_SITEMAP, SitemapError};
use chrono::{NaiveDate, Utc};
use rayon::prelude::*;

/// Options for [`generate_sitemap_collection`].
#[derive(Debug, Clone)]
pub struct CollectionOptions {
    /// Chunk size, in `[1, 50000]`.
    pub max_urls_per_sitemap: usize,
    pub naming: ChunkNaming,
    pub pretty_print: bool,
    /// Date stamped on every index entry. `None` uses the current UTC date.
    pub today: Option<NaiveDate>,
}

impl Default for CollectionOptions {
    fn default() -> Self {
        Self {
            max_urls_per_sitemap: MAX_URLS_PER_SITEMAP,
            naming: ChunkNaming::default(),
            pretty_print: true,
            today: None,
        }
    }
}

impl CollectionOptions {
    fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            pretty_print: self.pretty_print,
        }
    }

    fn lastmod(&self) -> String {
        self.today
            .unwrap_or_else(|| Utc::now().date_naive())
            .format("%Y-%m-%d")
            .to_string()
    }
}

/// Number of chunks `total` URLs split into.
pub fn chunk_count(total: usize, max_urls_per_sitemap: usize) -> usize {
    total.div_ceil(max_urls_per_sitemap)
}

/// URL count of each chunk, in chunk order. Every chunk is full except
/// possibly the last.
pub fn chunk_sizes(total: usize, max_urls_per_sitemap: usize) -> Vec<usize> {
    (0..chunk_count(total, max_urls_per_sitemap))
        .map(|i| (total - i * max_urls_per_sitemap).min(max_urls_per_sitemap))
        .collect()
}

/// Split `urls` into chunks, render each chunk, and index them.
///
/// # Errors
///
/// In order: [`SitemapError::NoUrls`], [`SitemapError::InvalidMaxUrlsPerSitemap`],
/// [`SitemapError::PrefixTooLong`], then any record or index-entry
/// validation error.
pub fn generate_sitemap_collection(
    base_url: &str,
    urls: &[UrlRecord],
    options: &CollectionOptions,
) -> Result<SitemapCollection, SitemapError> {
    validate::url_list_not_empty(urls.len())?;
    validate::max_urls_per_sitemap(options.max_urls_per_sitemap)?;
    options.naming.validate()?;

    let chunks = chunk_count(urls.len(), options.max_urls_per_sitemap);
    tracing::info!(
        urls = urls.len(),
        chunks,
        max_urls_per_sitemap = options.max_urls_per_sitemap,
        "partitioning sitemap collection"
    );

    let generate_options = options.generate_options();
    let rendered: Vec<Result<String, SitemapError>> = urls
        .par_chunks(options.max_urls_per_sitemap)
        .map(|chunk| generate_sitemap(chunk, &generate_options))
        .collect();
    let sitemaps = rendered.into_iter().collect::<Result<Vec<_>, _>>()?;

    let lastmod = options.lastmod();
    let locations: Vec<String> = (0..sitemaps.len())
        .map(|i| options.naming.location(base_url, i))
        .collect();
    let entries: Vec<SitemapEntry> = locations
        .iter()
        .map(|loc| SitemapEntry {
            loc: loc.clone(),
            lastmod: Some(lastmod.clone()),
        })
        .collect();
    let sitemap_index = generate_sitemap_index(&entries, &generate_options)?;

    Ok(SitemapCollection {
        sitemap_index,
        sitemaps,
        locations,
    })
}
