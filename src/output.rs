//! CLI output formatting for every subcommand.
//!
//! The XML itself goes to a file or to stdout; these summaries describe what
//! was produced. When XML is written to stdout no summary is printed, so the
//! document can be piped cleanly.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! 001 http://www.example.com/
//! 002 http://www.example.com/video
//!     Videos: 1
//! 003 http://www.example.com/news/article
//!     News: Example Times (en)
//!
//! Checked 3 URLs: 0 images, 1 video, 1 news item, 0 alternates
//! ```
//!
//! ## Collection
//!
//! ```text
//! 001 sitemap-0.xml (2 URLs)
//!     Location: http://www.example.com/sitemap-0.xml
//! 002 sitemap-1.xml (1 URL)
//!     Location: http://www.example.com/sitemap-1.xml
//!
//! Index → sitemap-index.xml
//! Generated 2 sitemaps, 3 URLs
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::types::{SitemapCollection, UrlRecord};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 URL`, `2 URLs`.
fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

// ============================================================================
// Check
// ============================================================================

/// One header line per record, with indented lines for any extensions.
pub fn format_check_output(urls: &[UrlRecord]) -> Vec<String> {
    let mut lines = Vec::new();
    let (mut images, mut videos, mut news, mut alternates) = (0, 0, 0, 0);

    for (i, url) in urls.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), url.loc));
        if !url.images.is_empty() {
            lines.push(format!("{}Images: {}", indent(1), url.images.len()));
        }
        if !url.videos.is_empty() {
            lines.push(format!("{}Videos: {}", indent(1), url.videos.len()));
        }
        if let Some(item) = &url.news {
            lines.push(format!(
                "{}News: {} ({})",
                indent(1),
                item.publication.name,
                item.publication.language
            ));
        }
        if !url.alternates.is_empty() {
            let langs: Vec<&str> = url.alternates.iter().map(|a| a.hreflang.as_str()).collect();
            lines.push(format!("{}Alternates: {}", indent(1), langs.join(", ")));
        }
        images += url.images.len();
        videos += url.videos.len();
        news += usize::from(url.news.is_some());
        alternates += url.alternates.len();
    }

    lines.push(String::new());
    lines.push(format!(
        "Checked {}: {}, {}, {}, {}",
        plural(urls.len(), "URL", "URLs"),
        plural(images, "image", "images"),
        plural(videos, "video", "videos"),
        plural(news, "news item", "news items"),
        plural(alternates, "alternate", "alternates"),
    ));
    lines
}

pub fn print_check_output(urls: &[UrlRecord]) {
    for line in format_check_output(urls) {
        println!("{}", line);
    }
}

// ============================================================================
// Single documents (urlset, index, stream)
// ============================================================================

/// Summary line for a single document written to `destination`.
///
/// ```text
/// Wrote 5 URLs → sitemap.xml
/// Wrote 1 sitemap → sitemap-index.xml
/// ```
pub fn format_document_output(count: usize, noun: (&str, &str), destination: &Path) -> Vec<String> {
    vec![format!(
        "Wrote {} → {}",
        plural(count, noun.0, noun.1),
        destination.display()
    )]
}

pub fn print_document_output(count: usize, noun: (&str, &str), destination: &Path) {
    for line in format_document_output(count, noun, destination) {
        println!("{}", line);
    }
}

// ============================================================================
// Collection
// ============================================================================

/// A chunk as written by the CLI: the file it landed in and its URL count.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenChunk {
    pub file_name: String,
    pub urls: usize,
}

/// Lists every chunk with its public location, then the index file.
pub fn format_collection_output(
    collection: &SitemapCollection,
    chunks: &[WrittenChunk],
    index_file: &str,
) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, (chunk, location)) in chunks.iter().zip(&collection.locations).enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            chunk.file_name,
            plural(chunk.urls, "URL", "URLs")
        ));
        lines.push(format!("{}Location: {}", indent(1), location));
    }
    let total: usize = chunks.iter().map(|c| c.urls).sum();
    lines.push(String::new());
    lines.push(format!("Index → {}", index_file));
    lines.push(format!(
        "Generated {}, {}",
        plural(chunks.len(), "sitemap", "sitemaps"),
        plural(total, "URL", "URLs")
    ));
    lines
}

pub fn print_collection_output(
    collection: &SitemapCollection,
    chunks: &[WrittenChunk],
    index_file: &str,
) {
    for line in format_collection_output(collection, chunks, index_file) {
        println!("{}", line);
    }
}
