//! # Simple Sitemap
//!
//! Generates XML sitemaps following the [sitemaps.org](https://www.sitemaps.org/)
//! protocol, with Google's image, video, and news extensions and `xhtml:link`
//! alternates for localized pages. Input is a list of plain records; output is
//! a document string, a partitioned collection, or a byte stream.
//!
//! # Architecture: Validate, Then Render
//!
//! Every entry point runs the same two steps:
//!
//! ```text
//! records ──validate──▶ ok ──resolve namespaces──▶ write elements ──▶ XML
//!            │
//!            └──▶ SitemapError (nothing rendered)
//! ```
//!
//! Validation is complete before any output is produced, so a caller never
//! sees half a document. Rendering is pure: the same records and options
//! always produce the same bytes (collections take an explicit date for this).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Input records (`UrlRecord`, `VideoRecord`, ...) and the collection result |
//! | [`validate`] | Protocol limits, `SitemapError`, and per-field checks |
//! | [`namespace`] | Decides which extension namespaces a `<urlset>` declares |
//! | [`xml`] | Thin `quick-xml` writer helpers shared by every builder |
//! | [`extensions`] | Image, video, news, and alternate-link element builders |
//! | [`generate`] | Single sitemap and sitemap index documents |
//! | [`naming`] | Chunk locations for collections (prefix template or custom) |
//! | [`collection`] | Splits large URL sets into chunks plus an index, in parallel |
//! | [`stream`] | Incremental rendering of a single sitemap |
//! | [`config`] | `sitemap.toml` loading, validation, and merging |
//! | [`output`] | CLI summaries for every subcommand |
//!
//! # Design Decisions
//!
//! ## Minimal Namespace Declarations
//!
//! A `<urlset>` only declares the extension namespaces its records actually
//! use. A plain sitemap carries just the core namespace, which keeps output
//! byte-identical to what crawlers and existing snapshots expect.
//!
//! ## One Writer, Two Layouts
//!
//! Pretty and compact output come from the same element builders; only the
//! `quick-xml` writer's indentation differs. Streaming reuses those builders
//! too and drains the writer after each `<url>`, so concatenated stream
//! chunks equal the materialized document.
//!
//! ## Typed Change Frequency
//!
//! `changefreq` is an enum. An unknown value is rejected when the record is
//! parsed, so rendering never has to re-check it.

pub mod collection;
pub mod config;
pub mod extensions;
pub mod generate;
pub mod namespace;
pub mod naming;
pub mod output;
pub mod stream;
pub mod types;
pub mod validate;
pub mod xml;

#[cfg(test)]
pub(crate) mod test_helpers;
