//! Sitemap and sitemap-index document assembly.
//!
//! Turns validated records into complete XML documents. Both assemblers are
//! pure: no I/O, no shared state, and identical input always yields
//! byte-identical output.
//!
//! ## Sitemap Document
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>http://www.example.com/</loc>
//!     <lastmod>2005-01-01</lastmod>
//!     <changefreq>monthly</changefreq>
//!     <priority>0.8</priority>
//!   </url>
//! </urlset>
//! ```
//!
//! Inside each `<url>` the order is: `loc`, `lastmod`, `changefreq`,
//! `priority`, images, videos, news, alternates. Extension namespaces are
//! declared on `<urlset>` only when some record uses them (see
//! [`crate::namespace`]).
//!
//! ## Sitemap Index
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <sitemap>
//!     <loc>http://www.example.com/sitemap1.xml.gz</loc>
//!     <lastmod>2004-10-01</lastmod>
//!   </sitemap>
//! </sitemapindex>
//! ```
//!
//! ## Failure Model
//!
//! Any invalid record aborts the whole call. No partial document is ever
//! returned.

use crate::extensions::{alternate, image, news, video};
use crate::namespace::{Namespaces, SITEMAP_NS};
use crate::types::{SitemapEntry, UrlRecord};
use crate::validate::{self, SitemapError};
use crate::xml::{self, XmlWriter};

/// Per-call output options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Indent with two spaces and break lines between elements. When false
    /// the document is a single line.
    pub pretty_print: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self { pretty_print: true }
    }
}

impl GenerateOptions {
    pub fn compact() -> Self {
        Self {
            pretty_print: false,
        }
    }
}

/// Build one `<urlset>` document from a list of URL records.
///
/// # Errors
///
/// Fails with [`SitemapError::NoUrls`] for an empty list, or with the first
/// validation error found while walking the records in order.
pub fn generate_sitemap(urls: &[UrlRecord], options: &GenerateOptions) -> Result<String, SitemapError> {
    validate::url_list_not_empty(urls.len())?;
    let namespaces = Namespaces::resolve(urls);
    tracing::debug!(
        urls = urls.len(),
        extensions = ?namespaces.extensions(),
        "assembling sitemap"
    );

    let mut w = xml::writer(options.pretty_print);
    open_urlset(&mut w, &namespaces)?;
    for url in urls {
        write_url(&mut w, url)?;
    }
    close_urlset(&mut w)?;
    xml::finish(w)
}

/// Build one `<sitemapindex>` document.
///
/// # Errors
///
/// [`SitemapError::NoSitemaps`] for an empty list,
/// [`SitemapError::TooManySitemaps`] above 50,000 entries, otherwise the
/// first invalid `loc` or `lastmod`.
pub fn generate_sitemap_index(
    sitemaps: &[SitemapEntry],
    options: &GenerateOptions,
) -> Result<String, SitemapError> {
    validate::sitemap_count(sitemaps.len())?;
    tracing::debug!(sitemaps = sitemaps.len(), "assembling sitemap index");

    let mut w = xml::writer(options.pretty_print);
    xml::declaration(&mut w)?;
    xml::open(&mut w, "sitemapindex", &[("xmlns", SITEMAP_NS)])?;
    for entry in sitemaps {
        validate::sitemap_loc_length(&entry.loc)?;
        validate::lastmod(entry.lastmod.as_deref())?;
        xml::open(&mut w, "sitemap", &[])?;
        xml::text_element(&mut w, "loc", &entry.loc)?;
        xml::optional_element(&mut w, "lastmod", entry.lastmod.as_deref())?;
        xml::close(&mut w, "sitemap")?;
    }
    xml::close(&mut w, "sitemapindex")?;
    xml::finish(w)
}

/// XML declaration plus the `<urlset>` open tag with its namespaces.
pub(crate) fn open_urlset(w: &mut XmlWriter, namespaces: &Namespaces) -> Result<(), SitemapError> {
    xml::declaration(w)?;
    xml::open(w, "urlset", &namespaces.declarations())
}

pub(crate) fn close_urlset(w: &mut XmlWriter) -> Result<(), SitemapError> {
    xml::close(w, "urlset")
}

/// Validate and write one `<url>` element with all of its extensions.
pub(crate) fn write_url(w: &mut XmlWriter, url: &UrlRecord) -> Result<(), SitemapError> {
    validate::url_record(url)?;

    xml::open(w, "url", &[])?;
    xml::text_element(w, "loc", &url.loc)?;
    xml::optional_element(w, "lastmod", url.lastmod.as_deref())?;
    if let Some(freq) = url.changefreq {
        xml::text_element(w, "changefreq", freq.as_str())?;
    }
    if let Some(priority) = url.priority {
        xml::text_element(w, "priority", &xml::format_number(priority))?;
    }
    image::write(w, &url.images)?;
    video::write(w, &url.videos)?;
    if let Some(article) = &url.news {
        news::write(w, article)?;
    }
    alternate::write(w, &url.alternates)?;
    xml::close(w, "url")
}
