//! Incremental sitemap output.
//!
//! [`generate_sitemap_stream`] validates the whole batch up front and then
//! hands back a [`SitemapStream`] that renders one piece at a time as the
//! consumer pulls:
//!
//! ```text
//! next() → <?xml ...?><urlset ...>     header
//! next() → <url>...</url>              one per record
//! ...
//! next() → </urlset>                   footer
//! next() → None
//! ```
//!
//! Concatenating every chunk gives exactly the bytes
//! [`crate::generate::generate_sitemap`] returns for the same input, so the
//! two are interchangeable. Only one `<url>` is ever buffered at a time.

use crate::generate::{self, GenerateOptions};
use crate::namespace::Namespaces;
use crate::types::UrlRecord;
use crate::validate::{self, SitemapError};
use crate::xml::{self, XmlWriter};
use std::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Header,
    Body,
    Footer,
    Done,
}

/// Forward-only, single-pass stream of sitemap bytes.
pub struct SitemapStream<'a> {
    urls: std::slice::Iter<'a, UrlRecord>,
    namespaces: Namespaces,
    writer: XmlWriter,
    stage: Stage,
}

/// Validate `urls` and return a stream over the rendered document.
///
/// # Errors
///
/// Every validation error surfaces here, before any bytes are produced.
pub fn generate_sitemap_stream<'a>(
    urls: &'a [UrlRecord],
    options: &GenerateOptions,
) -> Result<SitemapStream<'a>, SitemapError> {
    validate::url_records(urls)?;
    let namespaces = Namespaces::resolve(urls);
    tracing::debug!(
        urls = urls.len(),
        extensions = ?namespaces.extensions(),
        "streaming sitemap"
    );
    Ok(SitemapStream {
        urls: urls.iter(),
        namespaces,
        writer: xml::writer(options.pretty_print),
        stage: Stage::Header,
    })
}

impl SitemapStream<'_> {
    fn render_next(&mut self) -> Option<Result<(), SitemapError>> {
        match self.stage {
            Stage::Header => {
                self.stage = Stage::Body;
                Some(generate::open_urlset(&mut self.writer, &self.namespaces))
            }
            Stage::Body => match self.urls.next() {
                Some(url) => Some(generate::write_url(&mut self.writer, url)),
                None => {
                    self.stage = Stage::Footer;
                    self.render_next()
                }
            },
            Stage::Footer => {
                self.stage = Stage::Done;
                Some(generate::close_urlset(&mut self.writer))
            }
            Stage::Done => None,
        }
    }

    /// Records not yet rendered.
    pub fn remaining(&self) -> usize {
        self.urls.len()
    }
}

impl Iterator for SitemapStream<'_> {
    type Item = Result<Vec<u8>, SitemapError>;

    fn next(&mut self) -> Option<Self::Item> {
        let rendered = self.render_next()?;
        if let Err(e) = rendered {
            self.stage = Stage::Done;
            return Some(Err(e));
        }
        let chunk = xml::drain(&mut self.writer);
        tracing::trace!(bytes = chunk.len(), "sitemap chunk");
        Some(Ok(chunk))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = match self.stage {
            Stage::Header => self.urls.len() + 2,
            Stage::Body => self.urls.len() + 1,
            Stage::Footer => 1,
            Stage::Done => 0,
        };
        (n, Some(n))
    }
}

impl FusedIterator for SitemapStream<'_> {}
