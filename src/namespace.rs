//! Namespace declarations for the `<urlset>` root element.
//!
//! The base sitemap namespace is always declared. Extension namespaces are
//! declared only when at least one record in the batch uses that extension,
//! so a plain sitemap stays plain.

use crate::types::UrlRecord;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
pub const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";
pub const VIDEO_NS: &str = "http://www.google.com/schemas/sitemap-video/1.1";
pub const NEWS_NS: &str = "http://www.google.com/schemas/sitemap-news/0.9";
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Which extension namespaces a batch of records needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Namespaces {
    pub image: bool,
    pub video: bool,
    pub news: bool,
    pub xhtml: bool,
}

impl Namespaces {
    /// Scan the batch once and record every extension in use.
    pub fn resolve(urls: &[UrlRecord]) -> Self {
        urls.iter().fold(Self::default(), |ns, url| Self {
            image: ns.image || !url.images.is_empty(),
            video: ns.video || !url.videos.is_empty(),
            news: ns.news || url.news.is_some(),
            xhtml: ns.xhtml || !url.alternates.is_empty(),
        })
    }

    /// `xmlns` attributes in declaration order: base, image, video, news, xhtml.
    pub fn declarations(&self) -> Vec<(&'static str, &'static str)> {
        let mut attrs = vec![("xmlns", SITEMAP_NS)];
        if self.image {
            attrs.push(("xmlns:image", IMAGE_NS));
        }
        if self.video {
            attrs.push(("xmlns:video", VIDEO_NS));
        }
        if self.news {
            attrs.push(("xmlns:news", NEWS_NS));
        }
        if self.xhtml {
            attrs.push(("xmlns:xhtml", XHTML_NS));
        }
        attrs
    }

    /// Extension prefixes in use, for logging.
    pub fn extensions(&self) -> Vec<&'static str> {
        self.declarations()
            .into_iter()
            .filter_map(|(attr, _)| attr.strip_prefix("xmlns:"))
            .collect()
    }
}
