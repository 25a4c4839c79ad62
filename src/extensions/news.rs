//! `<news:news>` builder. Every field is required, so there is nothing to
//! validate beyond presence, which the type already guarantees.

use crate::types::NewsRecord;
use crate::validate::SitemapError;
use crate::xml::{self, XmlWriter};

pub fn write(w: &mut XmlWriter, news: &NewsRecord) -> Result<(), SitemapError> {
    xml::open(w, "news:news", &[])?;
    xml::open(w, "news:publication", &[])?;
    xml::text_element(w, "news:name", &news.publication.name)?;
    xml::text_element(w, "news:language", &news.publication.language)?;
    xml::close(w, "news:publication")?;
    xml::text_element(w, "news:publication_date", &news.publication_date)?;
    xml::text_element(w, "news:title", &news.title)?;
    xml::close(w, "news:news")
}
