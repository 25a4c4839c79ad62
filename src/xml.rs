//! Thin layer over `quick_xml::Writer` used by every element builder.
//!
//! Builders only ever emit four shapes: an open tag with attributes, a close
//! tag, a text-only element, and an empty element. Keeping them here means
//! indentation and escaping are decided in one place.
//!
//! Pretty output indents by two spaces and keeps text-only elements on one
//! line. Compact output has no whitespace between tags at all.
//!
//! quick-xml escapes markup but passes control characters through, so every
//! text and attribute value is checked against the XML 1.0 character set
//! before it is written.

use crate::validate::{self, SitemapError};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

pub type XmlWriter = Writer<Vec<u8>>;

pub fn writer(pretty_print: bool) -> XmlWriter {
    if pretty_print {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    }
}

fn emit<'a>(w: &mut XmlWriter, event: impl Into<Event<'a>>) -> Result<(), SitemapError> {
    w.write_event(event.into())
        .map_err(|e| SitemapError::Xml(e.to_string()))
}

/// `<?xml version="1.0" encoding="UTF-8"?>`
pub fn declaration(w: &mut XmlWriter) -> Result<(), SitemapError> {
    emit(w, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
}

fn check_attrs(attrs: &[(&str, &str)]) -> Result<(), SitemapError> {
    attrs.iter().try_for_each(|(_, value)| validate::xml_text(value))
}

pub fn open(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<(), SitemapError> {
    check_attrs(attrs)?;
    let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
    emit(w, Event::Start(start))
}

pub fn close(w: &mut XmlWriter, name: &str) -> Result<(), SitemapError> {
    emit(w, Event::End(BytesEnd::new(name)))
}

/// `<name attr="..">text</name>` on one line.
pub fn text_element_with_attrs(
    w: &mut XmlWriter,
    name: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> Result<(), SitemapError> {
    validate::xml_text(text)?;
    open(w, name, attrs)?;
    emit(w, Event::Text(BytesText::new(text)))?;
    close(w, name)
}

pub fn text_element(w: &mut XmlWriter, name: &str, text: &str) -> Result<(), SitemapError> {
    text_element_with_attrs(w, name, &[], text)
}

/// Emits the element only when the value is present.
pub fn optional_element(
    w: &mut XmlWriter,
    name: &str,
    value: Option<&str>,
) -> Result<(), SitemapError> {
    match value {
        Some(text) => text_element(w, name, text),
        None => Ok(()),
    }
}

pub fn empty_element(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<(), SitemapError> {
    check_attrs(attrs)?;
    let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
    emit(w, Event::Empty(start))
}

/// Shortest decimal form: `0.8`, `1`, `0`. Negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

pub fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Take whatever has been written so far, leaving the writer's indentation
/// state intact for the next call.
pub fn drain(w: &mut XmlWriter) -> Vec<u8> {
    std::mem::take(w.get_mut())
}

pub fn finish(w: XmlWriter) -> Result<String, SitemapError> {
    String::from_utf8(w.into_inner()).map_err(|e| SitemapError::Xml(e.to_string()))
}
