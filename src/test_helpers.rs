//! Shared test utilities for the simple-sitemap test suite.
//!
//! Provides record builders for the common fixtures (plain pages, videos with
//! and without an endpoint, a news article) and XML readers that parse
//! generated documents back so tests can assert on structure rather than on
//! raw substrings.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let xml = generate_sitemap(&pages(3), &GenerateOptions::default()).unwrap();
//! assert_well_formed(&xml);
//! assert_eq!(element_texts(&xml, "loc"), page_locs(0..3));
//! ```

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::ops::Range;

use crate::types::{NewsRecord, Publication, UrlRecord, VideoRecord};
use crate::validate::is_xml_char;

// =========================================================================
// Record builders
// =========================================================================

/// `http://www.example.com/page{i}` for each `i` in the range.
pub fn page_locs(range: Range<usize>) -> Vec<String> {
    range.map(|i| format!("http://www.example.com/page{i}")).collect()
}

/// `n` plain URL records: `page0`, `page1`, ...
pub fn pages(n: usize) -> Vec<UrlRecord> {
    page_locs(0..n).into_iter().map(UrlRecord::new).collect()
}

pub fn video_without_location() -> VideoRecord {
    VideoRecord {
        thumbnail_loc: "http://www.example.com/thumb.jpg".into(),
        title: "Test Video".into(),
        description: "Test Description".into(),
        ..VideoRecord::default()
    }
}

pub fn video_with_content() -> VideoRecord {
    VideoRecord {
        content_loc: Some("http://www.example.com/video.mp4".into()),
        ..video_without_location()
    }
}

pub fn news_item() -> NewsRecord {
    NewsRecord {
        publication: Publication {
            name: "The Example Times".into(),
            language: "en".into(),
        },
        publication_date: "2024-01-15".into(),
        title: "Breaking News Article".into(),
    }
}

// =========================================================================
// XML readers: panic with a clear message on malformed input
// =========================================================================

/// Parse the whole document; panics on the first well-formedness error.
///
/// quick-xml's reader does not police the character set, so every decoded
/// text and attribute value is also checked against the XML 1.0 `Char`
/// production.
pub fn assert_well_formed(xml: &str) {
    let mut reader = Reader::from_str(xml);
    let mut depth: i64 = 0;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                depth += 1;
                assert_legal_attributes(&e, xml);
            }
            Ok(Event::Empty(e)) => assert_legal_attributes(&e, xml),
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Text(t)) => {
                let text = t.unescape().expect("valid escapes");
                assert_legal_chars(&text, xml);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!(
                "malformed XML at byte {}: {e}\n{xml}",
                reader.buffer_position()
            ),
        }
    }
    assert_eq!(depth, 0, "unbalanced elements in:\n{xml}");
}

fn assert_legal_attributes(start: &BytesStart<'_>, xml: &str) {
    for attr in start.attributes() {
        let attr = attr.expect("well-formed attribute");
        let value = attr.unescape_value().expect("valid escapes");
        assert_legal_chars(&value, xml);
    }
}

fn assert_legal_chars(value: &str, xml: &str) {
    if let Some(c) = value.chars().find(|&c| !is_xml_char(c)) {
        panic!("illegal XML character U+{:04X} in:\n{xml}", u32::from(c));
    }
}

/// Text content of every element with exactly this qualified name, in
/// document order.
pub fn element_texts(xml: &str, name: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut inside = false;
    let mut texts = Vec::new();
    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) if e.name().as_ref() == name.as_bytes() => inside = true,
            Event::End(e) if e.name().as_ref() == name.as_bytes() => inside = false,
            Event::Text(t) if inside => {
                texts.push(t.unescape().expect("valid escapes").into_owned());
            }
            Event::Eof => break,
            _ => {}
        }
    }
    texts
}

/// Number of elements (start or empty) with this qualified name.
pub fn count_elements(xml: &str, name: &str) -> usize {
    let mut reader = Reader::from_str(xml);
    let mut count = 0;
    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == name.as_bytes() => count += 1,
            Event::Eof => break,
            _ => {}
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_escaped_markup() {
        assert_well_formed(r#"<a t="x &amp; &quot;y&quot;">1 &lt; 2<b/></a>"#);
    }

    #[test]
    #[should_panic(expected = "illegal XML character U+0001")]
    fn rejects_control_character_in_text() {
        assert_well_formed("<loc>http://www.example.com/a\u{1}b</loc>");
    }

    #[test]
    #[should_panic(expected = "illegal XML character U+FFFF")]
    fn rejects_noncharacter_in_attribute() {
        assert_well_formed("<xhtml:link hreflang=\"e\u{FFFF}n\"/>");
    }

    #[test]
    #[should_panic]
    fn rejects_unclosed_element() {
        assert_well_formed("<urlset><url></url>");
    }
}
