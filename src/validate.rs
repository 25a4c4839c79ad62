//! Field-level validation for sitemap input.
//!
//! Every check fails with a fixed, human-readable message. Downstream tooling
//! matches on these strings, so they are part of the public contract and must
//! not be reworded.
//!
//! ## Limits
//!
//! | Check | Limit |
//! |-------|-------|
//! | URL / sitemap location length | 2048 characters |
//! | `lastmod` | exactly `YYYY-MM-DD` |
//! | `priority` | `[0, 1]` |
//! | Images per URL | 1000 |
//! | Video duration | `[1, 28800]` seconds |
//! | Video rating | `[0.0, 5.0]` |
//! | Tags per video | 32 |
//! | Sitemaps per index | 50,000 |
//! | URLs per sitemap chunk | `[1, 50000]` |
//! | Every text and attribute value | XML 1.0 `Char` production |
//!
//! Lengths count Unicode scalar values, not bytes.
//!
//! Markup characters (`<`, `&`, quotes) are fine in any value since the writer
//! escapes them. Control characters such as U+0001 and the noncharacters
//! U+FFFE and U+FFFF cannot be escaped at all in XML 1.0, so a value holding
//! one is rejected rather than producing a document parsers refuse.

use crate::extensions;
use crate::types::UrlRecord;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

pub const MAX_LOC_LENGTH: usize = 2048;
pub const MAX_IMAGES_PER_URL: usize = 1000;
pub const MAX_TAGS_PER_VIDEO: usize = 32;
pub const MAX_SITEMAPS_PER_INDEX: usize = 50_000;
pub const MAX_URLS_PER_SITEMAP: usize = 50_000;
pub const MIN_VIDEO_DURATION: u32 = 1;
pub const MAX_VIDEO_DURATION: u32 = 28_800;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is valid"));

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SitemapError {
    #[error("No URLs provided")]
    NoUrls,
    #[error("URL length must be less than 2048 characters")]
    UrlTooLong,
    #[error("Sitemap location length must be less than 2048 characters")]
    SitemapLocTooLong,
    #[error("Last modified date must be in YYYY-MM-DD format")]
    InvalidLastmod,
    #[error("Invalid change frequency")]
    InvalidChangeFrequency,
    #[error("Priority must be between 0 and 1")]
    PriorityOutOfRange,
    #[error("Maximum 1000 images per URL")]
    TooManyImages,
    #[error("Video must have either contentLoc or playerLoc")]
    VideoMissingLocation,
    #[error("Video duration must be between 1 and 28800 seconds")]
    VideoDurationOutOfRange,
    #[error("Video rating must be between 0.0 and 5.0")]
    VideoRatingOutOfRange,
    #[error("Maximum 32 tags per video")]
    TooManyVideoTags,
    #[error("No sitemaps provided")]
    NoSitemaps,
    #[error("Sitemap index can contain up to 50,000 sitemaps")]
    TooManySitemaps,
    #[error("Max URLs per sitemap must be between 1 and 50,000")]
    InvalidMaxUrlsPerSitemap,
    #[error("Prefix must be less than 2048 characters")]
    PrefixTooLong,
    #[error("Invalid XML character U+{code:04X}", code = u32::from(*.0))]
    InvalidXmlChar(char),
    #[error("XML serialization failed: {0}")]
    Xml(String),
}

fn exceeds_loc_length(loc: &str) -> bool {
    loc.chars().count() > MAX_LOC_LENGTH
}

pub fn url_length(loc: &str) -> Result<(), SitemapError> {
    if exceeds_loc_length(loc) {
        return Err(SitemapError::UrlTooLong);
    }
    Ok(())
}

pub fn sitemap_loc_length(loc: &str) -> Result<(), SitemapError> {
    if exceeds_loc_length(loc) {
        return Err(SitemapError::SitemapLocTooLong);
    }
    Ok(())
}

/// True for a bare `YYYY-MM-DD` date. Any time component is rejected.
///
/// Only the shape is checked; `2024-13-45` passes.
pub fn is_strict_date(value: &str) -> bool {
    DATE_RE.is_match(value)
}

pub fn lastmod(value: Option<&str>) -> Result<(), SitemapError> {
    match value {
        Some(date) if !is_strict_date(date) => Err(SitemapError::InvalidLastmod),
        _ => Ok(()),
    }
}

/// Checks a raw change frequency token. Typed records are valid by
/// construction; this is the entry point for untyped input.
pub fn changefreq(value: Option<&str>) -> Result<(), SitemapError> {
    match value {
        Some(token) => token.parse::<crate::types::ChangeFrequency>().map(|_| ()),
        None => Ok(()),
    }
}

pub fn priority(value: Option<f64>) -> Result<(), SitemapError> {
    match value {
        Some(p) if !(0.0..=1.0).contains(&p) => Err(SitemapError::PriorityOutOfRange),
        _ => Ok(()),
    }
}

pub fn image_count(count: usize) -> Result<(), SitemapError> {
    if count > MAX_IMAGES_PER_URL {
        return Err(SitemapError::TooManyImages);
    }
    Ok(())
}

pub fn video_endpoint(content_loc: Option<&str>, player_loc: Option<&str>) -> Result<(), SitemapError> {
    if content_loc.is_none() && player_loc.is_none() {
        return Err(SitemapError::VideoMissingLocation);
    }
    Ok(())
}

pub fn video_duration(value: Option<u32>) -> Result<(), SitemapError> {
    match value {
        Some(d) if !(MIN_VIDEO_DURATION..=MAX_VIDEO_DURATION).contains(&d) => {
            Err(SitemapError::VideoDurationOutOfRange)
        }
        _ => Ok(()),
    }
}

pub fn video_rating(value: Option<f64>) -> Result<(), SitemapError> {
    match value {
        Some(r) if !(0.0..=5.0).contains(&r) => Err(SitemapError::VideoRatingOutOfRange),
        _ => Ok(()),
    }
}

pub fn video_tag_count(count: usize) -> Result<(), SitemapError> {
    if count > MAX_TAGS_PER_VIDEO {
        return Err(SitemapError::TooManyVideoTags);
    }
    Ok(())
}

pub fn url_list_not_empty(count: usize) -> Result<(), SitemapError> {
    if count == 0 {
        return Err(SitemapError::NoUrls);
    }
    Ok(())
}

pub fn sitemap_count(count: usize) -> Result<(), SitemapError> {
    if count == 0 {
        return Err(SitemapError::NoSitemaps);
    }
    if count > MAX_SITEMAPS_PER_INDEX {
        return Err(SitemapError::TooManySitemaps);
    }
    Ok(())
}

pub fn max_urls_per_sitemap(value: usize) -> Result<(), SitemapError> {
    if !(1..=MAX_URLS_PER_SITEMAP).contains(&value) {
        return Err(SitemapError::InvalidMaxUrlsPerSitemap);
    }
    Ok(())
}

pub fn prefix_length(prefix: &str) -> Result<(), SitemapError> {
    if prefix.chars().count() > MAX_LOC_LENGTH {
        return Err(SitemapError::PrefixTooLong);
    }
    Ok(())
}

/// `Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]`
///
/// Surrogates cannot occur in a `char`, so only the gaps below U+0020 and
/// U+FFFE/U+FFFF need excluding.
pub fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Rejects the first character XML 1.0 cannot represent.
pub fn xml_text(value: &str) -> Result<(), SitemapError> {
    match value.chars().find(|&c| !is_xml_char(c)) {
        Some(c) => Err(SitemapError::InvalidXmlChar(c)),
        None => Ok(()),
    }
}

/// Every string a record contributes to the document, in element order.
fn text_values(url: &UrlRecord) -> Vec<&str> {
    let mut values = vec![url.loc.as_str()];
    values.extend(url.lastmod.as_deref());
    for image in &url.images {
        values.push(&image.loc);
        values.extend(image.caption.as_deref());
        values.extend(image.geo_location.as_deref());
        values.extend(image.title.as_deref());
        values.extend(image.license.as_deref());
    }
    for video in &url.videos {
        values.extend([&video.thumbnail_loc, &video.title, &video.description].map(String::as_str));
        values.extend(video.content_loc.as_deref());
        values.extend(video.player_loc.as_deref());
        values.extend(video.expiration_date.as_deref());
        values.extend(video.publication_date.as_deref());
        values.extend(video.tags.iter().map(String::as_str));
        values.extend(video.category.as_deref());
        if let Some(restriction) = &video.restriction {
            values.extend(restriction.countries.iter().map(String::as_str));
        }
        if let Some(platform) = &video.platform {
            values.extend(platform.platforms.iter().map(String::as_str));
        }
        if let Some(price) = &video.price {
            values.push(&price.currency);
            values.extend(price.price_type.as_deref());
            values.extend(price.resolution.as_deref());
        }
        if let Some(uploader) = &video.uploader {
            values.push(&uploader.name);
            values.extend(uploader.info.as_deref());
        }
    }
    if let Some(news) = &url.news {
        values.extend(
            [
                &news.publication.name,
                &news.publication.language,
                &news.publication_date,
                &news.title,
            ]
            .map(String::as_str),
        );
    }
    for alternate in &url.alternates {
        values.push(&alternate.hreflang);
        values.push(&alternate.href);
    }
    values
}

/// Validate one URL record and every extension attached to it.
///
/// Checks run in element order (loc, lastmod, priority, images, videos) so
/// the first reported error matches the first offending element. Character
/// legality is checked last, across every value.
pub fn url_record(url: &UrlRecord) -> Result<(), SitemapError> {
    url_length(&url.loc)?;
    lastmod(url.lastmod.as_deref())?;
    priority(url.priority)?;
    image_count(url.images.len())?;
    for video in &url.videos {
        extensions::video::validate(video)?;
    }
    text_values(url).into_iter().try_for_each(xml_text)
}

/// Validate a whole batch without producing any XML.
pub fn url_records(urls: &[UrlRecord]) -> Result<(), SitemapError> {
    url_list_not_empty(urls.len())?;
    urls.iter().try_for_each(url_record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn url_at_limit_is_accepted() {
        let loc = "a".repeat(MAX_LOC_LENGTH);
        assert!(url_length(&loc).is_ok());
    }

    #[test]
    fn url_over_limit_is_rejected() {
        let loc = format!("http://www.example.com/{}", "a".repeat(2048));
        assert_eq!(url_length(&loc), Err(SitemapError::UrlTooLong));
        assert_eq!(
            SitemapError::UrlTooLong.to_string(),
            "URL length must be less than 2048 characters"
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let loc = "é".repeat(MAX_LOC_LENGTH);
        assert!(loc.len() > MAX_LOC_LENGTH);
        assert!(url_length(&loc).is_ok());
    }

    #[test]
    fn sitemap_loc_has_its_own_message() {
        let loc = "a".repeat(2049);
        let err = sitemap_loc_length(&loc).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Sitemap location length must be less than 2048 characters"
        );
    }

    #[test]
    fn strict_date_accepts_bare_date() {
        assert!(is_strict_date("2005-01-01"));
        assert!(lastmod(Some("2024-01-15")).is_ok());
        assert!(lastmod(None).is_ok());
    }

    #[test]
    fn strict_date_rejects_other_shapes() {
        for bad in [
            "2024/01/15",
            "2024-01-15T10:30:00Z",
            "2024-1-15",
            "24-01-15",
            "",
            " 2024-01-15",
            "2024-01-15\n",
            "２０２４-01-15",
        ] {
            assert_eq!(lastmod(Some(bad)), Err(SitemapError::InvalidLastmod), "{bad:?}");
        }
    }

    #[test]
    fn changefreq_token_check() {
        assert!(changefreq(Some("hourly")).is_ok());
        assert!(changefreq(None).is_ok());
        assert_eq!(changefreq(Some("often")), Err(SitemapError::InvalidChangeFrequency));
    }

    #[test]
    fn priority_bounds_are_inclusive() {
        assert!(priority(Some(0.0)).is_ok());
        assert!(priority(Some(1.0)).is_ok());
        assert!(priority(None).is_ok());
        assert_eq!(priority(Some(-0.1)), Err(SitemapError::PriorityOutOfRange));
        assert_eq!(priority(Some(1.1)), Err(SitemapError::PriorityOutOfRange));
        assert_eq!(priority(Some(f64::NAN)), Err(SitemapError::PriorityOutOfRange));
    }

    #[test]
    fn video_ranges() {
        assert!(video_duration(Some(1)).is_ok());
        assert!(video_duration(Some(28_800)).is_ok());
        assert_eq!(video_duration(Some(0)), Err(SitemapError::VideoDurationOutOfRange));
        assert_eq!(video_duration(Some(30_000)), Err(SitemapError::VideoDurationOutOfRange));
        assert!(video_rating(Some(0.0)).is_ok());
        assert!(video_rating(Some(5.0)).is_ok());
        assert_eq!(video_rating(Some(6.0)), Err(SitemapError::VideoRatingOutOfRange));
        assert_eq!(video_rating(Some(-0.5)), Err(SitemapError::VideoRatingOutOfRange));
    }

    #[test]
    fn video_endpoint_requires_one_location() {
        assert!(video_endpoint(Some("a"), None).is_ok());
        assert!(video_endpoint(None, Some("b")).is_ok());
        assert!(video_endpoint(Some("a"), Some("b")).is_ok());
        assert_eq!(video_endpoint(None, None), Err(SitemapError::VideoMissingLocation));
    }

    #[test]
    fn cardinality_limits() {
        assert!(image_count(1000).is_ok());
        assert_eq!(image_count(1001), Err(SitemapError::TooManyImages));
        assert!(video_tag_count(32).is_ok());
        assert_eq!(video_tag_count(33), Err(SitemapError::TooManyVideoTags));
        assert_eq!(sitemap_count(0), Err(SitemapError::NoSitemaps));
        assert!(sitemap_count(50_000).is_ok());
        assert_eq!(sitemap_count(50_001), Err(SitemapError::TooManySitemaps));
    }

    #[test]
    fn chunk_size_range() {
        assert!(max_urls_per_sitemap(1).is_ok());
        assert!(max_urls_per_sitemap(50_000).is_ok());
        assert_eq!(max_urls_per_sitemap(0), Err(SitemapError::InvalidMaxUrlsPerSitemap));
        assert_eq!(max_urls_per_sitemap(50_001), Err(SitemapError::InvalidMaxUrlsPerSitemap));
        assert_eq!(
            SitemapError::InvalidMaxUrlsPerSitemap.to_string(),
            "Max URLs per sitemap must be between 1 and 50,000"
        );
    }

    #[test]
    fn prefix_limit() {
        assert!(prefix_length(&"a".repeat(2048)).is_ok());
        assert_eq!(prefix_length(&"a".repeat(2049)), Err(SitemapError::PrefixTooLong));
    }

    #[test]
    fn url_records_rejects_empty_batch() {
        assert_eq!(url_records(&[]), Err(SitemapError::NoUrls));
    }

    #[test]
    fn url_records_finds_bad_record_anywhere() {
        let mut urls = pages(5);
        urls[3].lastmod = Some("2024-01-15T10:30:00Z".into());
        assert_eq!(url_records(&urls), Err(SitemapError::InvalidLastmod));
    }

    #[test]
    fn url_record_checks_videos() {
        let mut url = UrlRecord::new("http://www.example.com/page");
        url.videos.push(video_without_location());
        assert_eq!(url_record(&url), Err(SitemapError::VideoMissingLocation));
    }

    #[test]
    fn xml_char_production() {
        for ok in ['\t', '\n', '\r', ' ', 'a', '<', '&', '\u{D7FF}', '\u{E000}', '\u{FFFD}', '\u{10000}', '\u{10FFFF}'] {
            assert!(is_xml_char(ok), "{:?} should be allowed", ok);
        }
        for bad in ['\u{0}', '\u{1}', '\u{8}', '\u{B}', '\u{C}', '\u{E}', '\u{1F}', '\u{FFFE}', '\u{FFFF}'] {
            assert!(!is_xml_char(bad), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn xml_text_reports_first_illegal_character() {
        assert!(xml_text("Tom & Jerry <3").is_ok());
        assert_eq!(xml_text("a\u{1}b\u{FFFF}"), Err(SitemapError::InvalidXmlChar('\u{1}')));
        assert_eq!(
            SitemapError::InvalidXmlChar('\u{B}').to_string(),
            "Invalid XML character U+000B"
        );
    }

    #[test]
    fn url_record_checks_characters_in_every_extension() {
        let mut in_loc = UrlRecord::new("http://www.example.com/a\u{1}b");
        assert_eq!(url_record(&in_loc), Err(SitemapError::InvalidXmlChar('\u{1}')));
        in_loc.loc = "http://www.example.com/".into();
        assert!(url_record(&in_loc).is_ok());

        let mut in_tag = UrlRecord::new("http://www.example.com/video");
        let mut video = video_with_content();
        video.tags.push("bad\u{C}tag".into());
        in_tag.videos.push(video);
        assert_eq!(url_record(&in_tag), Err(SitemapError::InvalidXmlChar('\u{C}')));

        let mut in_news = UrlRecord::new("http://www.example.com/news");
        let mut item = news_item();
        item.title = "Headline\u{FFFE}".into();
        in_news.news = Some(item);
        assert_eq!(url_record(&in_news), Err(SitemapError::InvalidXmlChar('\u{FFFE}')));

        let mut in_alternate = UrlRecord::new("http://www.example.com/");
        in_alternate
            .alternates
            .push(crate::types::AlternateRecord::new("http://www.example.com/de", "d\u{1F}e"));
        assert_eq!(url_record(&in_alternate), Err(SitemapError::InvalidXmlChar('\u{1F}')));
    }
}
