//! Input records and output shapes shared by every generator.
//!
//! Records mirror the JSON shape used by existing sitemap tooling: field
//! names are camelCase on the wire (`thumbnailLoc`, `publicationDate`), and
//! every optional element maps to an `Option`. Absent and zero are different
//! things here: `priority: Some(0.0)` is emitted as `<priority>0</priority>`,
//! `priority: None` emits nothing.

use crate::validate::SitemapError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Valid values for the `<changefreq>` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub const ALL: [ChangeFrequency; 7] = [
        ChangeFrequency::Always,
        ChangeFrequency::Hourly,
        ChangeFrequency::Daily,
        ChangeFrequency::Weekly,
        ChangeFrequency::Monthly,
        ChangeFrequency::Yearly,
        ChangeFrequency::Never,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeFrequency {
    type Err = SitemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChangeFrequency::ALL
            .into_iter()
            .find(|freq| freq.as_str() == s)
            .ok_or(SitemapError::InvalidChangeFrequency)
    }
}

impl TryFrom<String> for ChangeFrequency {
    type Error = SitemapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One `<url>` entry of a sitemap document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    /// Absolute page URL. At most 2048 characters.
    pub loc: String,
    /// Last modification date, strictly `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changefreq: Option<ChangeFrequency>,
    /// Relative priority in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
    /// Up to 1000 images.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<VideoRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news: Option<NewsRecord>,
    /// Alternate-language versions of this page (`xhtml:link`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternates: Vec<AlternateRecord>,
}

impl UrlRecord {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            ..Self::default()
        }
    }
}

/// `<image:image>` entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub loc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl ImageRecord {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            ..Self::default()
        }
    }
}

/// Whether a restriction or platform list is an allow-list or a deny-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Allow,
    Deny,
}

impl Relationship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Allow => "allow",
            Relationship::Deny => "deny",
        }
    }
}

/// Countries (ISO 3166 codes) where the video may or may not be played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restriction {
    pub relationship: Relationship,
    pub countries: Vec<String>,
}

/// Platforms (`web`, `mobile`, `tv`) where the video may or may not be played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub relationship: Relationship,
    pub platforms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// ISO 4217 currency code.
    pub currency: String,
    pub value: f64,
    /// `rent` or `own`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub price_type: Option<String>,
    /// `hd` or `sd`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Uploader {
    pub name: String,
    /// URL with more information about the uploader.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

/// `<video:video>` entry.
///
/// At least one of `content_loc` and `player_loc` must be set; both is fine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub thumbnail_loc: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_loc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_loc: Option<String>,
    /// Seconds, in `[1, 28800]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    /// In `[0.0, 5.0]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_friendly: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_subscription: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<bool>,
    /// At most 32 tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restriction: Option<Restriction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader: Option<Uploader>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub name: String,
    /// ISO 639 language code (`en`, `zh-cn`).
    pub language: String,
}

/// `<news:news>` entry. All fields are required.
///
/// `publication_date` accepts any W3C datetime, not just `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsRecord {
    pub publication: Publication,
    pub publication_date: String,
    pub title: String,
}

/// `<xhtml:link rel="alternate">` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternateRecord {
    pub href: String,
    /// Language/region code or `x-default`.
    pub hreflang: String,
}

impl AlternateRecord {
    pub fn new(href: impl Into<String>, hreflang: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            hreflang: hreflang.into(),
        }
    }
}

/// One `<sitemap>` entry of a sitemap index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SitemapEntry {
    pub loc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<String>,
}

impl SitemapEntry {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
        }
    }
}

/// Output of [`crate::collection::generate_sitemap_collection`].
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapCollection {
    /// The `<sitemapindex>` document referencing every chunk.
    pub sitemap_index: String,
    /// One `<urlset>` document per chunk, in input order.
    pub sitemaps: Vec<String>,
    /// Public location of each chunk, parallel to `sitemaps`.
    pub locations: Vec<String>,
}
