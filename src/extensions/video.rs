//! `<video:video>` builder.
//!
//! Element order is fixed by the video sitemap schema:
//!
//! ```text
//! thumbnail_loc, title, description          (always)
//! content_loc, player_loc                    (at least one)
//! duration, expiration_date, rating, view_count, publication_date,
//! family_friendly, requires_subscription, live,
//! tag*, category, restriction, platform, price, uploader
//! ```

use crate::types::VideoRecord;
use crate::validate::{self, SitemapError};
use crate::xml::{self, XmlWriter};

pub fn validate(video: &VideoRecord) -> Result<(), SitemapError> {
    validate::video_endpoint(video.content_loc.as_deref(), video.player_loc.as_deref())?;
    validate::video_duration(video.duration)?;
    validate::video_rating(video.rating)?;
    validate::video_tag_count(video.tags.len())
}

pub fn write(w: &mut XmlWriter, videos: &[VideoRecord]) -> Result<(), SitemapError> {
    for video in videos {
        write_one(w, video)?;
    }
    Ok(())
}

fn write_one(w: &mut XmlWriter, video: &VideoRecord) -> Result<(), SitemapError> {
    validate(video)?;

    xml::open(w, "video:video", &[])?;
    xml::text_element(w, "video:thumbnail_loc", &video.thumbnail_loc)?;
    xml::text_element(w, "video:title", &video.title)?;
    xml::text_element(w, "video:description", &video.description)?;
    xml::optional_element(w, "video:content_loc", video.content_loc.as_deref())?;
    xml::optional_element(w, "video:player_loc", video.player_loc.as_deref())?;
    if let Some(duration) = video.duration {
        xml::text_element(w, "video:duration", &duration.to_string())?;
    }
    xml::optional_element(w, "video:expiration_date", video.expiration_date.as_deref())?;
    if let Some(rating) = video.rating {
        xml::text_element(w, "video:rating", &xml::format_number(rating))?;
    }
    if let Some(views) = video.view_count {
        xml::text_element(w, "video:view_count", &views.to_string())?;
    }
    xml::optional_element(w, "video:publication_date", video.publication_date.as_deref())?;
    for (name, flag) in [
        ("video:family_friendly", video.family_friendly),
        ("video:requires_subscription", video.requires_subscription),
        ("video:live", video.live),
    ] {
        if let Some(flag) = flag {
            xml::text_element(w, name, xml::yes_no(flag))?;
        }
    }
    for tag in &video.tags {
        xml::text_element(w, "video:tag", tag)?;
    }
    xml::optional_element(w, "video:category", video.category.as_deref())?;
    if let Some(restriction) = &video.restriction {
        xml::text_element_with_attrs(
            w,
            "video:restriction",
            &[("relationship", restriction.relationship.as_str())],
            &restriction.countries.join(" "),
        )?;
    }
    if let Some(platform) = &video.platform {
        xml::text_element_with_attrs(
            w,
            "video:platform",
            &[("relationship", platform.relationship.as_str())],
            &platform.platforms.join(" "),
        )?;
    }
    if let Some(price) = &video.price {
        let mut attrs = vec![("currency", price.currency.as_str())];
        if let Some(kind) = &price.price_type {
            attrs.push(("type", kind.as_str()));
        }
        if let Some(resolution) = &price.resolution {
            attrs.push(("resolution", resolution.as_str()));
        }
        xml::text_element_with_attrs(w, "video:price", &attrs, &xml::format_number(price.value))?;
    }
    if let Some(uploader) = &video.uploader {
        let attrs: Vec<(&str, &str)> = uploader.info.iter().map(|info| ("info", info.as_str())).collect();
        xml::text_element_with_attrs(w, "video:uploader", &attrs, &uploader.name)?;
    }
    xml::close(w, "video:video")
}
