//! `<image:image>` builder.

use crate::types::ImageRecord;
use crate::validate::{self, SitemapError};
use crate::xml::{self, XmlWriter};

/// Only the image count is constrained; individual fields are free-form.
pub fn validate(images: &[ImageRecord]) -> Result<(), SitemapError> {
    validate::image_count(images.len())
}

/// Write every image for one URL, in input order.
pub fn write(w: &mut XmlWriter, images: &[ImageRecord]) -> Result<(), SitemapError> {
    validate(images)?;
    for image in images {
        write_one(w, image)?;
    }
    Ok(())
}

fn write_one(w: &mut XmlWriter, image: &ImageRecord) -> Result<(), SitemapError> {
    xml::open(w, "image:image", &[])?;
    xml::text_element(w, "image:loc", &image.loc)?;
    xml::optional_element(w, "image:caption", image.caption.as_deref())?;
    xml::optional_element(w, "image:geo_location", image.geo_location.as_deref())?;
    xml::optional_element(w, "image:title", image.title.as_deref())?;
    xml::optional_element(w, "image:license", image.license.as_deref())?;
    xml::close(w, "image:image")
}
