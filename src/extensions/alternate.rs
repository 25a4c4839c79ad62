//! `<xhtml:link rel="alternate">` builder for hreflang annotations.

use crate::types::AlternateRecord;
use crate::validate::SitemapError;
use crate::xml::{self, XmlWriter};

pub fn write(w: &mut XmlWriter, alternates: &[AlternateRecord]) -> Result<(), SitemapError> {
    for alt in alternates {
        xml::empty_element(
            w,
            "xhtml:link",
            &[
                ("rel", "alternate"),
                ("hreflang", alt.hreflang.as_str()),
                ("href", alt.href.as_str()),
            ],
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_self_closing_link_per_alternate() {
        let alternates = vec![
            AlternateRecord::new("http://www.example.com/page", "x-default"),
            AlternateRecord::new("http://www.example.com/en/page", "en"),
            AlternateRecord::new("http://www.example.com/fr/page", "fr"),
        ];
        let mut w = xml::writer(false);
        write(&mut w, &alternates).unwrap();
        let out = xml::finish(w).unwrap();
        assert_eq!(
            out,
            r#"<xhtml:link rel="alternate" hreflang="x-default" href="http://www.example.com/page"/><xhtml:link rel="alternate" hreflang="en" href="http://www.example.com/en/page"/><xhtml:link rel="alternate" hreflang="fr" href="http://www.example.com/fr/page"/>"#
        );
    }

    #[test]
    fn empty_list_writes_nothing() {
        let mut w = xml::writer(true);
        write(&mut w, &[]).unwrap();
        assert!(xml::finish(w).unwrap().is_empty());
    }
}
