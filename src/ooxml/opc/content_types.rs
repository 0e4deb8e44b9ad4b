//! Content-type registry for OPC packages.
//!
//! Renders the `[Content_Types].xml` part: `Default` elements keyed by file
//! extension followed by `Override` elements keyed by absolute part name.

use crate::common::xml::push_escaped;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{content_type as ct, namespace};
use std::fmt::Write as FmtWrite;

/// Builder and emitter for `[Content_Types].xml`.
///
/// Entries render in insertion order; re-adding a key replaces its content
/// type in place. Callers that need a specific byte layout control it through
/// the order of their `add_*` calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTypes {
    /// Default content types by extension (without the leading dot)
    defaults: Vec<(String, String)>,

    /// Override content types by absolute partname
    overrides: Vec<(String, String)>,
}

impl ContentTypes {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the defaults every package needs
    /// (`rels` and `xml`).
    pub fn with_standard_defaults() -> Self {
        let mut cti = Self::new();
        cti.add_default("rels", ct::OPC_RELATIONSHIPS);
        cti.add_default("xml", ct::XML);
        cti
    }

    /// Map a file extension to a content type.
    pub fn add_default(&mut self, ext: &str, content_type: &str) -> &mut Self {
        upsert(&mut self.defaults, ext, content_type);
        self
    }

    /// Map an exact part name to a content type.
    pub fn add_override(&mut self, partname: &str, content_type: &str) -> &mut Self {
        upsert(&mut self.overrides, partname, content_type);
        self
    }

    /// Default entries in render order.
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &str)> {
        self.defaults.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Override entries in render order.
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overrides.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Resolve the content type a reader would assign to `partname`.
    ///
    /// An override for the exact part name wins over the default for its
    /// extension. Extension matching is ASCII case-insensitive.
    pub fn content_type_for(&self, partname: &str) -> Option<&str> {
        if let Some((_, content_type)) = self.overrides.iter().find(|(p, _)| p == partname) {
            return Some(content_type.as_str());
        }

        let file_name = partname.rsplit('/').next().unwrap_or(partname);
        let (_, ext) = file_name.rsplit_once('.')?;
        self.defaults
            .iter()
            .find(|(e, _)| e.eq_ignore_ascii_case(ext))
            .map(|(_, content_type)| content_type.as_str())
    }

    /// Generate the XML for `[Content_Types].xml`.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(512 + self.overrides.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        write!(xml, r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES)?;
        xml.push('\n');

        for (ext, content_type) in &self.defaults {
            xml.push_str(r#"  <Default Extension=""#);
            push_escaped(&mut xml, ext);
            xml.push_str(r#"" ContentType=""#);
            push_escaped(&mut xml, content_type);
            xml.push_str("\"/>\n");
        }

        for (partname, content_type) in &self.overrides {
            xml.push_str(r#"  <Override PartName=""#);
            push_escaped(&mut xml, partname);
            xml.push_str(r#"" ContentType=""#);
            push_escaped(&mut xml, content_type);
            xml.push_str("\"/>\n");
        }

        xml.push_str("</Types>");

        log::trace!(
            "Rendered content types: {} defaults, {} overrides",
            self.defaults.len(),
            self.overrides.len()
        );
        Ok(xml)
    }
}

fn upsert(entries: &mut Vec<(String, String)>, key: &str, value: &str) {
    match entries.iter_mut().find(|(k, _)| k == key) {
        Some((_, existing)) => *existing = value.to_string(),
        None => entries.push((key.to_string(), value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types_xml() {
        let mut cti = ContentTypes::with_standard_defaults();
        cti.add_default("png", "image/png");
        cti.add_override("/xl/workbook.xml", ct::SML_SHEET_MAIN);

        let xml = cti.to_xml().unwrap();

        assert!(xml.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(xml.contains(r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#));
    }

    #[test]
    fn defaults_render_before_overrides() {
        let mut cti = ContentTypes::new();
        cti.add_override("/xl/styles.xml", ct::SML_STYLES);
        cti.add_default("xml", ct::XML);

        let xml = cti.to_xml().unwrap();
        assert!(xml.find("<Default").unwrap() < xml.find("<Override").unwrap());
    }

    #[test]
    fn insertion_order_is_kept_and_upserts_replace() {
        let mut cti = ContentTypes::new();
        cti.add_default("xml", "text/xml")
            .add_default("rels", ct::OPC_RELATIONSHIPS)
            .add_default("xml", ct::XML);

        let defaults: Vec<_> = cti.defaults().collect();
        assert_eq!(defaults, vec![("xml", ct::XML), ("rels", ct::OPC_RELATIONSHIPS)]);
    }

    #[test]
    fn override_takes_precedence_over_default() {
        let mut cti = ContentTypes::with_standard_defaults();
        cti.add_override("/xl/workbook.xml", ct::SML_SHEET_MAIN);

        assert_eq!(cti.content_type_for("/xl/workbook.xml"), Some(ct::SML_SHEET_MAIN));
        assert_eq!(cti.content_type_for("/xl/other.XML"), Some(ct::XML));
        assert_eq!(cti.content_type_for("/_rels/.rels"), Some(ct::OPC_RELATIONSHIPS));
        assert_eq!(cti.content_type_for("/xl/media/image1.png"), None);
        assert_eq!(cti.content_type_for("/xl/noext"), None);
    }

    #[test]
    fn empty_registry_is_valid() {
        let xml = ContentTypes::new().to_xml().unwrap();
        assert!(xml.ends_with("</Types>"));
        assert!(!xml.contains("<Default"));
    }
}
