//! Constant workbook parts.
//!
//! Payloads that carry no per-workbook data. They are embedded at compile
//! time and handed out verbatim.

const THEME_XML: &str = include_str!("resources/theme/theme1.xml");
const STYLES_XML: &str = include_str!("resources/styles.xml");

/// The stock "Office Theme" document for `xl/theme/theme1.xml`.
pub fn default_theme_xml() -> &'static str {
    THEME_XML
}

/// Render the theme part.
///
/// Every workbook gets the same theme; this exists so the theme sits beside
/// the other part emitters.
pub fn write_theme() -> String {
    THEME_XML.to_string()
}

/// Generate a minimal valid styles.xml content.
///
/// One font, the two mandatory fills, one border and a single `Normal` cell
/// format, which is all unstyled cells refer to.
pub fn default_styles_xml() -> &'static str {
    STYLES_XML
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    fn root_element(xml: &str) -> Vec<u8> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf).unwrap() {
                Event::Start(e) => return e.name().as_ref().to_vec(),
                Event::Eof => panic!("document has no root element"),
                _ => {},
            }
            buf.clear();
        }
    }

    fn assert_parses(xml: &str) {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        while !matches!(reader.read_event_into(&mut buf).unwrap(), Event::Eof) {
            buf.clear();
        }
    }

    #[test]
    fn theme_is_returned_verbatim() {
        let theme = default_theme_xml();
        assert!(theme.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert_eq!(root_element(theme), b"a:theme");
        assert!(theme.contains(r#"name="Office Theme""#));
        assert_eq!(write_theme(), theme);
        assert_parses(theme);
    }

    #[test]
    fn styles_define_the_normal_format() {
        let styles = default_styles_xml();
        assert_eq!(root_element(styles), b"styleSheet");
        assert!(styles.contains(r#"<cellXfs count="1">"#));
        assert!(styles.contains(r#"<cellStyle name="Normal" xfId="0" builtinId="0"/>"#));
        assert_parses(styles);
    }
}
