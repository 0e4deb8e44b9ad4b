/// Shared strings table for XLSX workbooks.
use crate::common::xml::{needs_space_preserve, push_escaped};
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::namespace;
use crate::sheet::{Cell, CellType, Row, Workbook, Worksheet};
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;

/// Shared strings table.
///
/// Excel stores frequently used strings in a shared table to reduce file size.
/// Entry order is fixed once built and is the only index contract worksheet
/// cells rely on: the i-th `<si>` element is string `i`.
#[derive(Debug, Clone, Default)]
pub struct SharedStringTable {
    /// List of unique strings
    strings: Vec<String>,
    /// Map from string to index for fast lookup
    string_to_index: HashMap<String, usize>,
    /// Number of string cells that point into the table
    reference_count: usize,
}

impl SharedStringTable {
    /// Create a new empty shared strings table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from strings, keeping the first occurrence of each.
    pub fn from_strings<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for s in strings {
            table.add_string(s.as_ref());
        }
        table
    }

    /// Collect every string cell of a workbook in first-occurrence order.
    ///
    /// Sheets are walked in tab order, rows ascending, cells by column.
    pub fn from_workbook<W: Workbook + ?Sized>(workbook: &W) -> Self {
        let mut table = Self::new();
        for sheet in workbook.worksheets() {
            for row in sheet.rows() {
                for cell in row.cells() {
                    if cell.data_type() == CellType::String {
                        table.add_string(cell.raw_value());
                    }
                }
            }
        }
        log::trace!(
            "Collected {} unique shared strings from {} references",
            table.len(),
            table.reference_count
        );
        table
    }

    /// Add a string to the shared strings table and return its index.
    ///
    /// If the string already exists, returns the existing index. Either way
    /// the call counts as one reference.
    pub fn add_string(&mut self, s: &str) -> usize {
        self.reference_count += 1;
        if let Some(&index) = self.string_to_index.get(s) {
            index
        } else {
            let index = self.strings.len();
            self.strings.push(s.to_string());
            self.string_to_index.insert(s.to_string(), index);
            index
        }
    }

    /// Look up the index of an exact string match.
    #[inline]
    pub fn index_of(&self, s: &str) -> Option<usize> {
        self.string_to_index.get(s).copied()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }

    /// Get the number of unique strings.
    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Total references recorded while building, never below the number of
    /// unique strings.
    #[inline]
    pub fn reference_count(&self) -> usize {
        self.reference_count.max(self.strings.len())
    }

    /// Iterate strings in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(String::as_str)
    }

    /// Serialize the shared strings table to XML.
    pub fn to_xml(&self) -> Result<String> {
        let payload: usize = self.strings.iter().map(|s| s.len() + 20).sum();
        let mut xml = String::with_capacity(128 + payload);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        write!(
            xml,
            r#"<sst xmlns="{}" count="{}" uniqueCount="{}">"#,
            namespace::SML_MAIN,
            self.reference_count(),
            self.strings.len()
        )?;

        for s in &self.strings {
            if needs_space_preserve(s) {
                xml.push_str(r#"<si><t xml:space="preserve">"#);
            } else {
                xml.push_str("<si><t>");
            }
            push_escaped(&mut xml, s);
            xml.push_str("</t></si>");
        }

        xml.push_str("</sst>");

        log::trace!("Rendered sharedStrings.xml ({} bytes)", xml.len());
        Ok(xml)
    }
}

impl<S: AsRef<str>> FromIterator<S> for SharedStringTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_strings(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::WorkbookData;
    use proptest::prelude::*;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    /// Text of every `<t>` element, in document order.
    fn entries(xml: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        let mut out = Vec::new();
        let mut in_t = false;
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) if e.name().as_ref() == b"t" => {
                    in_t = true;
                    out.push(String::new());
                },
                Event::End(e) if e.name().as_ref() == b"t" => in_t = false,
                Event::Text(t) if in_t => {
                    out.last_mut()
                        .unwrap()
                        .push_str(std::str::from_utf8(&t).unwrap());
                },
                Event::Eof => break,
                _ => {},
            }
        }
        out
    }

    #[test]
    fn test_shared_strings() {
        let mut ss = SharedStringTable::new();
        let idx1 = ss.add_string("Hello");
        let idx2 = ss.add_string("World");
        let idx3 = ss.add_string("Hello"); // Duplicate

        assert_eq!(idx1, 0);
        assert_eq!(idx2, 1);
        assert_eq!(idx3, 0); // Same as first "Hello"
        assert_eq!(ss.len(), 2);
        assert_eq!(ss.reference_count(), 3);
        assert_eq!(ss.get(1), Some("World"));
        assert_eq!(ss.index_of("World"), Some(1));
        assert_eq!(ss.index_of("world"), None);
    }

    #[test]
    fn test_empty_table_renders_valid_document() {
        let xml = SharedStringTable::new().to_xml().unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(r#"count="0" uniqueCount="0">"#));
        assert!(xml.ends_with("</sst>"));
        assert!(entries(&xml).is_empty());
    }

    #[test]
    fn test_to_xml_escapes_and_preserves_space() {
        let ss = SharedStringTable::from_strings(["a < b & c", " padded ", "plain"]);
        let xml = ss.to_xml().unwrap();

        assert!(xml.contains("<si><t>a &lt; b &amp; c</t></si>"));
        assert!(xml.contains(r#"<si><t xml:space="preserve"> padded </t></si>"#));
        assert!(xml.contains("<si><t>plain</t></si>"));
    }

    #[test]
    fn test_from_workbook_first_occurrence_order() {
        let mut wb = WorkbookData::new();
        let first = wb.create_sheet("First");
        first.set_string(2, 1, "beta").unwrap();
        first.set_string(1, 2, "alpha").unwrap();
        first.set_number(1, 1, 3.0).unwrap();
        let second = wb.create_sheet("Second");
        second.set_string(1, 1, "gamma").unwrap();
        second.set_string(1, 2, "alpha").unwrap();

        let ss = SharedStringTable::from_workbook(&wb);
        let collected: Vec<&str> = ss.iter().collect();
        assert_eq!(collected, vec!["alpha", "beta", "gamma"]);
        assert_eq!(ss.reference_count(), 4);

        let xml = ss.to_xml().unwrap();
        assert!(xml.contains(r#"count="4" uniqueCount="3""#));
    }

    proptest! {
        #[test]
        fn prop_position_is_index(strings in prop::collection::vec(".{0,12}", 0..24)) {
            let ss: SharedStringTable = strings.iter().collect();
            let xml = ss.to_xml().unwrap();
            let rendered = entries(&xml);

            prop_assert_eq!(rendered.len(), ss.len());
            for s in &strings {
                let index = ss.index_of(s).unwrap();
                prop_assert_eq!(ss.get(index), Some(s.as_str()));
            }
        }
    }
}
