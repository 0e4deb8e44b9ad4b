//! Package driver: renders every XML part of a workbook package.
//!
//! The driver owns the order of operations. It collects the shared strings,
//! builds one [`WorkbookManifest`], renders the workbook and its relationship
//! manifest from it, then renders each worksheet against the same read-only
//! string table. Placing the returned parts into a ZIP container is left to
//! the caller.
//!
//! # Example
//!
//! ```rust
//! use sheetml_writer::ooxml::xlsx::writer::{PackageOptions, PackageWriter};
//! use sheetml_writer::sheet::WorkbookData;
//!
//! let mut workbook = WorkbookData::new();
//! workbook.create_sheet("Data").set_string(1, 1, "Hello")?;
//!
//! let parts = PackageWriter::new(PackageOptions::default()).write_parts(&workbook)?;
//! assert!(parts.iter().any(|part| part.path == "xl/worksheets/sheet1.xml"));
//! # Ok::<(), sheetml_writer::OoxmlError>(())
//! ```

use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{content_type as ct, part_path, relationship_type as rt};
use crate::ooxml::opc::{ContentTypes, Relationships};
use crate::ooxml::xlsx::template::{default_styles_xml, write_theme};
use crate::sheet::{Workbook, Worksheet};

use super::sheet::write_worksheet;
use super::strings::SharedStringTable;
use super::workbook::{WorkbookManifest, write_workbook_with_manifest};

/// Minimum number of worksheets before rendering moves to the thread pool.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 2;

/// Options for [`PackageWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageOptions {
    /// Render worksheets on the rayon pool. Ignored without the `parallel`
    /// feature.
    pub parallel_sheets: bool,
    /// Emit `xl/sharedStrings.xml` and reference it from string cells.
    /// When off, every string cell is written inline.
    pub include_shared_strings: bool,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self {
            parallel_sheets: true,
            include_shared_strings: true,
        }
    }
}

/// One rendered part and the zip entry name it belongs at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePart {
    pub path: String,
    pub xml: String,
}

impl PackagePart {
    fn new(path: impl Into<String>, xml: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            xml: xml.into(),
        }
    }
}

/// Renders complete workbook packages.
#[derive(Debug, Clone, Default)]
pub struct PackageWriter {
    options: PackageOptions,
}

impl PackageWriter {
    pub fn new(options: PackageOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PackageOptions {
        &self.options
    }

    /// Render every part of `workbook`.
    ///
    /// Parts come back in a fixed order: content types, package
    /// relationships, workbook, workbook relationships, shared strings (when
    /// enabled), styles, theme, then worksheets in tab order.
    pub fn write_parts<W>(&self, workbook: &W) -> Result<Vec<PackagePart>>
    where
        W: Workbook + ?Sized,
        W::Sheet: Sync,
    {
        let shared_strings = self
            .options
            .include_shared_strings
            .then(|| SharedStringTable::from_workbook(workbook));
        let manifest = WorkbookManifest::with_shared_strings(
            workbook.worksheet_count(),
            shared_strings.is_some(),
        );

        let sheets: Vec<&W::Sheet> = workbook.worksheets().collect();
        let sheet_xml = render_sheets(&sheets, shared_strings.as_ref(), self.options.parallel_sheets)?;

        let mut parts = Vec::with_capacity(7 + sheet_xml.len());
        parts.push(PackagePart::new(
            part_path::CONTENT_TYPES,
            content_types(&manifest).to_xml()?,
        ));
        parts.push(PackagePart::new(
            part_path::ROOT_RELS,
            root_relationships().to_xml()?,
        ));
        parts.push(PackagePart::new(
            part_path::WORKBOOK,
            write_workbook_with_manifest(workbook, &manifest)?,
        ));
        parts.push(PackagePart::new(part_path::WORKBOOK_RELS, manifest.to_xml()?));
        if let Some(table) = &shared_strings {
            parts.push(PackagePart::new(part_path::SHARED_STRINGS, table.to_xml()?));
        }
        parts.push(PackagePart::new(part_path::STYLES, default_styles_xml()));
        parts.push(PackagePart::new(part_path::THEME, write_theme()));

        for (ids, xml) in manifest.sheets().iter().zip(sheet_xml) {
            parts.push(PackagePart::new(ids.part_path(), xml));
        }

        log::debug!(
            "Rendered workbook package: {} parts, {} worksheets",
            parts.len(),
            sheets.len()
        );
        Ok(parts)
    }
}

/// Package-level relationships: the single `officeDocument` link to the
/// workbook part.
pub fn root_relationships() -> Relationships {
    let mut rels = Relationships::new();
    rels.get_or_add(rt::OFFICE_DOCUMENT, part_path::WORKBOOK);
    rels
}

/// Content-type registry for a package laid out per `manifest`.
///
/// Defaults cover `.rels` and `.xml`; every SpreadsheetML part gets an
/// override in package order.
pub fn content_types(manifest: &WorkbookManifest) -> ContentTypes {
    let mut types = ContentTypes::with_standard_defaults();
    types.add_override(&part_path::partname(part_path::WORKBOOK), ct::SML_SHEET_MAIN);
    for sheet in manifest.sheets() {
        types.add_override(&part_path::partname(&sheet.part_path()), ct::SML_WORKSHEET);
    }
    if manifest.has_shared_strings() {
        types.add_override(
            &part_path::partname(part_path::SHARED_STRINGS),
            ct::SML_SHARED_STRINGS,
        );
    }
    types
        .add_override(&part_path::partname(part_path::STYLES), ct::SML_STYLES)
        .add_override(&part_path::partname(part_path::THEME), ct::OFC_THEME);
    types
}

#[cfg(feature = "parallel")]
fn render_sheets<S>(
    sheets: &[&S],
    shared_strings: Option<&SharedStringTable>,
    parallel: bool,
) -> Result<Vec<String>>
where
    S: Worksheet + Sync + ?Sized,
{
    use rayon::prelude::*;

    if parallel && sheets.len() >= PARALLEL_THRESHOLD {
        sheets
            .par_iter()
            .map(|sheet| write_worksheet(*sheet, shared_strings))
            .collect()
    } else {
        sheets
            .iter()
            .map(|sheet| write_worksheet(*sheet, shared_strings))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn render_sheets<S>(
    sheets: &[&S],
    shared_strings: Option<&SharedStringTable>,
    _parallel: bool,
) -> Result<Vec<String>>
where
    S: Worksheet + ?Sized,
{
    sheets
        .iter()
        .map(|sheet| write_worksheet(*sheet, shared_strings))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::WorkbookData;
    use std::io::{Cursor, Read, Write};
    use zip::ZipArchive;
    use zip::write::{SimpleFileOptions, ZipWriter};

    fn sample_workbook() -> WorkbookData {
        let mut wb = WorkbookData::new();
        let data = wb.create_sheet("Data");
        data.set_string(1, 1, "Name").unwrap();
        data.set_string(1, 2, "Score").unwrap();
        data.set_string(2, 1, "Ada").unwrap();
        data.set_number(2, 2, 97.5).unwrap();
        data.set_formula(3, 2, "=AVERAGE(B2:B2)").unwrap();

        let notes = wb.create_sheet("Notes");
        notes.set_string(1, 1, "Name").unwrap();
        notes.set_bool(2, 1, true).unwrap();
        wb
    }

    fn part<'a>(parts: &'a [PackagePart], path: &str) -> &'a str {
        &parts.iter().find(|p| p.path == path).unwrap().xml
    }

    #[test]
    fn test_part_order() {
        let parts = PackageWriter::default().write_parts(&sample_workbook()).unwrap();
        let paths: Vec<&str> = parts.iter().map(|p| p.path.as_str()).collect();

        assert_eq!(
            paths,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "xl/workbook.xml",
                "xl/_rels/workbook.xml.rels",
                "xl/sharedStrings.xml",
                "xl/styles.xml",
                "xl/theme/theme1.xml",
                "xl/worksheets/sheet1.xml",
                "xl/worksheets/sheet2.xml",
            ]
        );
    }

    #[test]
    fn test_every_part_has_a_content_type() {
        let parts = PackageWriter::default().write_parts(&sample_workbook()).unwrap();
        let types = content_types(&WorkbookManifest::new(2));

        for p in &parts {
            let partname = part_path::partname(&p.path);
            assert!(
                types.content_type_for(&partname).is_some(),
                "no content type for {}",
                partname
            );
        }
        assert_eq!(
            types.content_type_for("/xl/worksheets/sheet2.xml"),
            Some(ct::SML_WORKSHEET)
        );
    }

    #[test]
    fn test_shared_strings_are_consistent_across_sheets() {
        let parts = PackageWriter::default().write_parts(&sample_workbook()).unwrap();

        let sst = part(&parts, "xl/sharedStrings.xml");
        assert!(sst.contains(r#"count="4" uniqueCount="3""#));
        assert!(sst.contains("<si><t>Name</t></si><si><t>Score</t></si><si><t>Ada</t></si>"));

        let sheet1 = part(&parts, "xl/worksheets/sheet1.xml");
        assert!(sheet1.contains(r#"<c r="A2" t="s"><v>2</v></c>"#));
        assert!(sheet1.contains(r#"<c r="B3"><f>AVERAGE(B2:B2)</f><v/></c>"#));
        let sheet2 = part(&parts, "xl/worksheets/sheet2.xml");
        assert!(sheet2.contains(r#"<c r="A1" t="s"><v>0</v></c>"#));
        assert!(sheet2.contains(r#"<c r="A2" t="b"><v>1</v></c>"#));
    }

    #[test]
    fn test_without_shared_strings() {
        let options = PackageOptions {
            include_shared_strings: false,
            ..PackageOptions::default()
        };
        let parts = PackageWriter::new(options).write_parts(&sample_workbook()).unwrap();

        assert!(parts.iter().all(|p| p.path != part_path::SHARED_STRINGS));
        assert!(!part(&parts, part_path::CONTENT_TYPES).contains("sharedStrings"));
        assert!(!part(&parts, part_path::WORKBOOK_RELS).contains("sharedStrings"));
        assert!(
            part(&parts, "xl/worksheets/sheet1.xml")
                .contains(r#"<c r="A1" t="inlineStr"><is><t>Name</t></is></c>"#)
        );
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let wb = sample_workbook();
        let sequential = PackageWriter::new(PackageOptions {
            parallel_sheets: false,
            ..PackageOptions::default()
        })
        .write_parts(&wb)
        .unwrap();
        let parallel = PackageWriter::default().write_parts(&wb).unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_workbook_and_rels_share_ids() {
        let parts = PackageWriter::default().write_parts(&sample_workbook()).unwrap();

        assert!(part(&parts, part_path::WORKBOOK).contains(r#"<sheet name="Notes" sheetId="2" r:id="rId2"/>"#));
        assert!(part(&parts, part_path::WORKBOOK_RELS).contains(
            r#"Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml""#
        ));
        assert!(part(&parts, part_path::ROOT_RELS).contains(r#"Id="rId1""#));
        assert!(part(&parts, part_path::ROOT_RELS).contains(r#"Target="xl/workbook.xml""#));
    }

    #[test]
    fn test_empty_workbook_package() {
        let parts = PackageWriter::default().write_parts(&WorkbookData::new()).unwrap();

        assert_eq!(parts.len(), 7);
        assert!(part(&parts, part_path::WORKBOOK).contains("<sheets></sheets>"));
        assert!(part(&parts, part_path::SHARED_STRINGS).contains(r#"count="0" uniqueCount="0""#));
    }

    #[test]
    fn test_parts_round_trip_through_zip() {
        let parts = PackageWriter::default().write_parts(&sample_workbook()).unwrap();

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        for p in &parts {
            zip.start_file(p.path.as_str(), options).unwrap();
            zip.write_all(p.xml.as_bytes()).unwrap();
        }
        let bytes = zip.finish().unwrap().into_inner();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), parts.len());
        for p in &parts {
            let mut entry = archive.by_name(&p.path).unwrap();
            let mut content = String::new();
            entry.read_to_string(&mut content).unwrap();
            assert_eq!(content, p.xml);
        }
    }
}
