/// Workbook part emitter and the relationship manifest it shares with the
/// package writer.
use crate::common::xml::push_escaped;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{namespace, part_path, relationship_type as rt};
use crate::ooxml::opc::{Relationship, Relationships};
use crate::sheet::{Workbook, Worksheet};
use std::fmt::Write as FmtWrite;

/// Identifiers assigned to one worksheet for a single write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRelationship {
    /// Relationship ID in `xl/_rels/workbook.xml.rels` (e.g. "rId1")
    pub rel_id: String,
    /// 1-based `sheetId` attribute in `xl/workbook.xml`
    pub sheet_id: u32,
    /// Target relative to `xl/` (e.g. "worksheets/sheet1.xml")
    pub target: String,
}

impl SheetRelationship {
    /// Package path of the worksheet part, e.g. `xl/worksheets/sheet1.xml`.
    pub fn part_path(&self) -> String {
        format!("xl/{}", self.target)
    }
}

/// Relationship and sheet IDs for one workbook write.
///
/// Generated once from the sheet count and then handed to both the workbook
/// emitter and the workbook relationship manifest, so the two can never
/// disagree about which `rId` belongs to which sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookManifest {
    sheets: Vec<SheetRelationship>,
    relationships: Relationships,
    shared_strings: bool,
}

impl WorkbookManifest {
    /// Manifest for `sheet_count` worksheets plus the shared strings, styles
    /// and theme parts.
    pub fn new(sheet_count: usize) -> Self {
        Self::with_shared_strings(sheet_count, true)
    }

    /// Manifest that binds the shared-string part only when `shared_strings`
    /// is set.
    ///
    /// Sheet `i` (0-based) gets `rId{i+1}`, `sheetId` `i+1` and target
    /// `worksheets/sheet{i+1}.xml`. The remaining parts continue the
    /// numbering in the order shared strings, styles, theme.
    pub fn with_shared_strings(sheet_count: usize, shared_strings: bool) -> Self {
        let mut relationships = Relationships::new();
        let mut sheets = Vec::with_capacity(sheet_count);

        for index in 1..=sheet_count {
            let sheet = SheetRelationship {
                rel_id: format!("rId{}", index),
                sheet_id: index as u32,
                target: format!("worksheets/sheet{}.xml", index),
            };
            relationships.push(Relationship::new(
                sheet.rel_id.as_str(),
                sheet.target.as_str(),
                rt::WORKSHEET,
            ));
            sheets.push(sheet);
        }

        if shared_strings {
            relationships.get_or_add(rt::SHARED_STRINGS, "sharedStrings.xml");
        }
        relationships.get_or_add(rt::STYLES, "styles.xml");
        relationships.get_or_add(rt::THEME, "theme/theme1.xml");

        Self {
            sheets,
            relationships,
            shared_strings,
        }
    }

    /// Manifest sized for `workbook`'s current sheets.
    pub fn for_workbook<W: Workbook + ?Sized>(workbook: &W) -> Self {
        Self::new(workbook.worksheet_count())
    }

    /// Per-sheet identifiers in tab order.
    #[inline]
    pub fn sheets(&self) -> &[SheetRelationship] {
        &self.sheets
    }

    /// Every relationship of the workbook part.
    #[inline]
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    #[inline]
    pub fn has_shared_strings(&self) -> bool {
        self.shared_strings
    }

    /// Render `xl/_rels/workbook.xml.rels`.
    pub fn to_xml(&self) -> Result<String> {
        self.relationships.to_xml()
    }
}

/// Render `xl/workbook.xml` with a fresh manifest.
pub fn write_workbook<W: Workbook + ?Sized>(workbook: &W) -> Result<String> {
    write_workbook_with_manifest(workbook, &WorkbookManifest::for_workbook(workbook))
}

/// Render `xl/workbook.xml` using the IDs in `manifest`.
///
/// Fails with [`OoxmlError::ManifestMismatch`] if the manifest was built for a
/// different number of sheets.
pub fn write_workbook_with_manifest<W: Workbook + ?Sized>(
    workbook: &W,
    manifest: &WorkbookManifest,
) -> Result<String> {
    let sheet_count = workbook.worksheet_count();
    if sheet_count != manifest.sheets().len() {
        return Err(OoxmlError::ManifestMismatch {
            sheets: sheet_count,
            entries: manifest.sheets().len(),
        });
    }

    let mut xml = String::with_capacity(1024 + sheet_count * 64);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    write!(
        xml,
        r#"<workbook xmlns="{}" xmlns:r="{}">"#,
        namespace::SML_MAIN,
        namespace::OFC_RELATIONSHIPS
    )?;

    xml.push_str(r#"<fileVersion appName="xl" lastEdited="4" lowestEdited="4" rupBuild="4505"/>"#);
    xml.push_str(r#"<workbookPr codeName="ThisWorkbook" defaultThemeVersion="124226"/>"#);
    xml.push_str(concat!(
        r#"<bookViews><workbookView activeTab="0" autoFilterDateGrouping="1" firstSheet="0""#,
        r#" minimized="0" showHorizontalScroll="1" showSheetTabs="1" showVerticalScroll="1""#,
        r#" tabRatio="600" visibility="visible"/></bookViews>"#,
    ));

    xml.push_str("<sheets>");
    for (sheet, ids) in workbook.worksheets().zip(manifest.sheets()) {
        xml.push_str(r#"<sheet name=""#);
        push_escaped(&mut xml, sheet.title());
        write!(xml, r#"" sheetId="{}" r:id="{}"/>"#, ids.sheet_id, ids.rel_id)?;
    }
    xml.push_str("</sheets>");

    xml.push_str("<definedNames/>");
    xml.push_str(r#"<calcPr calcId="124519" calcMode="auto" fullCalcOnLoad="1"/>"#);
    xml.push_str("</workbook>");

    log::trace!(
        "Rendered {} ({} sheets, {} bytes)",
        part_path::WORKBOOK,
        sheet_count,
        xml.len()
    );
    Ok(xml)
}
