/// Worksheet part emitter.
use crate::common::xml::{escape_xml, needs_space_preserve, push_escaped};
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::namespace;
use crate::sheet::{Cell, CellType, PageMargins, PageSetup, RangeReference, Row, Worksheet};
use std::fmt::Write as FmtWrite;

use super::strings::SharedStringTable;

/// Render one worksheet to its `xl/worksheets/sheetN.xml` document.
///
/// String cells resolve against `shared_strings` when given; a string with
/// no entry in the table, or any string when no table is given, is written
/// inline instead. This never fails on cell content.
pub fn write_worksheet<W>(sheet: &W, shared_strings: Option<&SharedStringTable>) -> Result<String>
where
    W: Worksheet + ?Sized,
{
    WorksheetWriter::new(sheet, shared_strings).to_xml()
}

/// Serializer for a single read-only worksheet.
pub struct WorksheetWriter<'a, W: ?Sized> {
    sheet: &'a W,
    shared_strings: Option<&'a SharedStringTable>,
}

impl<'a, W> WorksheetWriter<'a, W>
where
    W: Worksheet + ?Sized,
{
    pub fn new(sheet: &'a W, shared_strings: Option<&'a SharedStringTable>) -> Self {
        Self {
            sheet,
            shared_strings,
        }
    }

    /// Serialize the worksheet to XML.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(4096);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        write!(
            xml,
            r#"<worksheet xmlns="{}" xmlns:r="{}">"#,
            namespace::SML_MAIN,
            namespace::OFC_RELATIONSHIPS
        )?;

        let setup = self.sheet.page_setup();
        let emit_setup = !setup.is_default();

        // sheetPr must come before dimension
        xml.push_str(r#"<sheetPr><outlinePr summaryBelow="1" summaryRight="1"/>"#);
        if emit_setup {
            write!(xml, r#"<pageSetUpPr fitToPage="{}"/>"#, flag(setup.fit_to_page))?;
        }
        xml.push_str("</sheetPr>");

        write!(
            xml,
            r#"<dimension ref="{}"/>"#,
            escape_xml(&self.sheet.calculate_dimension().to_string())
        )?;

        xml.push_str(r#"<sheetViews><sheetView workbookViewId="0">"#);
        xml.push_str(r#"<selection activeCell="A1" sqref="A1"/>"#);
        xml.push_str("</sheetView></sheetViews>");
        xml.push_str(r#"<sheetFormatPr baseColWidth="10" defaultRowHeight="15"/>"#);

        xml.push_str("<sheetData>");
        self.write_sheet_data(&mut xml)?;
        xml.push_str("</sheetData>");

        let merged = self.sheet.merged_ranges();
        if !merged.is_empty() {
            write_merge_cells(&mut xml, merged)?;
        }

        write_page_margins(&mut xml, self.sheet.page_margins())?;

        if emit_setup {
            write_page_setup(&mut xml, setup)?;
        }

        xml.push_str("</worksheet>");

        log::trace!(
            "Rendered worksheet '{}' ({} bytes)",
            self.sheet.title(),
            xml.len()
        );
        Ok(xml)
    }

    fn write_sheet_data(&self, xml: &mut String) -> Result<()> {
        for row in self.sheet.rows() {
            // Rows holding only null cells are skipped, merged anchors included
            let Some((min_col, max_col)) = row_span(row) else {
                continue;
            };

            write!(
                xml,
                r#"<row r="{}" spans="{}:{}">"#,
                row.index(),
                min_col,
                max_col
            )?;

            for cell in row.cells() {
                if !cell.is_null() || cell.is_merged() {
                    self.write_cell(xml, cell)?;
                }
            }

            xml.push_str("</row>");
        }

        Ok(())
    }

    fn write_cell<C: Cell + ?Sized>(&self, xml: &mut String, cell: &C) -> Result<()> {
        let cell_ref = cell.reference();
        let value = cell.raw_value();

        match cell.data_type() {
            CellType::Null => {
                write!(xml, r#"<c r="{}"/>"#, cell_ref)?;
            },
            CellType::String => match self.shared_strings.and_then(|ss| ss.index_of(value)) {
                Some(string_index) => {
                    write!(xml, r#"<c r="{}" t="s"><v>{}</v></c>"#, cell_ref, string_index)?;
                },
                None => {
                    log::debug!("Cell {} not in shared strings, writing inline", cell_ref);
                    write!(xml, r#"<c r="{}" t="inlineStr"><is>"#, cell_ref)?;
                    if needs_space_preserve(value) {
                        xml.push_str(r#"<t xml:space="preserve">"#);
                    } else {
                        xml.push_str("<t>");
                    }
                    push_escaped(xml, value);
                    xml.push_str("</t></is></c>");
                },
            },
            CellType::Boolean => {
                write!(xml, r#"<c r="{}" t="b"><v>"#, cell_ref)?;
                push_escaped(xml, value);
                xml.push_str("</v></c>");
            },
            CellType::Numeric => {
                write!(xml, r#"<c r="{}" t="n"><v>"#, cell_ref)?;
                push_escaped(xml, value);
                xml.push_str("</v></c>");
            },
            CellType::Formula => {
                let body = value.strip_prefix('=').unwrap_or(value);
                write!(xml, r#"<c r="{}"><f>"#, cell_ref)?;
                push_escaped(xml, body);
                xml.push_str("</f><v/></c>");
            },
        }

        Ok(())
    }
}

/// Column span `(min, max)` across a row's non-null cells.
pub fn row_span<R: Row + ?Sized>(row: &R) -> Option<(u32, u32)> {
    row.cells()
        .filter(|cell| !cell.is_null())
        .map(|cell| cell.column())
        .fold(None, |span, column| match span {
            None => Some((column, column)),
            Some((min, max)) => Some((min.min(column), max.max(column))),
        })
}

fn write_merge_cells(xml: &mut String, merged: &[RangeReference]) -> Result<()> {
    write!(xml, r#"<mergeCells count="{}">"#, merged.len())?;
    for range in merged {
        write!(xml, r#"<mergeCell ref="{}"/>"#, range)?;
    }
    xml.push_str("</mergeCells>");
    Ok(())
}

fn write_page_margins(xml: &mut String, margins: &PageMargins) -> Result<()> {
    write!(
        xml,
        r#"<pageMargins left="{}" right="{}" top="{}" bottom="{}" header="{}" footer="{}"/>"#,
        margins.left, margins.right, margins.top, margins.bottom, margins.header, margins.footer
    )?;
    Ok(())
}

fn write_page_setup(xml: &mut String, setup: &PageSetup) -> Result<()> {
    write!(
        xml,
        r#"<pageSetup orientation="{}" paperSize="{}" fitToHeight="{}" fitToWidth="{}"/>"#,
        setup.orientation.as_str(),
        setup.paper_size.code(),
        flag(setup.fit_to_height),
        flag(setup.fit_to_width)
    )?;
    Ok(())
}

#[inline]
fn flag(value: bool) -> u8 {
    u8::from(value)
}
