//! In-memory workbook model.
//!
//! A plain-data implementation of the accessor traits, used by callers that
//! build a workbook programmatically and by the emitter tests.

use super::traits::{Cell, Row, Workbook, Worksheet};
use super::types::{CellReference, CellType, PageMargins, PageSetup, RangeReference};
use crate::ooxml::error::Result;
use std::collections::BTreeMap;

/// Leading marker of a stored formula.
pub const FORMULA_MARKER: char = '=';

/// A single cell with its raw value text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellData {
    reference: CellReference,
    data_type: CellType,
    value: String,
    merged: bool,
}

impl CellData {
    pub fn new(reference: CellReference, data_type: CellType, value: impl Into<String>) -> Self {
        Self {
            reference,
            data_type,
            value: value.into(),
            merged: false,
        }
    }

    /// An empty cell at `reference`.
    pub fn null(reference: CellReference) -> Self {
        Self::new(reference, CellType::Null, String::new())
    }

    pub fn set_merged(&mut self, merged: bool) {
        self.merged = merged;
    }

    fn set(&mut self, data_type: CellType, value: String) {
        self.data_type = data_type;
        self.value = value;
    }
}

impl Cell for CellData {
    fn column(&self) -> u32 {
        self.reference.column()
    }

    fn row(&self) -> u32 {
        self.reference.row()
    }

    fn reference(&self) -> CellReference {
        self.reference
    }

    fn data_type(&self) -> CellType {
        self.data_type
    }

    fn raw_value(&self) -> &str {
        &self.value
    }

    fn is_merged(&self) -> bool {
        self.merged
    }
}

/// One row; cells keyed by column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowData {
    index: u32,
    cells: BTreeMap<u32, CellData>,
}

impl RowData {
    fn new(index: u32) -> Self {
        Self {
            index,
            cells: BTreeMap::new(),
        }
    }

    pub fn cell(&self, column: u32) -> Option<&CellData> {
        self.cells.get(&column)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Row for RowData {
    type Cell = CellData;

    fn index(&self) -> u32 {
        self.index
    }

    fn cells(&self) -> Box<dyn Iterator<Item = &CellData> + '_> {
        Box::new(self.cells.values())
    }
}

/// A worksheet: sparse rows, merged ranges and print configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WorksheetData {
    title: String,
    rows: BTreeMap<u32, RowData>,
    merged_ranges: Vec<RangeReference>,
    page_margins: PageMargins,
    page_setup: PageSetup,
}

impl WorksheetData {
    /// Create a new empty worksheet.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: BTreeMap::new(),
            merged_ranges: Vec::new(),
            page_margins: PageMargins::default(),
            page_setup: PageSetup::default(),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Get a cell, if one has been materialized.
    ///
    /// # Arguments
    /// * `row` - 1-based row number
    /// * `col` - 1-based column number
    pub fn cell(&self, row: u32, col: u32) -> Option<&CellData> {
        self.rows.get(&row)?.cell(col)
    }

    /// Get or create the cell at (`row`, `col`).
    pub fn cell_mut(&mut self, row: u32, col: u32) -> Result<&mut CellData> {
        let reference = CellReference::new(col, row)?;
        Ok(self
            .rows
            .entry(row)
            .or_insert_with(|| RowData::new(row))
            .cells
            .entry(col)
            .or_insert_with(|| CellData::null(reference)))
    }

    /// Set a string value.
    pub fn set_string(&mut self, row: u32, col: u32, value: impl Into<String>) -> Result<()> {
        self.cell_mut(row, col)?.set(CellType::String, value.into());
        Ok(())
    }

    /// Set a numeric value, stored as canonical text.
    ///
    /// Integral values below 2^53 are written without a fraction (`42`, not
    /// `42.0`); everything else uses the shortest round-trip form.
    pub fn set_number(&mut self, row: u32, col: u32, value: f64) -> Result<()> {
        self.cell_mut(row, col)?
            .set(CellType::Numeric, canonical_number(value));
        Ok(())
    }

    /// Set a numeric value from text the caller has already canonicalized.
    pub fn set_numeric_text(&mut self, row: u32, col: u32, text: impl Into<String>) -> Result<()> {
        self.cell_mut(row, col)?.set(CellType::Numeric, text.into());
        Ok(())
    }

    /// Set a boolean value (`1` / `0`).
    pub fn set_bool(&mut self, row: u32, col: u32, value: bool) -> Result<()> {
        let text = if value { "1" } else { "0" };
        self.cell_mut(row, col)?
            .set(CellType::Boolean, text.to_string());
        Ok(())
    }

    /// Set a formula. The leading `=` marker is added when missing.
    pub fn set_formula(&mut self, row: u32, col: u32, formula: &str) -> Result<()> {
        let stored = if formula.starts_with(FORMULA_MARKER) {
            formula.to_string()
        } else {
            format!("{}{}", FORMULA_MARKER, formula)
        };
        self.cell_mut(row, col)?.set(CellType::Formula, stored);
        Ok(())
    }

    /// Clear a cell's value.
    ///
    /// Cells inside a merged range stay materialized as null anchors; other
    /// cells are removed, along with their row once it is empty.
    pub fn clear_cell(&mut self, row: u32, col: u32) {
        let Some(row_data) = self.rows.get_mut(&row) else {
            return;
        };

        match row_data.cells.get_mut(&col) {
            Some(cell) if cell.merged => cell.set(CellType::Null, String::new()),
            Some(_) => {
                row_data.cells.remove(&col);
            },
            None => {},
        }

        if row_data.cells.is_empty() {
            self.rows.remove(&row);
        }
    }

    /// Merge cells in a rectangular range.
    ///
    /// # Arguments
    /// * `start_row` - 1-based starting row
    /// * `start_col` - 1-based starting column
    /// * `end_row` - 1-based ending row
    /// * `end_col` - 1-based ending column
    pub fn merge_cells(
        &mut self,
        start_row: u32,
        start_col: u32,
        end_row: u32,
        end_col: u32,
    ) -> Result<()> {
        let range = RangeReference::new(
            CellReference::new(start_col, start_row)?,
            CellReference::new(end_col, end_row)?,
        );
        self.merge_range(range);
        Ok(())
    }

    /// Merge a parsed range. Every cell in it is materialized and flagged as
    /// merged; existing values are kept.
    pub fn merge_range(&mut self, range: RangeReference) {
        for reference in range.cells() {
            self.rows
                .entry(reference.row())
                .or_insert_with(|| RowData::new(reference.row()))
                .cells
                .entry(reference.column())
                .or_insert_with(|| CellData::null(reference))
                .set_merged(true);
        }
        self.merged_ranges.push(range);
    }

    pub fn page_margins_mut(&mut self) -> &mut PageMargins {
        &mut self.page_margins
    }

    pub fn page_setup_mut(&mut self) -> &mut PageSetup {
        &mut self.page_setup
    }

    pub fn set_page_setup(&mut self, setup: PageSetup) {
        self.page_setup = setup;
    }

    /// Get the number of materialized cells (including null merge anchors).
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(RowData::len).sum()
    }
}

impl Worksheet for WorksheetData {
    type Row = RowData;

    fn title(&self) -> &str {
        &self.title
    }

    fn rows(&self) -> Box<dyn Iterator<Item = &RowData> + '_> {
        Box::new(self.rows.values())
    }

    fn merged_ranges(&self) -> &[RangeReference] {
        &self.merged_ranges
    }

    fn page_margins(&self) -> &PageMargins {
        &self.page_margins
    }

    fn page_setup(&self) -> &PageSetup {
        &self.page_setup
    }
}

/// A workbook: worksheets in tab order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookData {
    worksheets: Vec<WorksheetData>,
}

impl WorkbookData {
    /// Create a workbook with no worksheets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a workbook with one empty `Sheet1`.
    pub fn with_default_sheet() -> Self {
        let mut wb = Self::new();
        wb.create_sheet("Sheet1");
        wb
    }

    /// Append a worksheet and return it for population.
    ///
    /// Title uniqueness is the caller's invariant.
    pub fn create_sheet(&mut self, title: impl Into<String>) -> &mut WorksheetData {
        self.worksheets.push(WorksheetData::new(title));
        let last = self.worksheets.len() - 1;
        &mut self.worksheets[last]
    }

    pub fn worksheet(&self, index: usize) -> Option<&WorksheetData> {
        self.worksheets.get(index)
    }

    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut WorksheetData> {
        self.worksheets.get_mut(index)
    }

    pub fn worksheet_by_title(&self, title: &str) -> Option<&WorksheetData> {
        self.worksheets.iter().find(|ws| ws.title == title)
    }

    /// Move the sheet at `from` to position `to`, shifting the others.
    pub fn move_sheet(&mut self, from: usize, to: usize) {
        if from < self.worksheets.len() && to < self.worksheets.len() {
            let sheet = self.worksheets.remove(from);
            self.worksheets.insert(to, sheet);
        }
    }
}

impl Workbook for WorkbookData {
    type Sheet = WorksheetData;

    fn worksheets(&self) -> Box<dyn Iterator<Item = &WorksheetData> + '_> {
        Box::new(self.worksheets.iter())
    }

    fn worksheet_count(&self) -> usize {
        self.worksheets.len()
    }
}

/// Canonical numeric text for a cell value.
pub fn canonical_number(value: f64) -> String {
    // 2^53: beyond this not every integer is representable
    const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;

    if value.is_finite() && value.fract() == 0.0 && value.abs() < EXACT_INT_LIMIT {
        let mut buf = itoa::Buffer::new();
        return buf.format(value as i64).to_string();
    }

    let mut buf = ryu::Buffer::new();
    buf.format(value).to_string()
}
