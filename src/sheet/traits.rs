//! Read-only accessor contracts the emitters consume.
//!
//! Any domain model can be serialized by implementing these four traits; the
//! emitters never mutate what they are given.

use super::types::{CellReference, CellType, PageMargins, PageSetup, RangeReference};

/// Represents an individual cell in a worksheet.
pub trait Cell {
    /// Get the column number (1-based).
    fn column(&self) -> u32;

    /// Get the row number (1-based).
    fn row(&self) -> u32;

    /// Get the cell reference (e.g., "A1").
    ///
    /// The default implementation falls back to `A1` if the model hands out an
    /// out-of-range position, which its own invariants should rule out.
    fn reference(&self) -> CellReference {
        CellReference::new(self.column(), self.row()).unwrap_or_default()
    }

    /// Get the type tag of the raw value.
    fn data_type(&self) -> CellType;

    /// Get the raw value text. Formulas keep their leading `=` marker.
    fn raw_value(&self) -> &str;

    /// Check if the cell lies inside a merged range.
    fn is_merged(&self) -> bool;

    /// Check if the cell is null.
    fn is_null(&self) -> bool {
        self.data_type().is_null()
    }
}

/// A row of cells ordered by column.
pub trait Row {
    type Cell: Cell;

    /// Get the row number (1-based).
    fn index(&self) -> u32;

    /// Iterate the row's cells in ascending column order.
    fn cells(&self) -> Box<dyn Iterator<Item = &Self::Cell> + '_>;
}

/// Represents a worksheet (sheet) in a workbook.
pub trait Worksheet {
    type Row: Row;

    /// Get the worksheet title as shown on its tab.
    fn title(&self) -> &str;

    /// Iterate rows in ascending row order.
    fn rows(&self) -> Box<dyn Iterator<Item = &Self::Row> + '_>;

    /// Merged ranges in the order they were declared.
    fn merged_ranges(&self) -> &[RangeReference];

    fn page_margins(&self) -> &PageMargins;

    fn page_setup(&self) -> &PageSetup;

    /// Smallest range containing every non-null cell; `A1` when there are none.
    fn calculate_dimension(&self) -> RangeReference {
        let mut dimension: Option<RangeReference> = None;

        for row in self.rows() {
            for cell in row.cells().filter(|c| !c.is_null()) {
                let reference = cell.reference();
                match dimension.as_mut() {
                    Some(range) => range.expand_to_include(reference),
                    None => dimension = Some(RangeReference::single(reference)),
                }
            }
        }

        dimension.unwrap_or_default()
    }
}

/// Trait representing a workbook: an ordered list of worksheets.
pub trait Workbook {
    type Sheet: Worksheet;

    /// Iterate worksheets in tab order.
    fn worksheets(&self) -> Box<dyn Iterator<Item = &Self::Sheet> + '_>;

    /// Get the number of worksheets.
    fn worksheet_count(&self) -> usize {
        self.worksheets().count()
    }
}
