//! Spreadsheet domain model.
//!
//! The emitters consume a workbook only through the accessor traits in
//! [`traits`]. [`WorkbookData`] is a ready-made in-memory implementation.
//!
//! # Quick Start
//!
//! ```rust
//! use sheetml_writer::sheet::WorkbookData;
//!
//! let mut workbook = WorkbookData::new();
//! let sheet = workbook.create_sheet("Data");
//! sheet.set_string(1, 1, "Name")?;
//! sheet.set_number(1, 2, 42.0)?;
//! sheet.merge_cells(2, 1, 2, 2)?;
//! # Ok::<(), sheetml_writer::OoxmlError>(())
//! ```

pub mod traits;
pub mod types;
mod workbook;

pub use traits::{Cell, Row, Workbook, Worksheet};
pub use types::{
    CellReference, CellType, Orientation, PageMargins, PageSetup, PaperSize, RangeReference,
};
pub use workbook::{CellData, RowData, WorkbookData, WorksheetData, canonical_number};
