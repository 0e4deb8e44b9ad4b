//! SpreadsheetML part emitters.
//!
//! Each emitter is a pure function of its read-only inputs and returns one XML
//! document. [`PackageWriter`] wires them together for a whole workbook.

pub mod package;
pub mod sheet;
pub mod strings;
pub mod workbook;

// Re-export main types
pub use package::{PackageOptions, PackagePart, PackageWriter, content_types, root_relationships};
pub use sheet::{WorksheetWriter, row_span, write_worksheet};
pub use strings::SharedStringTable;
pub use workbook::{
    SheetRelationship, WorkbookManifest, write_workbook, write_workbook_with_manifest,
};
