//! sheetml-writer - serialize spreadsheets to Office Open XML parts
//!
//! This library turns an in-memory workbook into the XML documents of an
//! `.xlsx` package: the workbook, one document per worksheet, the shared-string
//! table, relationship manifests, the content-type registry and the constant
//! theme and style parts.
//!
//! # Features
//!
//! - **Trait-based input**: any model implementing [`sheet::Workbook`] can be
//!   written; [`sheet::WorkbookData`] is a ready-made in-memory model
//! - **Consistent cross-references**: workbook sheet entries and workbook
//!   relationships are rendered from one [`WorkbookManifest`]
//! - **Parallel worksheets**: with the default `parallel` feature, worksheets
//!   render on the rayon thread pool
//!
//! Writing the returned parts into a ZIP container is up to the caller.
//!
//! # Example
//!
//! ```
//! use sheetml_writer::{PackageOptions, PackageWriter};
//! use sheetml_writer::sheet::WorkbookData;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut workbook = WorkbookData::new();
//! let sheet = workbook.create_sheet("Scores");
//! sheet.set_string(1, 1, "Ada")?;
//! sheet.set_number(1, 2, 97.5)?;
//! sheet.set_formula(2, 2, "=SUM(B1:B1)")?;
//!
//! for part in PackageWriter::new(PackageOptions::default()).write_parts(&workbook)? {
//!     println!("{}: {} bytes", part.path, part.xml.len());
//! }
//! # Ok(())
//! # }
//! ```

/// Shared helpers (XML escaping)
pub mod common;

/// OOXML package output
///
/// OPC plumbing plus the SpreadsheetML emitters.
pub mod ooxml;

/// Spreadsheet domain model
///
/// Accessor traits the emitters read through, value types, and an in-memory
/// implementation.
pub mod sheet;

// Re-export commonly used types for convenience
pub use ooxml::xlsx::writer::{
    PackageOptions, PackagePart, PackageWriter, SharedStringTable, WorkbookManifest,
    write_workbook, write_worksheet,
};
pub use ooxml::{OoxmlError, Result};
