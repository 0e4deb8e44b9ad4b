//! Excel (.xlsx) workbook serialization.
//!
//! - [`writer`]: emitters for the workbook, worksheet and shared-string parts,
//!   plus the package driver that assembles them
//! - [`template`]: constant parts (theme, default stylesheet)
//!
//! # Example
//!
//! ```rust
//! use sheetml_writer::ooxml::xlsx::writer::{SharedStringTable, write_worksheet};
//! use sheetml_writer::sheet::WorkbookData;
//!
//! let mut workbook = WorkbookData::new();
//! let sheet = workbook.create_sheet("Sheet1");
//! sheet.set_string(1, 1, "Hello")?;
//! sheet.set_number(1, 2, 42.0)?;
//!
//! let strings = SharedStringTable::from_workbook(&workbook);
//! let xml = write_worksheet(workbook.worksheet(0).unwrap(), Some(&strings))?;
//! assert!(xml.contains(r#"<c r="A1" t="s"><v>0</v></c>"#));
//! # Ok::<(), sheetml_writer::OoxmlError>(())
//! ```

pub mod template;
pub mod writer;

pub use template::{default_styles_xml, default_theme_xml, write_theme};
pub use writer::{PackageOptions, PackagePart, PackageWriter, SharedStringTable, WorkbookManifest};
