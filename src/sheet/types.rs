//! Common types for spreadsheet serialization.

use crate::ooxml::error::{OoxmlError, Result};
use std::fmt;
use std::str::FromStr;

/// Highest column index a SpreadsheetML sheet can address (`XFD`).
pub const MAX_COLUMN: u32 = 16_384;

/// Highest row index a SpreadsheetML sheet can address.
pub const MAX_ROW: u32 = 1_048_576;

/// Type tag of a cell's raw value.
///
/// Style and number-format resolution happen before the engine sees a cell:
/// the tag plus the raw text is all it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellType {
    /// No value
    #[default]
    Null,
    /// Text, emitted through the shared-string table or inline
    String,
    /// Canonical numeric text, emitted byte-for-byte
    Numeric,
    /// `1` or `0`
    Boolean,
    /// Formula text with its leading `=` marker
    Formula,
}

impl CellType {
    #[inline]
    pub fn is_null(self) -> bool {
        matches!(self, CellType::Null)
    }
}

/// A single cell address (column + row, both 1-based).
///
/// Orders row-major: first by row, then by column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellReference {
    row: u32,
    column: u32,
}

impl CellReference {
    /// Create a reference from a 1-based column and row.
    ///
    /// Returns an error when either index is zero or beyond the sheet limits.
    pub fn new(column: u32, row: u32) -> Result<Self> {
        if !(1..=MAX_COLUMN).contains(&column) || !(1..=MAX_ROW).contains(&row) {
            return Err(OoxmlError::InvalidCellReference(format!(
                "column {} row {}",
                column, row
            )));
        }
        Ok(Self { row, column })
    }

    /// 1-based column index.
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// 1-based row index.
    #[inline]
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Column letters of this reference (e.g. `"AB"`).
    pub fn column_letters(&self) -> String {
        Self::column_string_from_index(self.column)
    }

    /// Convert column letters to a 1-based index (`"A"` -> 1, `"AA"` -> 27).
    ///
    /// Letters are case-insensitive.
    pub fn column_index_from_string(letters: &str) -> Result<u32> {
        if letters.is_empty() || letters.len() > 3 {
            return Err(OoxmlError::InvalidCellReference(letters.to_string()));
        }

        let mut col: u32 = 0;
        for b in letters.bytes() {
            if !b.is_ascii_alphabetic() {
                return Err(OoxmlError::InvalidCellReference(letters.to_string()));
            }
            col = col * 26 + (b.to_ascii_uppercase() - b'A' + 1) as u32;
        }

        if col > MAX_COLUMN {
            return Err(OoxmlError::InvalidCellReference(letters.to_string()));
        }
        Ok(col)
    }

    /// Convert a 1-based column index to letters (1 -> `"A"`, 27 -> `"AA"`).
    pub fn column_string_from_index(index: u32) -> String {
        let mut letters = [0u8; 7];
        let mut pos = letters.len();
        let mut col = index;

        while col > 0 {
            col -= 1;
            pos -= 1;
            letters[pos] = (col % 26) as u8 + b'A';
            col /= 26;
        }

        letters[pos..].iter().map(|&b| b as char).collect()
    }
}

impl Default for CellReference {
    /// `A1`.
    fn default() -> Self {
        Self { row: 1, column: 1 }
    }
}

impl FromStr for CellReference {
    type Err = OoxmlError;

    /// Parse an A1-style reference. `$` absolute markers are accepted and ignored.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || OoxmlError::InvalidCellReference(s.to_string());

        let trimmed = s.trim();
        let cleaned: String = trimmed.chars().filter(|&c| c != '$').collect();
        let split = cleaned
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (letters, digits) = cleaned.split_at(split);

        let column = Self::column_index_from_string(letters).map_err(|_| invalid())?;
        if digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let row: u32 = digits.parse().map_err(|_| invalid())?;

        Self::new(column, row).map_err(|_| invalid())
    }
}

impl fmt::Display for CellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = itoa::Buffer::new();
        f.write_str(&self.column_letters())?;
        f.write_str(buf.format(self.row))
    }
}

/// A rectangular block of cells, inclusive on both corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeReference {
    top_left: CellReference,
    bottom_right: CellReference,
}

impl RangeReference {
    /// Create a range from any two opposite corners.
    pub fn new(a: CellReference, b: CellReference) -> Self {
        Self {
            top_left: CellReference {
                row: a.row.min(b.row),
                column: a.column.min(b.column),
            },
            bottom_right: CellReference {
                row: a.row.max(b.row),
                column: a.column.max(b.column),
            },
        }
    }

    /// A range covering exactly one cell.
    pub fn single(cell: CellReference) -> Self {
        Self {
            top_left: cell,
            bottom_right: cell,
        }
    }

    #[inline]
    pub fn top_left(&self) -> CellReference {
        self.top_left
    }

    #[inline]
    pub fn bottom_right(&self) -> CellReference {
        self.bottom_right
    }

    #[inline]
    pub fn is_single_cell(&self) -> bool {
        self.top_left == self.bottom_right
    }

    /// Number of columns spanned.
    pub fn width(&self) -> u32 {
        self.bottom_right.column - self.top_left.column + 1
    }

    /// Number of rows spanned.
    pub fn height(&self) -> u32 {
        self.bottom_right.row - self.top_left.row + 1
    }

    pub fn contains(&self, cell: &CellReference) -> bool {
        (self.top_left.row..=self.bottom_right.row).contains(&cell.row)
            && (self.top_left.column..=self.bottom_right.column).contains(&cell.column)
    }

    /// Grow the range just enough to cover `cell`.
    pub fn expand_to_include(&mut self, cell: CellReference) {
        self.top_left.row = self.top_left.row.min(cell.row);
        self.top_left.column = self.top_left.column.min(cell.column);
        self.bottom_right.row = self.bottom_right.row.max(cell.row);
        self.bottom_right.column = self.bottom_right.column.max(cell.column);
    }

    /// Every cell of the range, row-major.
    pub fn cells(&self) -> impl Iterator<Item = CellReference> + '_ {
        (self.top_left.row..=self.bottom_right.row).flat_map(move |row| {
            (self.top_left.column..=self.bottom_right.column)
                .map(move |column| CellReference { row, column })
        })
    }
}

impl Default for RangeReference {
    /// The degenerate `A1` range.
    fn default() -> Self {
        Self::single(CellReference::default())
    }
}

impl FromStr for RangeReference {
    type Err = OoxmlError;

    /// Parse `"A1:B2"` or a single-cell `"C3"`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || OoxmlError::InvalidRangeReference(s.to_string());

        match s.split_once(':') {
            Some((start, end)) => {
                let start: CellReference = start.parse().map_err(|_| invalid())?;
                let end: CellReference = end.parse().map_err(|_| invalid())?;
                Ok(Self::new(start, end))
            },
            None => s.parse().map(Self::single).map_err(|_| invalid()),
        }
    }
}

impl fmt::Display for RangeReference {
    /// Single-cell ranges render as one reference (`"A1"`), others as `"A1:B2"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_cell() {
            write!(f, "{}", self.top_left)
        } else {
            write!(f, "{}:{}", self.top_left, self.bottom_right)
        }
    }
}

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMargins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub header: f64,
    pub footer: f64,
}

impl Default for PageMargins {
    /// Excel's "Normal" margins.
    fn default() -> Self {
        Self {
            left: 0.7,
            right: 0.7,
            top: 0.75,
            bottom: 0.75,
            header: 0.3,
            footer: 0.3,
        }
    }
}

/// Page orientation for printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Paper size with its SpreadsheetML integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum PaperSize {
    #[default]
    Letter = 1,
    LetterSmall = 2,
    Tabloid = 3,
    Ledger = 4,
    Legal = 5,
    Statement = 6,
    Executive = 7,
    A3 = 8,
    A4 = 9,
    A4Small = 10,
    A5 = 11,
}

impl PaperSize {
    /// The `paperSize` attribute value.
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            1 => PaperSize::Letter,
            2 => PaperSize::LetterSmall,
            3 => PaperSize::Tabloid,
            4 => PaperSize::Ledger,
            5 => PaperSize::Legal,
            6 => PaperSize::Statement,
            7 => PaperSize::Executive,
            8 => PaperSize::A3,
            9 => PaperSize::A4,
            10 => PaperSize::A4Small,
            11 => PaperSize::A5,
            _ => return None,
        })
    }
}

/// Page setup configuration.
///
/// `PageSetup::default()` is the state in which no `pageSetup` element is
/// written at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PageSetup {
    pub orientation: Orientation,
    pub paper_size: PaperSize,
    /// Scale the printout to fit the page count below
    pub fit_to_page: bool,
    pub fit_to_height: bool,
    pub fit_to_width: bool,
}

impl PageSetup {
    #[inline]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> CellReference {
        s.parse().unwrap()
    }

    #[test]
    fn test_column_conversions() {
        assert_eq!(CellReference::column_string_from_index(1), "A");
        assert_eq!(CellReference::column_string_from_index(26), "Z");
        assert_eq!(CellReference::column_string_from_index(27), "AA");
        assert_eq!(CellReference::column_string_from_index(702), "ZZ");
        assert_eq!(CellReference::column_string_from_index(MAX_COLUMN), "XFD");

        assert_eq!(CellReference::column_index_from_string("a").unwrap(), 1);
        assert_eq!(CellReference::column_index_from_string("AZ").unwrap(), 52);
        assert_eq!(CellReference::column_index_from_string("XFD").unwrap(), MAX_COLUMN);
        assert!(CellReference::column_index_from_string("XFE").is_err());
        assert!(CellReference::column_index_from_string("").is_err());
        assert!(CellReference::column_index_from_string("A1").is_err());
    }

    #[test]
    fn test_cell_reference_parse_and_display() {
        let r = cell("$B$7");
        assert_eq!((r.column(), r.row()), (2, 7));
        assert_eq!(r.to_string(), "B7");

        for bad in ["", "7", "B", "B0", "B07", "1B", "B-1", "A1048577"] {
            assert!(bad.parse::<CellReference>().is_err(), "{bad:?} should not parse");
        }
        assert!(CellReference::new(0, 1).is_err());
    }

    #[test]
    fn test_cell_reference_orders_row_major() {
        assert!(cell("Z1") < cell("A2"));
        assert!(cell("A1") < cell("B1"));
    }

    #[test]
    fn test_range_reference() {
        let range: RangeReference = "C3:A1".parse().unwrap();
        assert_eq!(range.to_string(), "A1:C3");
        assert_eq!((range.width(), range.height()), (3, 3));
        assert!(range.contains(&cell("B2")));
        assert!(!range.contains(&cell("D1")));
        assert_eq!(range.cells().count(), 9);

        let single: RangeReference = "B2".parse().unwrap();
        assert!(single.is_single_cell());
        assert_eq!(single.to_string(), "B2");

        assert!("A1:".parse::<RangeReference>().is_err());
        assert_eq!(RangeReference::default().to_string(), "A1");
    }

    #[test]
    fn test_range_expand() {
        let mut range = RangeReference::single(cell("C3"));
        range.expand_to_include(cell("A5"));
        range.expand_to_include(cell("B1"));
        assert_eq!(range.to_string(), "A1:C5");
    }

    #[test]
    fn test_page_setup_default_equality() {
        let mut setup = PageSetup::default();
        assert!(setup.is_default());

        setup.fit_to_width = true;
        assert!(!setup.is_default());

        let landscape = PageSetup {
            orientation: Orientation::Landscape,
            ..PageSetup::default()
        };
        assert!(!landscape.is_default());
        assert_eq!(landscape.orientation.as_str(), "landscape");
    }

    #[test]
    fn test_paper_size_codes() {
        assert_eq!(PaperSize::default().code(), 1);
        assert_eq!(PaperSize::A4.code(), 9);
        for code in 1..=11 {
            assert_eq!(PaperSize::from_code(code).unwrap().code(), code);
        }
        assert_eq!(PaperSize::from_code(0), None);
    }
}
