/// Error types for OOXML part emission.
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
///
/// Emitters fail when formatting into the output buffer fails or when they
/// are handed a manifest that does not match the workbook. The two reference
/// variants come from the domain model's parsers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OoxmlError {
    /// Writing into the XML output buffer failed
    #[error("XML write error: {0}")]
    Xml(#[from] std::fmt::Error),

    /// Text that is not an A1-style cell reference
    #[error("Invalid cell reference: {0}")]
    InvalidCellReference(String),

    /// Text that is not an A1-style range reference
    #[error("Invalid range reference: {0}")]
    InvalidRangeReference(String),

    /// A workbook manifest built for a different number of sheets
    #[error("Manifest covers {entries} sheets but the workbook has {sheets}")]
    ManifestMismatch { sheets: usize, entries: usize },
}
