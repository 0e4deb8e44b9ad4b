//! Open Packaging Conventions (OPC) plumbing for SpreadsheetML packages.
//!
//! This module covers the package-level parts a workbook writer has to emit
//! next to its SpreadsheetML documents:
//!
//! - Relationship manifests (`.rels` parts)
//! - The content-type registry (`[Content_Types].xml`)
//! - Namespace, content-type, relationship-type and path constants
//!
//! Placing the rendered documents into a ZIP container is left to the caller.

pub mod constants;
pub mod content_types;
pub mod rel;

// Re-export commonly used types
pub use content_types::ContentTypes;
pub use rel::{Relationship, Relationships};
