//! Office Open XML (OOXML) package output.
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): package plumbing shared by every OOXML format
//!    (relationship manifests, the content-type registry, well-known URIs)
//! 2. **Format-Specific Modules**:
//!    - `xlsx`: SpreadsheetML workbooks

pub mod error;
pub mod opc;
pub mod xlsx;

// Re-export commonly used types from OPC layer
pub use opc::{ContentTypes, Relationship, Relationships};

// Re-export error types
pub use error::{OoxmlError, Result};
